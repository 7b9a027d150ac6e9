//! # claimcheck-verify
//!
//! Decoding of classify-tool observations for claimcheck.
//!
//! This crate provides [`decoder::SchemaClassificationDecoder`], which
//! implements the [`claimcheck_core::traits::ClassificationDecoder`] trait.
//! A classify observation is accepted only if it parses as JSON and
//! satisfies [`decoder::classification_schema`]; everything else becomes a
//! `MalformedClassification` that drops the one step it came from.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use claimcheck_core::StepProcessor;
//! use claimcheck_verify::SchemaClassificationDecoder;
//!
//! let processor = StepProcessor::new(Box::new(SchemaClassificationDecoder::new()));
//! ```

pub mod decoder;

pub use decoder::{classification_schema, SchemaClassificationDecoder};
