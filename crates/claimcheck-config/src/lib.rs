//! # claimcheck-config
//!
//! TOML run configuration for claimcheck.
//!
//! ## Overview
//!
//! [`RunConfig`] names the planner's search, fetch and classify tools, caps
//! the URLs taken from one search observation and sets how many snippets a
//! report lists. The core never reads configuration itself: callers resolve
//! steps with [`RunConfig::resolve_step`] and pass `max_urls` to the
//! `StepProcessor` constructor.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use claimcheck_config::RunConfig;
//!
//! let config = RunConfig::from_file(Path::new("config/claimcheck.toml"))?;
//! let step = config.resolve_step(&raw_step);
//! ```

pub mod config;
pub mod tools;

pub use config::{QueryConfig, RunConfig, SearchConfig};
pub use tools::ToolNames;
