//! Schema-validated decoder for classify-tool observations.
//!
//! `SchemaClassificationDecoder` implements `ClassificationDecoder` from
//! `claimcheck-core`. Decoding runs in three phases:
//!
//! 1. **Parse**: the trimmed observation must be a JSON document.
//! 2. **Structural**: the document is validated against
//!    [`classification_schema`] with the `jsonschema` crate. Every violation
//!    is collected so the trace shows the full failure set at once.
//! 3. **Typed**: the validated document is deserialized into a
//!    `Classification`.
//!
//! Any failure is a `MalformedClassification`; the decoder never panics on
//! upstream input.

use serde_json::{json, Value};
use tracing::{debug, warn};

use claimcheck_contracts::{
    error::{ClaimCheckError, ClaimCheckResult},
    step::Classification,
};
use claimcheck_core::traits::ClassificationDecoder;

/// The JSON Schema every classification payload must satisfy.
///
/// `summary` and `label` are strings, `score` a number in [0.0, 1.0].
/// Extra keys are tolerated.
pub fn classification_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "summary": { "type": "string" },
            "label": { "type": "string" },
            "score": { "type": "number", "minimum": 0.0, "maximum": 1.0 }
        },
        "required": ["summary", "label", "score"]
    })
}

/// Decodes classify-tool observations into `Classification`s.
///
/// The schema is compiled once at construction.
pub struct SchemaClassificationDecoder {
    validator: jsonschema::Validator,
}

impl SchemaClassificationDecoder {
    /// Build a decoder for the built-in [`classification_schema`].
    pub fn new() -> Self {
        Self::with_schema(&classification_schema())
            .expect("built-in classification schema must compile")
    }

    /// Build a decoder for a caller-supplied schema.
    ///
    /// Returns `ClaimCheckError::Config` if `schema` is not a valid JSON
    /// Schema document. The schema should still require the three
    /// classification fields, or typed decoding will reject payloads the
    /// schema accepted.
    pub fn with_schema(schema: &Value) -> ClaimCheckResult<Self> {
        let validator = jsonschema::validator_for(schema).map_err(|e| ClaimCheckError::Config {
            reason: format!("invalid classification schema: {e}"),
        })?;
        Ok(Self { validator })
    }

    fn malformed(reason: String) -> ClaimCheckError {
        warn!(%reason, "classification rejected");
        ClaimCheckError::MalformedClassification { reason }
    }
}

impl Default for SchemaClassificationDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassificationDecoder for SchemaClassificationDecoder {
    fn decode(&self, observation: &str) -> ClaimCheckResult<Classification> {
        // ── Phase 1: parse ───────────────────────────────────────────────────
        let payload: Value = serde_json::from_str(observation.trim())
            .map_err(|e| Self::malformed(format!("observation is not valid JSON: {e}")))?;

        // ── Phase 2: structural validation ───────────────────────────────────
        let violations: Vec<String> = self
            .validator
            .iter_errors(&payload)
            .map(|error| {
                let path = error.instance_path.to_string();
                if path.is_empty() {
                    error.to_string()
                } else {
                    format!("{path}: {error}")
                }
            })
            .collect();

        if !violations.is_empty() {
            return Err(Self::malformed(violations.join("; ")));
        }

        // ── Phase 3: typed decoding ──────────────────────────────────────────
        let classification: Classification = serde_json::from_value(payload)
            .map_err(|e| Self::malformed(format!("classification has unexpected shape: {e}")))?;

        debug!(
            label = %classification.label,
            score = classification.score,
            "classification decoded"
        );

        Ok(classification)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
