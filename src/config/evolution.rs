use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use crate::error::OpevoError;
use serde::{Deserialize, Serialize};

/// Gene representation, fixed for the lifetime of the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeneMode {
    /// One eligibility flag per operator.
    Boolean,
    /// One sampling weight per operator, intended range `[0, 1]`.
    RealValued,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Parent slots per bucket.
    pub n_parents: usize,
    /// Children evaluated per generation.
    pub lambda: usize,
    pub gene_mode: GeneMode,
    /// Standard deviation of the Gaussian step applied to one gene
    /// (real-valued mode only).
    pub mutation_scale: f64,
    /// Fixed RNG seed for reproducible runs; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            n_parents: 5,
            lambda: 4,
            gene_mode: GeneMode::Boolean,
            mutation_scale: 0.25,
            seed: None,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), OpevoError> {
        if self.n_parents == 0 {
            return Err(OpevoError::Configuration(
                "Parent population size must be at least 1".to_string(),
            ));
        }
        if self.lambda == 0 {
            return Err(OpevoError::Configuration(
                "Lambda must be at least 1".to_string(),
            ));
        }
        if self.gene_mode == GeneMode::RealValued
            && !(self.mutation_scale.is_finite() && self.mutation_scale > 0.0)
        {
            return Err(OpevoError::Configuration(
                "Mutation scale must be a positive finite number".to_string(),
            ));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Evolution".to_string(),
            fields: vec![
                FieldManifest {
                    name: "n_parents".to_string(),
                    field_type: "integer".to_string(),
                    default: serde_json::json!(5),
                    min: Some(1.0),
                    max: None,
                    description: "Parent slots per intensity bucket".to_string(),
                },
                FieldManifest {
                    name: "lambda".to_string(),
                    field_type: "integer".to_string(),
                    default: serde_json::json!(4),
                    min: Some(1.0),
                    max: None,
                    description: "Children evaluated per generation".to_string(),
                },
                FieldManifest {
                    name: "mutation_scale".to_string(),
                    field_type: "number".to_string(),
                    default: serde_json::json!(0.25),
                    min: Some(0.0),
                    max: None,
                    description: "Gaussian step size for real-valued genes".to_string(),
                },
            ],
        }
    }
}
