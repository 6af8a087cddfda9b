use crate::config::{Config, SCHEMA_VERSION};
use crate::dedup::{PipelineStage, Strategy, MAX_NGRAM_SIZE, MIN_NGRAM_SIZE};
use crate::error::{DupfindError, Result, ValidationError};

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration
    pub fn validate(config: &Config) -> Result<()> {
        let mut errors = Vec::new();

        Self::validate_schema_version(config, &mut errors);

        if config.strategies.is_empty() {
            errors.push(ValidationError::new(
                "strategies",
                "At least one strategy must be configured",
            ));
        }
        Self::validate_stages("strategies", &config.strategies, &mut errors);

        // Profiles may replace the strategy list, so check theirs too
        for (name, profile) in &config.profiles {
            if let Some(stages) = &profile.strategies {
                Self::validate_stages(&format!("profiles.{}.strategies", name), stages, &mut errors);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(DupfindError::ConfigValidation { errors })
        }
    }

    fn validate_schema_version(config: &Config, errors: &mut Vec<ValidationError>) {
        let version = &config.meta.schema_version;
        if version != SCHEMA_VERSION {
            errors.push(ValidationError::new(
                "_meta.schema_version",
                format!("Unsupported schema version: {}", version),
            ));
        }
    }

    fn validate_stages(prefix: &str, stages: &[PipelineStage], errors: &mut Vec<ValidationError>) {
        for (index, stage) in stages.iter().enumerate() {
            let path = format!("{}[{}]", prefix, index);

            if let Some(threshold) = stage.strategy.threshold() {
                if !(threshold > 0.0 && threshold <= 1.0) {
                    errors.push(ValidationError::new(
                        format!("{}.threshold", path),
                        format!("Threshold must be in (0, 1], got {}", threshold),
                    ));
                }
            }

            match &stage.strategy {
                Strategy::SetOverlap(s) if !s.use_words => {
                    if !(MIN_NGRAM_SIZE..=MAX_NGRAM_SIZE).contains(&s.ngram_size) {
                        errors.push(ValidationError::new(
                            format!("{}.ngram_size", path),
                            format!(
                                "N-gram size must be between {} and {}, got {}",
                                MIN_NGRAM_SIZE, MAX_NGRAM_SIZE, s.ngram_size
                            ),
                        ));
                    }
                }
                Strategy::VectorSpace(s) if s.vocabulary_warning == 0 => {
                    errors.push(ValidationError::new(
                        format!("{}.vocabulary_warning", path),
                        "Vocabulary warning must be greater than 0",
                    ));
                }
                _ => {}
            }
        }
    }
}
