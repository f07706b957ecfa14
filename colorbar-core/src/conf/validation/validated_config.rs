use crate::conf::types::ColorbarConfig;
use crate::conf::validation::ValidationReport;

/// A config that passed validation, with any warnings that were raised.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub config: ColorbarConfig,
    pub report: ValidationReport,
}
