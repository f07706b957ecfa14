mod origin;
pub(crate) mod range;
mod report;
mod validate;
mod validated_config;

pub use origin::Origin;
pub use report::{Severity, ValidationIssue, ValidationReport};
pub use validate::validate_config;
pub use validated_config::ValidatedConfig;
