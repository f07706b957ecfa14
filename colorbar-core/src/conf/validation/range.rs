use crate::conf::validation::{Origin, ValidationReport};

#[derive(Debug, Clone)]
pub struct RangeConstraint<T> {
    pub min: T,
    pub max: T,
    pub label: &'static str,
    pub units: Option<&'static str>,
}

pub const THREADS: RangeConstraint<usize> = RangeConstraint {
    min: 1,
    max: 1024,
    label: "server.threads",
    units: None,
};

pub const TERMINATION_DELAY_SECONDS: RangeConstraint<u64> = RangeConstraint {
    min: 0,
    max: 600,
    label: "server.termination_delay_seconds",
    units: Some("s"),
};

pub const PERCENT: RangeConstraint<u8> = RangeConstraint {
    min: 0,
    max: 100,
    label: "percentage",
    units: Some("%"),
};

pub const LATENCY_SECONDS: RangeConstraint<f64> = RangeConstraint {
    min: 0.0,
    max: 300.0,
    label: "latency_seconds",
    units: Some("s"),
};

pub const WINDOW_MS: RangeConstraint<u64> = RangeConstraint {
    min: 10,
    max: 60 * 60 * 1000,
    label: "chart.window_ms",
    units: Some("ms"),
};

pub const CAPACITY: RangeConstraint<u64> = RangeConstraint {
    min: 1,
    max: 10_000_000,
    label: "chart.capacity",
    units: None,
};

pub const HISTORY_LEN: RangeConstraint<usize> = RangeConstraint {
    min: 1,
    max: 1_000_000,
    label: "chart.history_len",
    units: None,
};

pub const INTERVAL_MS: RangeConstraint<u64> = RangeConstraint {
    min: 1,
    max: 60 * 1000,
    label: "client interval",
    units: Some("ms"),
};

pub const REQUEST_TIMEOUT_MS: RangeConstraint<u64> = RangeConstraint {
    min: 1,
    max: 10 * 60 * 1000,
    label: "client.request_timeout_ms",
    units: Some("ms"),
};

pub const MAX_IN_FLIGHT: RangeConstraint<usize> = RangeConstraint {
    min: 1,
    max: 100_000,
    label: "client.max_in_flight",
    units: None,
};

pub fn validate_range<T>(
    value: T,
    constraint: &RangeConstraint<T>,
    report: &mut ValidationReport,
    origin: &Origin,
) where
    T: PartialOrd + std::fmt::Display,
{
    validate_labeled_range(value, constraint, constraint.label, report, origin);
}

/// Same as [`validate_range`] but reports under a caller-supplied field name,
/// for constraints shared by several fields.
pub fn validate_labeled_range<T>(
    value: T,
    constraint: &RangeConstraint<T>,
    label: &str,
    report: &mut ValidationReport,
    origin: &Origin,
) where
    T: PartialOrd + std::fmt::Display,
{
    // NaN fails both comparisons, so check containment instead.
    let within = value >= constraint.min && value <= constraint.max;
    if !within {
        let units = constraint.units.unwrap_or("");
        report.error(
            format!(
                "invalid {}: {}{} (must be between {}{} and {}{})",
                label, value, units, constraint.min, units, constraint.max, units
            ),
            origin,
            None,
        );
    }
}
