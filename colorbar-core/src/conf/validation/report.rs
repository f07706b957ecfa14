use crate::conf::validation::Origin;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;

#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub message: String,
    pub origin: Origin,
    pub help: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn has_violations(&self) -> bool {
        !self.errors.is_empty() || !self.warnings.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub(crate) fn error(&mut self, message: String, origin: &Origin, help: Option<String>) {
        self.errors.push(ValidationIssue {
            severity: Severity::Error,
            message,
            origin: origin.clone(),
            help,
        });
    }

    pub(crate) fn warning(&mut self, message: String, origin: &Origin, help: Option<String>) {
        self.warnings.push(ValidationIssue {
            severity: Severity::Warning,
            message,
            origin: origin.clone(),
            help,
        });
    }

    fn issues(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.errors.iter().chain(self.warnings.iter())
    }

    pub fn render_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
    }

    pub fn render_plain(&self) -> String {
        let mut out = String::new();
        for issue in self.issues() {
            let severity = match issue.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };

            let _ = writeln!(out, "{}:{}: {}", issue.origin, severity, issue.message);

            if let Some(help) = &issue.help {
                let _ = writeln!(out, "  help: {}", help);
            }
        }
        out
    }

    pub fn render_pretty(&self) -> String {
        let mut out = String::new();
        let errors = self.errors.len();
        let warnings = self.warnings.len();

        if errors > 0 {
            let _ = writeln!(
                out,
                "configuration validation failed ({} errors, {} warnings)\n",
                errors, warnings
            );
        } else if warnings > 0 {
            let _ = writeln!(out, "configuration is valid ({} warnings)\n", warnings);
        }

        let mut by_section: BTreeMap<String, Vec<&ValidationIssue>> = BTreeMap::new();
        for issue in self.issues() {
            by_section
                .entry(issue.origin.to_string())
                .or_default()
                .push(issue);
        }

        for (section, issues) in by_section {
            let _ = writeln!(out, "{}", section.bold());

            for issue in issues {
                match issue.severity {
                    Severity::Error => {
                        let _ = writeln!(out, "  {}: {}", "error".red().bold(), issue.message);
                    }
                    Severity::Warning => {
                        let _ = writeln!(out, "  {}: {}", "warning".yellow().bold(), issue.message);
                    }
                }
                if let Some(help) = &issue.help {
                    let _ = writeln!(out, "  {}: {}", "help".cyan(), help);
                }
            }
            out.push('\n');
        }
        out
    }
}

/// Server
impl ValidationReport {
    pub fn invalid_listen_addr(&mut self, addr: &str, origin: &Origin) {
        self.error(
            format!("invalid listen address: {}", addr),
            origin,
            Some("use host:port, e.g. 0.0.0.0:8080".to_string()),
        );
    }

    pub fn missing_cert_file(&mut self, cert_file: &str, origin: &Origin) {
        self.error(format!("missing cert file: {}", cert_file), origin, None);
    }

    pub fn missing_key_file(&mut self, key_file: &str, origin: &Origin) {
        self.error(format!("missing key file: {}", key_file), origin, None);
    }

    pub fn invalid_cpu_burn(&mut self, value: &str, origin: &Origin) {
        self.error(
            format!("invalid cpu_burn: {}", value),
            origin,
            Some("use \"all\" or a positive number of CPUs".to_string()),
        );
    }

    pub fn invalid_pid_file(&mut self, pid_file: &std::path::Path, origin: &Origin) {
        self.error(
            format!("invalid pid file path: {}", pid_file.display()),
            origin,
            Some("the parent directory must exist".to_string()),
        );
    }
}

/// Backend
impl ValidationReport {
    pub fn empty_palette(&mut self, origin: &Origin) {
        self.error("backend.colors must not be empty".to_string(), origin, None);
    }

    pub fn blank_color(&mut self, origin: &Origin) {
        self.error("color names must not be blank".to_string(), origin, None);
    }

    pub fn fixed_color_outside_palette(&mut self, color: &str, origin: &Origin) {
        self.warning(
            format!("fixed color '{}' is not part of backend.colors", color),
            origin,
            None,
        );
    }
}

/// Client
impl ValidationReport {
    pub fn invalid_target(&mut self, target: &str, origin: &Origin) {
        self.error(
            format!("invalid target url: {}", target),
            origin,
            Some("use a full http:// or https:// url".to_string()),
        );
    }

    pub fn duplicate_control(&mut self, color: &str, origin: &Origin) {
        self.warning(
            format!("duplicate control for '{}', the last one wins", color),
            origin,
            None,
        );
    }

    pub fn tick_slower_than_window(&mut self, tick_ms: u64, window_ms: u64, origin: &Origin) {
        self.warning(
            format!(
                "tick interval {}ms is longer than the chart window {}ms",
                tick_ms, window_ms
            ),
            origin,
            Some("buckets will span more than one window".to_string()),
        );
    }
}
