use crate::conf::types::{ColorbarConfig, SealMode};
use crate::conf::validation::range::{
    CAPACITY, HISTORY_LEN, INTERVAL_MS, LATENCY_SECONDS, MAX_IN_FLIGHT, PERCENT,
    REQUEST_TIMEOUT_MS, TERMINATION_DELAY_SECONDS, THREADS, WINDOW_MS, validate_labeled_range,
    validate_range,
};
use crate::conf::validation::{Origin, ValidationReport};
use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::Path;

/// Collect every problem in the config instead of stopping at the first one.
pub fn validate_config(config: &ColorbarConfig, file: &Path) -> ValidationReport {
    let mut report = ValidationReport::default();

    validate_server(config, file, &mut report);
    validate_backend(config, file, &mut report);
    validate_chart(config, file, &mut report);
    validate_client(config, file, &mut report);

    report
}

fn validate_server(config: &ColorbarConfig, file: &Path, report: &mut ValidationReport) {
    let server = &config.server;
    let origin = Origin::new(file, "server", None);

    if server.listen.parse::<SocketAddr>().is_err() {
        report.invalid_listen_addr(&server.listen, &origin);
    }

    if let Some(threads) = server.threads {
        validate_range(threads, &THREADS, report, &origin);
    }

    validate_range(
        server.termination_delay_seconds,
        &TERMINATION_DELAY_SECONDS,
        report,
        &origin,
    );

    if let Some(cpu_burn) = &server.cpu_burn
        && crate::backend::CpuBurn::parse(cpu_burn).is_none()
    {
        report.invalid_cpu_burn(cpu_burn, &origin);
    }

    if let Some(pid_file) = &server.pid_file {
        let parent_ok = match pid_file.parent() {
            Some(p) if p.as_os_str().is_empty() => true,
            Some(p) => p.is_dir(),
            None => false,
        };
        if !parent_ok || pid_file.file_name().is_none() {
            report.invalid_pid_file(pid_file, &origin);
        }
    }

    if let Some(tls) = &server.tls {
        let origin = Origin::new(file, "server.tls", None);
        if !Path::new(&tls.cert).is_file() {
            report.missing_cert_file(&tls.cert, &origin);
        }
        if !Path::new(&tls.key).is_file() {
            report.missing_key_file(&tls.key, &origin);
        }
    }
}

fn validate_backend(config: &ColorbarConfig, file: &Path, report: &mut ValidationReport) {
    let backend = &config.backend;
    let origin = Origin::new(file, "backend", None);

    if backend.colors.is_empty() {
        report.empty_palette(&origin);
    }
    if backend.colors.iter().any(|c| c.trim().is_empty()) {
        report.blank_color(&origin);
    }

    if let Some(color) = &backend.color {
        if color.trim().is_empty() {
            report.blank_color(&origin);
        } else if !backend.colors.iter().any(|c| c == color) {
            report.fixed_color_outside_palette(color, &origin);
        }
    }

    if let Some(rate) = backend.error_rate {
        validate_labeled_range(rate, &PERCENT, "backend.error_rate", report, &origin);
    }
    if let Some(latency) = backend.latency_seconds {
        validate_labeled_range(
            latency,
            &LATENCY_SECONDS,
            "backend.latency_seconds",
            report,
            &origin,
        );
    }
}

fn validate_chart(config: &ColorbarConfig, file: &Path, report: &mut ValidationReport) {
    let chart = &config.chart;
    let origin = Origin::new(file, "chart", None);

    validate_range(chart.window_ms, &WINDOW_MS, report, &origin);
    validate_range(chart.history_len, &HISTORY_LEN, report, &origin);

    match (chart.seal, chart.capacity) {
        (SealMode::Capacity, Some(capacity)) => {
            validate_range(capacity, &CAPACITY, report, &origin);
        }
        (SealMode::Window, Some(_)) => {
            report.warning(
                "chart.capacity is ignored when seal = \"window\"".to_string(),
                &origin,
                None,
            );
        }
        _ => {}
    }
}

fn validate_client(config: &ColorbarConfig, file: &Path, report: &mut ValidationReport) {
    let client = &config.client;
    let origin = Origin::new(file, "client", None);

    match reqwest::Url::parse(&client.target) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        _ => report.invalid_target(&client.target, &origin),
    }

    for (label, value) in [
        ("client.poll_interval_ms", client.poll_interval_ms),
        ("client.tick_interval_ms", client.tick_interval_ms),
        ("client.render_interval_ms", client.render_interval_ms),
    ] {
        validate_labeled_range(value, &INTERVAL_MS, label, report, &origin);
    }
    validate_range(
        client.request_timeout_ms,
        &REQUEST_TIMEOUT_MS,
        report,
        &origin,
    );
    validate_range(client.max_in_flight, &MAX_IN_FLIGHT, report, &origin);

    if config.chart.seal == SealMode::Window && client.tick_interval_ms > config.chart.window_ms {
        report.tick_slower_than_window(client.tick_interval_ms, config.chart.window_ms, &origin);
    }

    let mut seen = HashSet::new();
    for (i, control) in client.controls.iter().enumerate() {
        let origin = Origin::new(file, "client.control", Some(i));
        if control.color.trim().is_empty() {
            report.blank_color(&origin);
        } else if !seen.insert(control.color.as_str()) {
            report.duplicate_control(&control.color, &origin);
        }
        validate_labeled_range(
            control.error_percent,
            &PERCENT,
            "control.error_percent",
            report,
            &origin,
        );
        validate_labeled_range(
            control.latency_percent,
            &PERCENT,
            "control.latency_percent",
            report,
            &origin,
        );
        validate_labeled_range(
            control.latency_seconds,
            &LATENCY_SECONDS,
            "control.latency_seconds",
            report,
            &origin,
        );
    }
}
