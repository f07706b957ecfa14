use crate::backend::{BackendMetrics, ColorGateway, ColorResponder, CpuBurn, CpuBurner};
use crate::conf::ColorbarConfig;
use crate::server::{PidFile, remove_pid};
use anyhow::{Context, Result, anyhow};
use pingora::prelude::*;
use pingora::server::Server;
use pingora::server::configuration::ServerConf;
use std::sync::Arc;

/// Hard limit on draining connections once shutdown has begun.
pub const SHUTDOWN_TIMEOUT_SECONDS: u64 = 30;

/// Run the color backend until the process is told to stop.
pub fn run(config: ColorbarConfig) -> Result<()> {
    // Best-effort: a backend without a pid file still serves.
    let pid_file = match config.server.pid_file.as_deref().map(PidFile::create) {
        Some(Ok(pid)) => {
            tracing::info!(pid_file = %pid.path().display(), "pid file written");
            Some(pid)
        }
        Some(Err(e)) => {
            tracing::warn!(error = %e, "failed to write pid file; continuing");
            None
        }
        None => None,
    };

    // Lives as long as run_forever, i.e. the process.
    let _burner = match config.server.cpu_burn.as_deref() {
        Some(raw) => {
            let burn = CpuBurn::parse(raw).ok_or_else(|| anyhow!("invalid cpu burn value '{raw}'"))?;
            Some(CpuBurner::start(burn).context("failed to start cpu burn threads")?)
        }
        None => None,
    };

    let server = build_pingora_server(&config)?;

    // run_forever exits the process without unwinding, so Drop alone won't
    // clean up after a ctrl-c.
    if let Some(pid) = &pid_file {
        let path = pid.path().to_path_buf();
        ctrlc::set_handler(move || {
            tracing::info!("shutdown requested, removing pid file");
            remove_pid(&path);
            std::process::exit(0);
        })?;
    }

    tracing::info!(
        event = "server_started",
        listen = %config.server.listen,
        tls = config.server.tls.is_some(),
        termination_delay_seconds = config.server.termination_delay_seconds,
    );

    server.run_forever();
}

/// Build the Pingora server hosting the color gateway.
pub fn build_pingora_server(config: &ColorbarConfig) -> Result<Server> {
    let mut conf = ServerConf::new().ok_or_else(|| anyhow!("could not construct pingora server configuration"))?;
    if let Some(threads) = config.server.threads {
        tracing::debug!(threads, "Creating Pingora server with overridden worker threads");
        conf.threads = threads;
    }
    // SIGTERM starts a graceful shutdown after this grace period, giving load
    // balancers time to stop routing here. SIGINT still stops immediately.
    conf.grace_period_seconds = Some(config.server.termination_delay_seconds);
    conf.graceful_shutdown_timeout_seconds = Some(SHUTDOWN_TIMEOUT_SECONDS);

    let mut server = Server::new_with_opt_and_conf(None, conf);
    server.bootstrap();

    let metrics = Arc::new(BackendMetrics::new().context("failed to register metrics")?);
    let gateway = ColorGateway::new(ColorResponder::new(&config.backend), metrics);

    // Build HTTP service from Pingora.
    let mut svc = http_proxy_service(&server.configuration, gateway);
    if let Some(tls) = &config.server.tls {
        svc.add_tls(&config.server.listen, &tls.cert, &tls.key)?;
    } else {
        svc.add_tcp(&config.server.listen);
    }

    // Register service.
    server.add_service(svc);

    Ok(server)
}
