use crate::conf::{ColorbarConfig, load_or_default, validation::validate_config};
use crate::logging::{LogTarget, init_logging};
use crate::server;
use anyhow::{Context, bail};
use clap::Args;
use std::path::{Path, PathBuf};

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Path to the colorbar config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Listen address, overriding `server.listen`
    #[arg(long)]
    pub listen: Option<String>,

    /// Burn this many CPUs ("all" or a number)
    #[arg(long)]
    pub cpu_burn: Option<String>,

    /// Seconds between a termination signal and the start of shutdown
    #[arg(long)]
    pub termination_delay: Option<u64>,
}

impl ServeArgs {
    /// Apply the flags on top of a loaded config.
    pub fn apply(&self, config: &mut ColorbarConfig) {
        if let Some(listen) = &self.listen {
            config.server.listen = listen.clone();
        }
        if let Some(cpu_burn) = &self.cpu_burn {
            config.server.cpu_burn = Some(cpu_burn.clone());
        }
        if let Some(delay) = self.termination_delay {
            config.server.termination_delay_seconds = delay;
        }
    }
}

/// Resolve the final config: file, environment, then flags, revalidated.
pub fn resolve(args: &ServeArgs) -> anyhow::Result<ColorbarConfig> {
    let mut config = load_or_default(args.config.as_deref())?.config;
    args.apply(&mut config);

    let origin = args
        .config
        .as_deref()
        .unwrap_or_else(|| Path::new("<flags>"));
    let report = validate_config(&config, origin);
    if report.has_errors() {
        eprint!("{}", report.render_pretty());
        bail!("invalid command line overrides");
    }
    Ok(config)
}

pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    init_logging(LogTarget::Stdout);

    let config = resolve(&args).context("failed to load colorbar config")?;
    server::run(config)
}
