use crate::conf::{ColorbarConfig, load_or_default, validation::validate_config};
use crate::logging::{LogTarget, init_logging};
use crate::render::{BarsRenderer, JsonRenderer, Renderer, redraw};
use crate::watch::{WatchOptions, run_watch};
use anyhow::{Context, bail};
use clap::Args;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Args, Debug, Default)]
pub struct WatchArgs {
    /// Path to the colorbar config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Color endpoint URL, overriding `client.target`
    #[arg(long)]
    pub target: Option<String>,

    /// Emit one JSON line per sealed summary instead of bars
    #[arg(long)]
    pub json: bool,

    /// Stop after this many seconds
    #[arg(long)]
    pub duration: Option<f64>,
}

impl WatchArgs {
    pub fn apply(&self, config: &mut ColorbarConfig) {
        if let Some(target) = &self.target {
            config.client.target = target.clone();
        }
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }
}

/// Resolve the final config: file, environment, then flags, revalidated.
pub fn resolve(args: &WatchArgs) -> anyhow::Result<ColorbarConfig> {
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

pub fn run(args: WatchArgs) -> anyhow::Result<()> {
    // Frames own stdout.
    init_logging(LogTarget::Stderr);

    let config = resolve(&args).context("failed to load colorbar config")?;

    let renderer: Box<dyn Renderer> = if args.json {
        Box::new(JsonRenderer::new())
    } else {
        Box::new(BarsRenderer::from_env())
    };

    let json = args.json;
    let sink = move |frame: &str| {
        if json {
            let mut out = io::stdout().lock();
            let _ = out.write_all(frame.as_bytes());
            let _ = out.flush();
        } else {
            redraw(frame);
        }
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;

    runtime.block_on(async {
        run_watch(
            &config,
            renderer,
            sink,
            WatchOptions {
                duration: args.duration(),
            },
        )
        .await
    })?;

    Ok(())
}
