use crate::conf::{ConfigError, load_config};
use miette::Report;
use std::path::PathBuf;

pub fn check(path: PathBuf, plain: bool, json: bool) -> anyhow::Result<()> {
    match load_config(&path) {
        Ok(validated) => {
            let cfg = &validated.config;
            if json {
                println!("{}", validated.report.render_json());
                return Ok(());
            }
            println!("✔ Config loaded successfully");
            println!("✔ listening on {}", cfg.server.listen);
            println!("✔ {} colors in palette", cfg.backend.colors.len());
            println!(
                "✔ {:?} sealing, {} summaries kept",
                cfg.chart.seal, cfg.chart.history_len
            );
            println!("✔ {} client controls", cfg.client.controls.len());
            if validated.report.has_violations() {
                println!();
                if plain {
                    print!("{}", validated.report.render_plain());
                } else {
                    print!("{}", validated.report.render_pretty());
                }
            }
            Ok(())
        }
        Err(err) => {
            print_config_error(err, plain, json);
            std::process::exit(1);
        }
    }
}

fn print_config_error(err: ConfigError, plain: bool, json: bool) {
    if let ConfigError::Invalid { report } = &err {
        if json {
            println!("{}", report.render_json());
        } else if plain {
            eprint!("{}", report.render_plain());
        } else {
            eprint!("{}", report.render_pretty());
        }
        return;
    }

    let hint = config_error_hint(&err);
    if plain || json {
        eprintln!("{}", err);
    } else {
        eprintln!();
        eprintln!("{:?}", Report::new(err));
    }
    if let Some(hint) = hint {
        eprintln!();
        eprintln!("{}", hint);
    }
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        ConfigError::ReadFile { .. } => Some(
            "Create a starter config with:\n\
             \n\
             colorbar config init",
        ),

        ConfigError::InvalidEnv { .. } => Some(
            "COLOR takes a color name, ERROR_RATE an integer percentage (0-100)\n\
             and LATENCY a non-negative number of seconds.\n\
             \n\
             Unset the variable to fall back to the config file.",
        ),

        ConfigError::Parse { .. } => Some(
            "Sections are [server], [backend], [chart], [client] and [[client.control]].\n\
             \n\
             Run `colorbar config init` to see every supported key.",
        ),

        _ => None,
    }
}
