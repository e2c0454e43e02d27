//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `site_monitor` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Config template generation
//! - Mapping the run outcome to the process exit code
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use std::process;

use site_monitor::config::{resolve_config_path, write_template, Opt, TemplateFormat};
use site_monitor::initialization::{init_crypto_provider, init_logger_with};
use site_monitor::{run_monitor, Config, EXIT_ERROR, EXIT_OK};

#[tokio::main]
async fn main() -> Result<()> {
    // Secrets referenced as ${VAR} in the config may live in a .env file,
    // either in the working directory or next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let opt = Opt::parse();

    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    init_crypto_provider();

    let template = if opt.generate_json_config {
        Some(TemplateFormat::Json)
    } else if opt.generate_yaml_config {
        Some(TemplateFormat::Yaml)
    } else {
        None
    };
    if let Some(format) = template {
        match write_template(format, opt.config.as_deref()) {
            Ok(path) => {
                println!("Wrote {}", path.display());
                process::exit(EXIT_OK);
            }
            Err(e) => {
                error!("{e}");
                process::exit(EXIT_ERROR);
            }
        }
    }

    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    let config = Config {
        config_path: resolve_config_path(opt.config.as_deref(), &cwd),
        enable_email: opt.email,
        enable_sms: opt.sms,
    };

    match run_monitor(config).await {
        Ok(report) => {
            info!(
                "Run {} finished: {} check{} ({} succeeded, {} failed), {} notification{} planned in {:.1}s",
                report.run_id,
                report.total,
                if report.total == 1 { "" } else { "s" },
                report.succeeded,
                report.failed,
                report.notifications_planned,
                if report.notifications_planned == 1 { "" } else { "s" },
                report.elapsed_seconds
            );
            process::exit(report.exit_code);
        }
        Err(e) => {
            error!("site_monitor error: {e:#}");
            process::exit(EXIT_ERROR);
        }
    }
}
