//! `intake-admin` -- batch editor for the initiative intake form.
//!
//! Loads a form configuration (or starts a blank one), applies a JSON script
//! of edit commands, then prints the outline and the resulting document to
//! stdout. Logs go to stderr.
//!
//! # Environment variables
//!
//! | Variable            | Default                  | Description                         |
//! |---------------------|--------------------------|-------------------------------------|
//! | `INTAKE_EDITOR`     | `Admin User`             | Actor stamped into `updatedBy`      |
//! | `INTAKE_UNDO_DEPTH` | `50`                     | Past configurations kept for undo   |
//! | `INTAKE_LOG_JSON`   | `false`                  | Emit logs as JSON lines             |
//! | `INTAKE_FORM_NAME`  | `Initiative Intake Form` | Name of a config started from scratch |
//! | `RUST_LOG`          | `intake_admin=info,intake_core=info` | Log filter              |

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use intake_admin::commands::{parse_script, run_script};
use intake_admin::config::AdminConfig;
use intake_admin::outline::render_outline;
use intake_admin::starter_config;
use intake_core::form_config::FormConfig;
use intake_core::store::FormConfigStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "intake-admin")]
#[command(about = "Apply a script of edits to an initiative intake form configuration")]
struct Args {
    /// Path to the JSON array of edit commands
    script: PathBuf,

    /// Form configuration to start from; a blank one-step form when omitted
    config: Option<PathBuf>,

    /// Print only the resulting JSON document, without the outline
    #[arg(long)]
    json_only: bool,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let admin = match AdminConfig::from_env() {
        Ok(admin) => admin,
        Err(e) => {
            eprintln!("invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(admin.log_json);

    match run(&args, &admin) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("intake-admin failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "intake_admin=info,intake_core=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn run(args: &Args, admin: &AdminConfig) -> anyhow::Result<String> {
    let config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            FormConfig::from_json(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => starter_config(admin),
    };

    tracing::info!(
        config_id = %config.id,
        steps = config.steps.len(),
        editor = %admin.editor,
        "Loaded form configuration",
    );

    let script = std::fs::read_to_string(&args.script)
        .with_context(|| format!("reading script {}", args.script.display()))?;
    let commands = parse_script(&script)
        .with_context(|| format!("parsing script {}", args.script.display()))?;

    let mut store =
        FormConfigStore::new(config, admin.editor.clone())?.with_history_limit(admin.undo_depth);
    run_script(&mut store, commands)?;

    let config = store.into_config();
    let json = config.to_json()?;
    if args.json_only {
        return Ok(format!("{json}\n"));
    }
    Ok(format!("{}\n{json}\n", render_outline(&config)))
}
