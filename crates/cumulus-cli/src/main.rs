use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use cumulus_programs::Program;
use cumulus_provisioner::{EngineSettings, LocalEngine, StatePersistence};
use cumulus_sdk::RunInfo;
use cumulus_sdk::config::{DEFAULT_PROJECT, PROJECT_ENV, STACK_ENV};
use eyre::{Result, WrapErr};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "cumulus", version, about = "Evaluate IBM Cloud example programs against a local engine")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluate a program and record stack state
    Up(RunArgs),
    /// Evaluate a program without touching stack state
    Preview(RunArgs),
    /// List the available programs
    Programs,
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Program to evaluate
    #[arg(long, short, default_value = "basic-vpc")]
    program: Program,

    /// Stack (deployment environment) name
    #[arg(long, short, env = STACK_ENV)]
    stack: String,

    #[arg(long, env = PROJECT_ENV, default_value = DEFAULT_PROJECT)]
    project: String,

    /// Directory holding per-stack state files
    #[arg(long, env = "CUMULUS_STATE_DIR", default_value = ".cumulus")]
    state_dir: PathBuf,

    /// Stack configuration, `key=value`; repeatable
    #[arg(long = "config", short = 'c', value_parser = parse_key_value)]
    config: Vec<(String, String)>,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    match cli.command {
        Command::Up(args) => run(args, false).await,
        Command::Preview(args) => run(args, true).await,
        Command::Programs => {
            for program in Program::ALL {
                println!("{:<16} {}", program.name(), program.description());
            }
            Ok(())
        }
    }
}

async fn run(args: RunArgs, preview: bool) -> Result<()> {
    // Flags win over the environment; PULUMI_DRY_RUN and PULUMI_CONFIG
    // still come from it.
    let mut info = RunInfo::from_lookup(|key| match key {
        STACK_ENV => Some(args.stack.clone()),
        PROJECT_ENV => Some(args.project.clone()),
        _ => std::env::var(key).ok(),
    })
    .wrap_err("invalid run context")?;
    info.dry_run |= preview;
    for (key, value) in &args.config {
        info.config.insert(key, value.as_str());
    }

    let persistence = StatePersistence::for_stack(&args.state_dir, &info.project, &info.stack);
    let engine = Arc::new(
        LocalEngine::open(EngineSettings::from(&info), persistence)
            .await
            .wrap_err("failed to open stack state")?,
    );

    let program = args.program;
    let stack = info.stack.clone();
    let evaluation = cumulus_provisioner::evaluate(info, engine, |ctx| program.run(ctx))
        .await
        .wrap_err_with(|| format!("{program} failed on stack {stack}"))?;

    for registration in &evaluation.registrations {
        tracing::info!(
            urn = %registration.urn,
            id = registration.id.as_deref().unwrap_or("<unknown>"),
            status = ?registration.status,
            "resource"
        );
    }
    let order: Vec<String> = evaluation.order.iter().map(ToString::to_string).collect();
    tracing::debug!(?order, "evaluation order");

    println!("{}", serde_json::to_string_pretty(&evaluation.outputs)?);
    Ok(())
}
