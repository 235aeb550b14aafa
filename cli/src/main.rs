//! CLI entrypoint for vmscope
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use vmscope_application::{CallLogger, DispatchToolUseCase};
use vmscope_domain::default_tool_spec;
use vmscope_infrastructure::{
    ConfigLoader, FileConfig, JsonlCallLogger, LocalArtifactStore, TokioProcessExecutor,
    discover_binaries,
};
use vmscope_presentation::{
    BackendRow, CallArgs, Cli, Command, ConsoleFormatter, JsonFormatter, StdioServer,
};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries responses only
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };
    let (stderr, log_guard) = tracing_appender::non_blocking(std::io::stderr());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(stderr)
        .init();

    // === Load Configuration ===
    let config = if cli.no_config {
        info!("Configuration files disabled (--no-config)");
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("failed to load configuration")?
    };
    config.validate().context("invalid configuration")?;

    if cli.show_config {
        println!("Configuration sources:");
        for source in ConfigLoader::describe_sources(cli.config.as_ref()) {
            println!("  {}", source);
        }
        println!();
        println!("{}", config.to_toml().context("failed to render configuration")?);
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        bail!("No command given. Try `vmscope tools` or `vmscope --help`.");
    };

    match command {
        Command::Tools => {
            print!("{}", tools_listing(&config));
            Ok(ExitCode::SUCCESS)
        }
        Command::Call(args) => {
            let dispatcher = build_dispatcher(&config);
            run_call(&dispatcher, &args, JsonFormatter::new(cli.pretty)).await
        }
        Command::Serve => {
            let dispatcher = build_dispatcher(&config);
            let interrupted = run_serve(dispatcher).await?;
            if interrupted {
                // A blocked stdin read would keep the runtime from shutting down
                drop(log_guard);
                std::process::exit(130);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

// === Dependency Injection ===
fn build_dispatcher(config: &FileConfig) -> DispatchToolUseCase {
    let builder = config.command_builder();
    let artifacts = Arc::new(LocalArtifactStore::new(builder.dumps_dir()));
    let mut dispatcher =
        DispatchToolUseCase::new(builder, Arc::new(TokioProcessExecutor::new()), artifacts)
            .with_params(config.execution_params());

    if let Some(path) = &config.logging.call_log {
        match JsonlCallLogger::open(path) {
            Ok(logger) => {
                info!("Call log: {}", logger.path().display());
                dispatcher = dispatcher.with_call_logger(Arc::new(logger) as Arc<dyn CallLogger>);
            }
            Err(e) => warn!("Call logging disabled, cannot open {}: {}", path.display(), e),
        }
    }

    dispatcher
}

fn tools_listing(config: &FileConfig) -> String {
    let rows: Vec<BackendRow> = discover_binaries(&config.command_builder())
        .into_iter()
        .map(|status| BackendRow {
            backend: status.backend,
            binary: status.binary,
            location: status.resolved.map(|path| path.display().to_string()),
        })
        .collect();
    ConsoleFormatter::format_tools(&default_tool_spec(), &rows)
}

async fn run_call(
    dispatcher: &DispatchToolUseCase,
    args: &CallArgs,
    formatter: JsonFormatter,
) -> Result<ExitCode> {
    let call = args.to_tool_call()?;

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let response = dispatcher.execute_with_cancellation(&call, &cancel).await;
    println!("{}", formatter.format(&response));

    // A tool-level error is still printed as JSON but exits non-zero
    if response.is_error() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Returns `true` when the loop was stopped by Ctrl-C rather than EOF.
async fn run_serve(dispatcher: DispatchToolUseCase) -> Result<bool> {
    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted, shutting down");
            ctrl_c.cancel();
        }
    });

    info!("Serving newline-delimited JSON on stdin/stdout");
    let server = StdioServer::new(dispatcher).with_cancellation(cancel.clone());
    let summary = server
        .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await
        .context("serve loop failed")?;

    info!(
        "Serve loop finished: {} dispatched, {} rejected",
        summary.dispatched, summary.rejected
    );
    Ok(cancel.is_cancelled())
}
