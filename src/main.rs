use clap::Parser;
use log::*;
use release_scribe::{
    Args, Result,
    command::{self, RunContext},
    docs, inputs,
    project::{config::ProjectConfig, github::GithubProjects},
    summary::Summary,
};
use std::{
    env,
    io::IsTerminal,
    path::PathBuf,
    process::ExitCode,
};

/// Set to "1" by GitHub Actions when debug logging is enabled for a run.
const RUNNER_DEBUG_ENV: &str = "RUNNER_DEBUG";

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("release_scribe")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

fn env_var(key: &str) -> Option<String> {
    env::var(key).ok()
}

async fn run(args: &Args, summary: &Summary) -> Result<PathBuf> {
    let interactive = std::io::stdin().is_terminal();

    let inputs = inputs::resolve(args, interactive, env_var)?;

    println!("{}", inputs.table());

    let api = GithubProjects::new(ProjectConfig::from(&inputs))?;

    let ctx = RunContext {
        out_dir: PathBuf::from("."),
        docs_path: docs::docs_path(env_var),
        summary: summary.clone(),
    };

    command::execute(&api, &inputs, &ctx).await
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let runner_debug = env_var(RUNNER_DEBUG_ENV).as_deref() == Some("1");
    let summary = Summary::from_env(env_var);

    let args = match Args::try_parse() {
        Ok(args) => args,
        // --help output
        Err(err) if !err.use_stderr() => {
            err.print()?;
            return Ok(ExitCode::SUCCESS);
        }
        Err(err) => {
            initialize_logger(runner_debug)?;
            return Ok(fail(&summary, err.to_string().trim_end()).await);
        }
    };

    initialize_logger(args.debug || runner_debug)?;

    debug!("release-scribe {}", env!("CARGO_PKG_VERSION"));

    match run(&args, &summary).await {
        Ok(path) => {
            info!("release notes generated: {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => Ok(fail(&summary, &format!("{err:#}")).await),
    }
}

/// Log a fatal diagnostic, record it in the step summary and exit with 1.
async fn fail(summary: &Summary, message: &str) -> ExitCode {
    error!("{message}");
    summary.report_error(message).await;
    ExitCode::FAILURE
}
