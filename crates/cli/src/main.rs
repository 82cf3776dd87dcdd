//! Checkrun CLI - runs the check commands of an agent configuration
//! all at once and reports the outcome as TAP on stdout

mod logging;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use checkrun_core::application::{ConcurrentRunner, TapFormatter};
use checkrun_core::port::CheckTask;
use checkrun_infra_config::load_check_specs;
use checkrun_infra_system::CommandCheckTask;

const DEFAULT_CONF: &str = "/etc/mackerel-agent/mackerel-agent.conf";

#[derive(Parser)]
#[command(name = "checkrun")]
#[command(about = "Run check plugins concurrently and report in TAP", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Agent configuration file
    #[arg(long, global = true, env = "CHECKRUN_CONF", default_value = DEFAULT_CONF)]
    conf: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run check commands in the agent configuration all at once
    ///
    /// Used for checking the setting and operation of check plugins.
    /// Failing checks show up as "not ok" records; the exit status only
    /// reflects whether the report could be produced.
    RunChecks,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init()?;

    let cli = Cli::parse();

    match cli.command {
        Commands::RunChecks => run_checks(&cli.conf).await,
    }
}

async fn run_checks(conf: &str) -> Result<()> {
    let path = PathBuf::from(shellexpand::tilde(conf).into_owned());

    let specs = load_check_specs(&path)
        .with_context(|| format!("Failed to load checks from {}", path.display()))?;

    let tasks: Vec<Arc<dyn CheckTask>> = specs
        .into_iter()
        .map(|spec| Arc::new(CommandCheckTask::new(spec)) as Arc<dyn CheckTask>)
        .collect();

    let mut stdout = tokio::io::stdout();
    let summary = ConcurrentRunner::new(TapFormatter::new())
        .run(tasks, &mut stdout)
        .await
        .context("Failed to write report")?;

    info!(
        total = summary.total,
        passed = summary.passed,
        failed = summary.failed,
        "run-checks finished"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_checks_with_conf() {
        let cli = Cli::try_parse_from(["checkrun", "run-checks", "--conf", "/tmp/agent.conf"]).unwrap();

        assert!(matches!(cli.command, Commands::RunChecks));
        assert_eq!(cli.conf, "/tmp/agent.conf");
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Cli::try_parse_from(["checkrun"]).is_err());
    }
}
