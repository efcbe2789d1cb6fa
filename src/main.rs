use clap::Parser;
use cluster_codex::adapters::outbound::console::StderrProgressReporter;
use cluster_codex::adapters::outbound::filesystem::{FileSystemReader, StdoutPresenter};
use cluster_codex::adapters::outbound::formatters::CycloneDxFormatter;
use cluster_codex::adapters::outbound::kubernetes::KubeClusterClient;
use cluster_codex::application::dto::{GenerateRequest, ReportFormat};
use cluster_codex::application::factories::{
    PresenterFactory, PresenterType, ReportFormatterFactory,
};
use cluster_codex::application::use_cases::{CompareInventoriesUseCase, GenerateInventoryUseCase};
use cluster_codex::cli::{Cli, Command, CompareArgs, GenerateArgs};
use cluster_codex::config;
use cluster_codex::ports::outbound::{ColumnLabels, InventoryFormatter, OutputPresenter};
use cluster_codex::shared::error::{CodexError, ExitCode};
use cluster_codex::shared::{security, telemetry, Result};
use std::future::Future;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are reported through clap's error path too
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            process::exit(code.as_i32());
        }
    };

    if let Err(e) = telemetry::init(cli.log_level) {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
    }

    let outcome = match cli.command {
        Command::Generate(args) => run_generate(args).await,
        Command::Compare(args) => run_compare(args),
    };

    match outcome {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

async fn run_generate(args: GenerateArgs) -> Result<ExitCode> {
    if let Some(output) = args.output.as_deref() {
        security::validate_output_path(output)?;
    }

    let filter = config::load_filter(args.filters.as_deref())?;

    let work = async {
        let cluster = KubeClusterClient::connect(args.context.as_deref()).await?;
        let use_case = GenerateInventoryUseCase::new(cluster, StderrProgressReporter::new());
        let request = GenerateRequest::new(filter, args.sort, args.image_purl_scheme);
        use_case.execute(request).await
    };
    let response = run_cancellable(work, args.timeout.map(Duration::from_secs)).await?;

    eprintln!("📝 Generating CycloneDX JSON inventory...");
    let document = CycloneDxFormatter::new().format(&response.inventory)?;

    let presenter = PresenterFactory::create(PresenterType::from(args.output.map(PathBuf::from)));
    presenter.present(&document)?;

    info!(
        applications = response.application_count,
        containers = response.container_count,
        "inventory written"
    );
    Ok(ExitCode::Success)
}

fn run_compare(args: CompareArgs) -> Result<ExitCode> {
    let use_case = CompareInventoriesUseCase::new(FileSystemReader::new());
    let report = use_case.execute(&args.expected, &args.actual)?;

    let color = args.format == ReportFormat::Table
        && !args.no_color
        && std::io::stdout().is_terminal();
    eprintln!("{}", ReportFormatterFactory::progress_message(args.format));
    let formatter = ReportFormatterFactory::create(args.format, color);
    let labels = ColumnLabels {
        expected: args.expected_label,
        actual: args.actual_label,
    };
    StdoutPresenter::new().present(&formatter.format(&report, &labels)?)?;

    if report.has_errors() {
        Ok(ExitCode::DriftDetected)
    } else {
        Ok(ExitCode::Success)
    }
}

/// Drives `work` to completion unless Ctrl-C arrives or `timeout` expires first.
///
/// Dropping the future stops all in-flight requests, so nothing partial
/// reaches the output.
async fn run_cancellable<T, F>(work: F, timeout: Option<Duration>) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let bounded = async {
        match timeout {
            Some(limit) => tokio::time::timeout(limit, work).await.map_err(|_| {
                anyhow::Error::from(CodexError::Cancelled {
                    reason: format!("timed out after {} seconds", limit.as_secs()),
                })
            })?,
            None => work.await,
        }
    };

    tokio::select! {
        result = bounded => result,
        _ = interrupted() => Err(CodexError::Cancelled {
            reason: "interrupted by Ctrl-C".to_string(),
        }
        .into()),
    }
}

/// Resolves on Ctrl-C. Without a signal handler it never resolves, leaving
/// the timeout as the only way to stop early.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Ctrl-C handler unavailable");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_cancellable_completes() {
        let value = run_cancellable(async { Ok(42) }, Some(Duration::from_secs(5)))
            .await
            .unwrap();
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn test_run_cancellable_times_out() {
        let work = async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(())
        };

        let err = run_cancellable(work, Some(Duration::from_millis(10)))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CodexError>(),
            Some(CodexError::Cancelled { .. })
        ));
    }

    #[tokio::test]
    async fn test_interrupted_waits_for_signal() {
        let waited = tokio::time::timeout(Duration::from_millis(10), interrupted()).await;
        assert!(waited.is_err());
    }

    #[tokio::test]
    async fn test_run_cancellable_passes_errors_through() {
        let work = async { Err::<(), _>(anyhow::anyhow!("discovery failed")) };

        let err = run_cancellable(work, None).await.unwrap_err();
        assert_eq!(err.to_string(), "discovery failed");
    }
}
