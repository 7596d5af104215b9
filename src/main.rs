use clap::Parser;
use http_check::cli::Cli;
use http_check::config::CheckConfig;
use http_check::dispatch::HttpDispatcher;
use http_check::logging::init_tracing;
use http_check::report::{KuberhealthyReporter, KuberhealthyWaiter, Reporter, SinkError};
use http_check::runner::Runner;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(&cli.logging_config()) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    // Failed checks still exit 0; only an undeliverable report is fatal.
    if let Err(e) = run(&cli).await {
        tracing::error!(error = %e, "Error when reporting to Kuberhealthy");
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<(), SinkError> {
    let reporter = KuberhealthyReporter::from_env()?;

    let dispatcher = match HttpDispatcher::new(cli.request_timeout()) {
        Ok(dispatcher) => dispatcher,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build HTTP client");
            return reporter
                .report_failure(vec![format!("failed to build HTTP client: {}", e)])
                .await;
        }
    };

    let runner = Runner::new(
        KuberhealthyWaiter::from_env(),
        reporter,
        dispatcher,
        cli.ready_timeout(),
    );
    let outcome = runner.run(CheckConfig::from_env()).await?;
    tracing::debug!(?outcome, "Run finished");

    Ok(())
}
