use anyhow::Result;
use clap::Parser;
use filesweep::api::client::SlackClient;
use filesweep::cli::Cli;
use filesweep::config::Config;
use filesweep::error::SweepError;
use filesweep::output::color::ColorWriter;
use filesweep::sweep;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Settings may live in a .env file next to where the job runs.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "filesweep=debug"
    } else {
        "filesweep=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_cli(&cli)?;

    let admin = SlackClient::with_base_url(&config.api_url, &config.admin_token)?;
    let poster = SlackClient::with_base_url(&config.api_url, &config.post_token)?;
    let mut console = ColorWriter::stdout(cli.no_color);

    match sweep::run(&config, &admin, &poster, &mut console).await {
        Ok(summary) => {
            tracing::info!(
                total = summary.total,
                channels = summary.channels.len(),
                "clean-up finished"
            );
            Ok(())
        }
        Err(SweepError::Slack(err)) => match err.hint() {
            Some(hint) => Err(anyhow::anyhow!("{}\n\n{}", err, hint)),
            None => Err(err.into()),
        },
        Err(err) => Err(err.into()),
    }
}
