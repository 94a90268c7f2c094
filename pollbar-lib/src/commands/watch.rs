use super::Host;
use super::common::{CommonArgs, init_logging};
use super::config::Config;
use super::terminal_display::TerminalDisplay;
use crate::Result;
use crate::poller::{FailureAction, HttpProgressSource, PollOutcome, ProgressPoller};
use camino::Utf8PathBuf;
use clap::Parser;
use std::io::{Write, stderr};

#[derive(Parser, Debug)]
pub struct WatchArgs {
    /// Progress endpoint to poll (overrides `url` from the configuration file)
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Path to configuration file (default is `pollbar.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// What to do when a progress query fails (overrides `on_failure` from the configuration file)
    #[arg(long, value_name = "MODE")]
    pub on_failure: Option<FailureAction>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Poll the progress endpoint until the task completes or polling stalls
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the HTTP client cannot be built, or polling stalls
pub async fn watch<H: Host>(host: &mut H, args: &WatchArgs) -> Result<()> {
    init_logging(args.common.log_level);

    let config = effective_config(args)?;
    let source = HttpProgressSource::new(&config.url, config.request_timeout)?;
    log::info!("watching {} every {}ms", source.url(), config.interval.as_millis());

    let mut poller = ProgressPoller::new(source)
        .with_interval(config.interval)
        .with_failure_policy(config.failure_policy());

    let use_colors = args.common.color.use_colors(&stderr());
    let mut display = TerminalDisplay::new(host.output(), config.success_message.as_str(), use_colors)?;

    let outcome = poller.start(&mut display).await;
    if !outcome.is_completed() {
        display.freeze();
    }
    drop(display);

    match outcome {
        PollOutcome::Completed { .. } => Ok(()),
        PollOutcome::Stalled { error, .. } => {
            if config.on_failure != FailureAction::Stall {
                let _ = writeln!(host.error(), "Progress polling stopped: {error:#}");
            }
            host.exit(1);
            Err(error)
        }
    }
}

/// Load the configuration and apply command-line overrides on top of it
fn effective_config(args: &WatchArgs) -> Result<Config> {
    let mut config = Config::load(&Utf8PathBuf::from("."), args.config.as_ref())?;

    if let Some(url) = &args.url {
        config.url.clone_from(url);
    }

    if let Some(on_failure) = args.on_failure {
        config.on_failure = on_failure;
    }

    config.validate()?;
    Ok(config)
}
