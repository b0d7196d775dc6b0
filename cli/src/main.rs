mod config;
mod logging;

use std::num::NonZeroU64;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::CommandFactory;
use clap::FromArgMatches;
use clap::Parser;
use translatica_tui::HttpTranslationClient;
use translatica_tui::SystemClipboard;
use translatica_tui::TranslaticaTui;

use crate::config::ConfigStore;
use crate::config::FileConfig;
use crate::config::Settings;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Translate English text to Spanish from a terminal card"
)]
struct Cli {
    /// Base URL of the translation service. Requests go to `<endpoint>/translate`.
    #[arg(long, env = "TRANSLATICA_ENDPOINT")]
    endpoint: Option<String>,

    /// Seconds to wait for the translation service before reporting a connection failure
    /// (must be >= 1).
    #[arg(long = "timeout-secs")]
    timeout_secs: Option<NonZeroU64>,

    /// Read settings from this file instead of `~/.translatica/config.toml`.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn parse_cli() -> Cli {
    let matches = Cli::command()
        .version(translatica_tui::TRANSLATICA_VERSION)
        .get_matches();
    Cli::from_arg_matches(&matches).unwrap_or_else(|err| err.exit())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = parse_cli();
    let translatica_home = dirs::home_dir().map(|home| config::translatica_home(&home));

    let _log_guard = match translatica_home.as_ref() {
        Some(home) => match logging::init_file_logging(&home.join("log")) {
            Ok(guard) => Some(guard),
            Err(err) => {
                eprintln!("warning: failed to initialize logging: {err:#}");
                None
            }
        },
        None => None,
    };

    let config_store = match cli.config {
        Some(path) => Some(ConfigStore::new(path)),
        None => match ConfigStore::new_default() {
            Ok(store) => Some(store),
            Err(err) => {
                tracing::warn!("using default settings: {err:#}");
                None
            }
        },
    };
    let file_config = match config_store {
        Some(store) => store.load().unwrap_or_else(|err| {
            tracing::warn!(path = %store.path().display(), "using default settings: {err:#}");
            FileConfig::default()
        }),
        None => FileConfig::default(),
    };

    let settings = Settings::resolve(cli.endpoint, cli.timeout_secs, file_config);
    let client = HttpTranslationClient::new(&settings.endpoint, settings.request_timeout)
        .context("build translation client")?;
    tracing::info!(
        url = %client.translate_url(),
        timeout_secs = settings.request_timeout.as_secs(),
        "starting translatica"
    );

    let mut ui = TranslaticaTui::new()?;
    ui.run(Arc::new(client), SystemClipboard::default()).await
}
