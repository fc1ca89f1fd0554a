mod cli;
mod loader;
mod page;
mod shell;
mod store;

use std::path::Path;
use std::sync::Arc;

use cardview_bridge::{BridgeChannel, BridgeSettings, HostBridges, HostHandle, TransportKind};
use cardview_config::{CardviewConfig, LogLevel};
use tokio::io::BufReader;
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;

use crate::loader::MockCardLoader;
use crate::page::CardsPage;
use crate::shell::StdoutHost;

/// Install the subscriber. Logs go to stderr so stdout carries only
/// bridge traffic and shell output.
fn init_logging(cli_level: Option<&str>, config_level: LogLevel) {
    let directive: Directive = cli_level
        .and_then(|raw| match raw.parse() {
            Ok(directive) => Some(directive),
            Err(e) => {
                eprintln!("ignoring invalid --log-level '{raw}': {e}");
                None
            }
        })
        .or_else(|| config_level.directive().parse().ok())
        .unwrap_or_else(|| LevelFilter::INFO.into());

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();
}

fn host_bridges(kind: TransportKind, webkit_handler: &str) -> HostBridges {
    let handle: Arc<dyn HostHandle> = Arc::new(StdoutHost);
    match kind {
        TransportKind::Webkit => HostBridges::webkit(webkit_handler, handle),
        other => HostBridges::for_kind(other, handle),
    }
}

async fn run(config: CardviewConfig, transport: TransportKind) -> cardview_common::Result<()> {
    let settings = BridgeSettings {
        webkit_handler: config.bridge.webkit_handler.clone(),
        log_fallback: config.bridge.log_fallback,
    };
    let bridges = host_bridges(transport, &settings.webkit_handler);
    let channel = BridgeChannel::with_settings(bridges, settings);
    tracing::info!(transport = %channel.transport().kind(), "bridge ready");

    let mut page = CardsPage::new(channel.clone(), &config.carousel);
    let loader = MockCardLoader::from_config(&config.loader);
    if let Err(e) = page.mount(&loader).await {
        tracing::warn!("Page mounted without cards: {e}");
    }

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    shell::run(&mut page, &channel, stdin, &mut stdout).await?;
    Ok(())
}

fn main() {
    let args = cli::parse();

    let loaded = cardview_config::load_config(args.config.as_deref().map(Path::new));
    let config_level = loaded
        .as_ref()
        .map(|config| config.logging.level)
        .unwrap_or_default();
    init_logging(args.log_level.as_deref(), config_level);

    tracing::info!("Cardview v{} starting...", env!("CARGO_PKG_VERSION"));

    let mut config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        CardviewConfig::default()
    });
    if let Some(delay_ms) = args.delay_ms {
        config.loader.delay_ms = delay_ms;
    }
    tracing::debug!("Effective config: {}", cardview_config::config_to_json(&config));

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to start tokio runtime: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(run(config, args.transport)) {
        tracing::error!("Shell error: {e}");
        std::process::exit(1);
    }
    tracing::info!("Shutdown complete");
}
