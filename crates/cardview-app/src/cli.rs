use cardview_bridge::TransportKind;
use clap::Parser;

/// Cardview: headless credit card carousel driven from a terminal.
///
/// Outbound bridge messages are written to stdout, one JSON envelope per
/// line. Lines read from stdin that start with `{` are delivered as host
/// messages; anything else is a shell command.
#[derive(Parser, Debug)]
#[command(name = "cardview", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level override (trace, debug, info, warn, error or a filter directive).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Override the simulated card loading delay.
    #[arg(long)]
    pub delay_ms: Option<u32>,

    /// Which native bridge the page should see.
    #[arg(long, default_value = "react-native")]
    pub transport: TransportKind,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_react_native() {
        let args = Args::parse_from(["cardview"]);
        assert_eq!(args.transport, TransportKind::ReactNative);
        assert!(args.config.is_none());
        assert!(args.delay_ms.is_none());
    }

    #[test]
    fn parses_all_flags() {
        let args = Args::parse_from([
            "cardview",
            "--config",
            "/tmp/cardview.toml",
            "--log-level",
            "debug",
            "--delay-ms",
            "0",
            "--transport",
            "webkit",
        ]);
        assert_eq!(args.config.as_deref(), Some("/tmp/cardview.toml"));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert_eq!(args.delay_ms, Some(0));
        assert_eq!(args.transport, TransportKind::Webkit);
    }

    #[test]
    fn rejects_unknown_transport() {
        assert!(Args::try_parse_from(["cardview", "--transport", "carrier-pigeon"]).is_err());
    }
}
