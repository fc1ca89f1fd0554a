//! Host handle that prints envelopes for whoever drives the shell.

use std::io::Write;

use cardview_bridge::HostHandle;
use cardview_common::BridgeError;

/// Writes each posted message as one line on stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutHost;

impl HostHandle for StdoutHost {
    fn post_message(&self, message: &str) -> Result<(), BridgeError> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{message}")
            .and_then(|()| out.flush())
            .map_err(|e| BridgeError::Transport(format!("stdout: {e}")))
    }
}
