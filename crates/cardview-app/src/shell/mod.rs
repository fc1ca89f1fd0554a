//! Line-oriented driver standing in for the WebView host.

mod command;
mod stdout;

pub use command::{parse_line, Command, Input, HELP};
pub use stdout::StdoutHost;

use std::io::Write;
use std::sync::Arc;

use cardview_bridge::{BridgeChannel, Envelope, EventSurface, HostEventTarget};
use cardview_common::format::mask_card_number;
use cardview_common::{Card, CardStatus};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::page::CardsPage;

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Drive `page` from `input` until EOF or `quit`.
///
/// Host messages are dispatched on a window surface the channel listens to;
/// the resulting envelopes are queued and applied before the next line.
/// Command feedback and `show` output go to `out`.
pub async fn run<R, W>(
    page: &mut CardsPage,
    channel: &BridgeChannel,
    input: R,
    out: &mut W,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let window = Arc::new(HostEventTarget::window());
    let document = Arc::new(HostEventTarget::document());
    let surfaces: Vec<Arc<dyn EventSurface>> = vec![window.clone(), document];

    let (inbound_tx, mut inbound_rx) = mpsc::unbounded_channel::<Envelope>();
    channel.on_message(move |envelope| {
        if inbound_tx.send(envelope.clone()).is_err() {
            debug!("shell stopped, inbound message dropped");
        }
    });
    let _subscription = channel.listen(&surfaces);

    let mut lines = input.lines();
    loop {
        tokio::select! {
            biased;

            Some(envelope) = inbound_rx.recv() => {
                page.handle_message(&envelope);
            }
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        warn!(error = %e, "failed to read shell input");
                        break;
                    }
                };
                match parse_line(&line) {
                    None => {}
                    Some(Ok(Input::Host(raw))) => {
                        let listeners = window.dispatch(raw);
                        debug!(listeners, "host message dispatched");
                    }
                    Some(Ok(Input::Command(command))) => {
                        if execute(page, command, out)? == Flow::Quit {
                            break;
                        }
                    }
                    Some(Err(e)) => writeln!(out, "error: {e}")?,
                }
            }
        }
    }

    channel.clear_callback();
    info!("shell finished");
    Ok(())
}

fn execute<W: Write>(
    page: &mut CardsPage,
    command: Command,
    out: &mut W,
) -> std::io::Result<Flow> {
    match command {
        Command::Tap(index) => page.tap(index),
        Command::Dot(index) => page.dot_click(index),
        Command::Settle(index) => match page.settle(index) {
            Some(_) => {
                if let Some(card) = page.selected_card() {
                    writeln!(out, "selected {}", card.id)?;
                }
            }
            None => writeln!(out, "carousel is not moving")?,
        },
        Command::Select(card_id) => page.select_card(&card_id),
        Command::Action(action) => {
            if !page.handle_action(action) {
                writeln!(out, "no card selected")?;
            }
        }
        Command::Cards(status) => {
            let store = page.store();
            let cards: Vec<&Card> = match status {
                None => store.cards().iter().collect(),
                Some(CardStatus::Active) => store.active_cards(),
                Some(status) => store.cards_by_status(status),
            };
            for card in cards {
                writeln!(
                    out,
                    "{}  {}  {}",
                    card.id,
                    mask_card_number(&card.last_four_digits),
                    card.status.label()
                )?;
            }
        }
        Command::Refresh => page.refresh(),
        Command::Show => {
            let json = serde_json::to_string(&page.view())
                .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize view: {e}\"}}"));
            writeln!(out, "{json}")?;
        }
        Command::Help => writeln!(out, "{HELP}")?,
        Command::Quit => return Ok(Flow::Quit),
    }
    out.flush()?;
    Ok(Flow::Continue)
}
