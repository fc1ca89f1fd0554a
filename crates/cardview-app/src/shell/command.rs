//! Parsing of stdin lines into host messages or shell commands.

use std::str::FromStr;

use cardview_common::{CardActionType, CardStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Tap(usize),
    /// Drag release toward an index, or finish the pending scroll.
    Settle(Option<usize>),
    Dot(usize),
    Select(String),
    Action(CardActionType),
    /// List cards, optionally filtered by status.
    Cards(Option<CardStatus>),
    Refresh,
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "commands: tap <i> | settle [i] | dot <i> | select <card-id> | \
action <name> | cards [status] | refresh | show | help | quit; lines starting with '{' are host messages";

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let name = parts.next().ok_or_else(|| "empty command".to_string())?;
        let arg = parts.next();
        if parts.next().is_some() {
            return Err(format!("too many arguments for '{name}'"));
        }

        let index = |arg: Option<&str>| -> Result<usize, String> {
            let raw = arg.ok_or_else(|| format!("'{name}' needs an index"))?;
            raw.parse()
                .map_err(|_| format!("'{raw}' is not a valid index"))
        };

        match name {
            "tap" => index(arg).map(Self::Tap),
            "dot" => index(arg).map(Self::Dot),
            "settle" => match arg {
                Some(_) => index(arg).map(|i| Self::Settle(Some(i))),
                None => Ok(Self::Settle(None)),
            },
            "select" => arg
                .map(|id| Self::Select(id.to_string()))
                .ok_or_else(|| "'select' needs a card id".to_string()),
            "action" => {
                let raw = arg.ok_or_else(|| "'action' needs a name".to_string())?;
                CardActionType::from_name(raw)
                    .map(Self::Action)
                    .ok_or_else(|| format!("unknown action '{raw}'"))
            }
            "cards" => match arg {
                None => Ok(Self::Cards(None)),
                Some(raw) => parse_status(raw)
                    .map(|status| Self::Cards(Some(status)))
                    .ok_or_else(|| format!("unknown status '{raw}'")),
            },
            "refresh" => Ok(Self::Refresh),
            "show" => Ok(Self::Show),
            "help" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(format!("unknown command '{other}'")),
        }
    }
}

fn parse_status(raw: &str) -> Option<CardStatus> {
    match raw {
        "active" => Some(CardStatus::Active),
        "blocked" => Some(CardStatus::Blocked),
        "expired" => Some(CardStatus::Expired),
        "pending" => Some(CardStatus::Pending),
        _ => None,
    }
}

/// One line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Raw text to deliver on the window surface.
    Host(String),
    Command(Command),
}

/// Classify a line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Option<Result<Input, String>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with('{') {
        return Some(Ok(Input::Host(trimmed.to_string())));
    }
    Some(trimmed.parse().map(Input::Command))
}
