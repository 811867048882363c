//! Line-oriented driver
//!
//! Each input line is one user interaction. Wall-clock time is fed to the
//! storefront before every line, and after a chat message the loop waits until
//! the assistant's reply has been shown.

use std::{
    io::{self, BufRead, Write},
    thread,
    time::{Duration, Instant},
};

use kiosk::{
    render::{NotificationChannel, Renderer},
    storefront::{Command, Storefront},
};
use thiserror::Error;
use tracing::debug;

const HELP: &str = "\
commands:
  tab <id>              show a menu tab
  add <n>               add product number <n> from the current tab
  add <name> <price>    add a product by name and displayed price
  chat                  open or close the order assistant
  chat <message>        ask the order assistant something
  confirm               confirm the order
  cancel                cancel the order
  wait <ms>             let time pass
  help                  show this help
  quit                  leave";

/// Something the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A storefront command.
    Run(Command),

    /// Let time pass.
    Wait(Duration),

    /// Print usage.
    Help,

    /// Blank line.
    Nothing,

    /// Leave the loop.
    Quit,
}

/// A line that could not be understood.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The first word is not a command.
    #[error("unknown command {0:?}, try `help`")]
    UnknownCommand(String),

    /// The command needs an argument it did not get.
    #[error("usage: {0}")]
    Usage(&'static str),

    /// A number was expected.
    #[error("not a number: {0:?}")]
    NotANumber(String),
}

/// Parse one input line.
pub fn parse(line: &str) -> Result<Action, ParseError> {
    let line = line.trim();

    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));

    match word.to_lowercase().as_str() {
        "" => Ok(Action::Nothing),
        "tab" if rest.is_empty() => Err(ParseError::Usage("tab <id>")),
        "tab" => Ok(Action::Run(Command::SelectTab(rest.to_string()))),
        "add" => parse_add(rest),
        "chat" if rest.is_empty() => Ok(Action::Run(Command::ToggleChat)),
        "chat" => Ok(Action::Run(Command::SendChatMessage(rest.to_string()))),
        "confirm" => Ok(Action::Run(Command::ConfirmOrder)),
        "cancel" => Ok(Action::Run(Command::CancelOrder)),
        "wait" => rest
            .parse::<u64>()
            .map(|ms| Action::Wait(Duration::from_millis(ms)))
            .map_err(|_err| ParseError::NotANumber(rest.to_string())),
        "help" => Ok(Action::Help),
        "quit" | "exit" => Ok(Action::Quit),
        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}

fn parse_add(rest: &str) -> Result<Action, ParseError> {
    const USAGE: &str = "add <n> | add <name> <price>";

    if rest.is_empty() {
        return Err(ParseError::Usage(USAGE));
    }

    match rest.rsplit_once(char::is_whitespace) {
        Some((name, price)) => Ok(Action::Run(Command::AddToOrder {
            name: name.trim().to_string(),
            price: price.to_string(),
        })),
        None => {
            let position = rest
                .parse::<usize>()
                .map_err(|_err| ParseError::NotANumber(rest.to_string()))?;

            let index = position.checked_sub(1).ok_or(ParseError::Usage(USAGE))?;

            Ok(Action::Run(Command::AddFromMenu(index)))
        }
    }
}

/// Read lines from `input` until it ends or the user quits.
///
/// # Errors
///
/// Returns an error if reading input or writing the prompt fails.
pub fn run<R, N>(
    storefront: &mut Storefront<R, N>,
    input: impl BufRead,
    mut out: impl Write,
) -> io::Result<()>
where
    R: Renderer,
    N: NotificationChannel,
{
    let started = Instant::now();

    writeln!(out, "{HELP}")?;
    prompt(&mut out)?;

    for line in input.lines() {
        let line = line?;

        storefront.advance_to(started.elapsed());

        match parse(&line) {
            Ok(Action::Run(command)) => {
                if let Err(error) = storefront.dispatch(command) {
                    debug!(%error, "command did not apply");
                }

                settle(storefront, started);
            }
            Ok(Action::Wait(duration)) => {
                thread::sleep(duration);
                storefront.advance_to(started.elapsed());
            }
            Ok(Action::Help) => writeln!(out, "{HELP}")?,
            Ok(Action::Nothing) => {}
            Ok(Action::Quit) => break,
            Err(error) => writeln!(out, "{error}")?,
        }

        prompt(&mut out)?;
    }

    Ok(())
}

fn prompt(out: &mut impl Write) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}

/// Wait for outstanding assistant replies to be shown.
fn settle<R, N>(storefront: &mut Storefront<R, N>, started: Instant)
where
    R: Renderer,
    N: NotificationChannel,
{
    while storefront.pending_replies() > 0 {
        let Some(deadline) = storefront.next_deadline() else {
            break;
        };

        thread::sleep(deadline.saturating_sub(started.elapsed()));
        storefront.advance_to(started.elapsed().max(deadline));
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use kiosk::{catalog::Catalog, config::StorefrontConfig, render::NoopRenderer};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_navigation_and_cart_commands() {
        assert_eq!(
            parse("tab milktea"),
            Ok(Action::Run(Command::SelectTab("milktea".to_string())))
        );
        assert_eq!(parse("add 2"), Ok(Action::Run(Command::AddFromMenu(1))));
        assert_eq!(parse("CONFIRM"), Ok(Action::Run(Command::ConfirmOrder)));
        assert_eq!(parse(" cancel "), Ok(Action::Run(Command::CancelOrder)));
    }

    #[test]
    fn parses_add_by_name_and_price() {
        assert_eq!(
            parse("add Milk Tea ₱60"),
            Ok(Action::Run(Command::AddToOrder {
                name: "Milk Tea".to_string(),
                price: "₱60".to_string(),
            }))
        );
    }

    #[test]
    fn parses_chat() {
        assert_eq!(parse("chat"), Ok(Action::Run(Command::ToggleChat)));
        assert_eq!(
            parse("chat What is my order total?"),
            Ok(Action::Run(Command::SendChatMessage(
                "What is my order total?".to_string()
            )))
        );
    }

    #[test]
    fn parses_control_words() {
        assert_eq!(parse(""), Ok(Action::Nothing));
        assert_eq!(parse("help"), Ok(Action::Help));
        assert_eq!(parse("exit"), Ok(Action::Quit));
        assert_eq!(
            parse("wait 250"),
            Ok(Action::Wait(Duration::from_millis(250)))
        );
    }

    #[test]
    fn rejects_bad_lines() {
        assert_eq!(parse("tab"), Err(ParseError::Usage("tab <id>")));
        assert!(matches!(parse("add 0"), Err(ParseError::Usage(_))));
        assert_eq!(
            parse("add x"),
            Err(ParseError::NotANumber("x".to_string()))
        );
        assert_eq!(
            parse("wait soon"),
            Err(ParseError::NotANumber("soon".to_string()))
        );
        assert_eq!(
            parse("dance"),
            Err(ParseError::UnknownCommand("dance".to_string()))
        );
    }

    #[test]
    fn run_drives_storefront_until_quit() -> TestResult {
        let config = StorefrontConfig {
            chat_reply_delay_ms: 0,
            ..StorefrontConfig::default()
        };

        let mut storefront =
            Storefront::new(Catalog::bundled()?, config, NoopRenderer, NoopRenderer);

        let input = Cursor::new("tab milktea\nadd 1\nadd 1\nchat hello\nbogus\nquit\nadd 1\n");
        let mut out = Vec::new();

        run(&mut storefront, input, &mut out)?;

        let winter_melon = storefront.cart().get("Winter Melon").map(|line| line.quantity());

        assert_eq!(winter_melon, Some(2));
        assert_eq!(storefront.pending_replies(), 0);
        assert_eq!(storefront.chat().transcript().len(), 1);
        assert!(String::from_utf8(out)?.contains("unknown command \"bogus\""));

        Ok(())
    }
}
