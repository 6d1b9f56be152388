use std::sync::Arc;

use anyhow::{Context, Result, bail};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::warn;

use paws_core::domain::{ImageRecord, SessionEvent};
use paws_core::observability::init_tracing;
use paws_core::ports::ChannelEventSink;
use paws_core::{AppBuilder, CardBounds, PawsApp, PawsConfig, Screen};

/// Card width assumed by `like` / `dislike` when they are sent as clicks.
const CARD_WIDTH: f64 = 300.0;

const HELP: &str = "\
commands:
  start                      begin swiping (loads the deck)
  like | dislike             click the right / left half of the card
  swipe <start> <end>        drag from start to end in one go
  press <x> | move <x> | release
                             drag step by step
  click <x> <left> <width>   click at x on a card spanning [left, left+width]
  status                     print the current state as JSON
  reset                      back to the start screen
  help | quit";

/// 入力 1 行分のコマンド
#[derive(Debug, PartialEq)]
enum Command {
    Start,
    Like,
    Dislike,
    Swipe(f64, f64),
    Press(f64),
    Move(f64),
    Release,
    Click(f64, CardBounds),
    Status,
    Reset,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command> {
    let mut parts = line.split_whitespace();
    let Some(word) = parts.next() else {
        bail!("empty command");
    };
    let args: Vec<f64> = parts
        .map(|p| p.parse::<f64>().with_context(|| format!("not a number: {p}")))
        .collect::<Result<_>>()?;

    let command = match (word, args.as_slice()) {
        ("start", []) => Command::Start,
        ("like", []) => Command::Like,
        ("dislike", []) => Command::Dislike,
        ("swipe", [start, end]) => Command::Swipe(*start, *end),
        ("press", [x]) => Command::Press(*x),
        ("move", [x]) => Command::Move(*x),
        ("release", []) => Command::Release,
        ("click", [x, left, width]) => Command::Click(*x, CardBounds::new(*left, *width)),
        ("status", []) => Command::Status,
        ("reset", []) => Command::Reset,
        ("help", []) => Command::Help,
        ("quit" | "exit", []) => Command::Quit,
        _ => bail!("unknown command: {line}"),
    };
    Ok(command)
}

/// Returns false when the user asked to quit.
async fn run_command(app: &mut PawsApp, command: Command) -> Result<bool> {
    let bounds = CardBounds::new(0.0, CARD_WIDTH);
    match command {
        Command::Start => {
            if app.engine().screen() == Screen::Start {
                println!("Loading cats...");
            }
            app.begin().await;
        }
        Command::Like => {
            app.on_point_select(CARD_WIDTH, bounds);
        }
        Command::Dislike => {
            app.on_point_select(0.0, bounds);
        }
        Command::Swipe(start, end) => {
            app.on_gesture_start(start);
            app.on_gesture_move(end);
            app.on_gesture_end();
        }
        Command::Press(x) => app.on_gesture_start(x),
        Command::Move(x) => {
            app.on_gesture_move(x);
            println!("feedback: {:?}", app.engine().feedback());
        }
        Command::Release => {
            app.on_gesture_end();
        }
        Command::Click(x, card) => {
            app.on_point_select(x, card);
        }
        Command::Status => {
            println!("{}", serde_json::to_string_pretty(&app.status())?);
        }
        Command::Reset => app.on_reset(),
        Command::Help => println!("{HELP}"),
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

fn show_card(index: usize, total: usize, record: &ImageRecord) {
    let tags = if record.tags.is_empty() {
        "-".to_string()
    } else {
        record.tags.join(", ")
    };
    println!("[{}/{}] {} ({})", index + 1, total, record.url, tags);
}

/// Presentation 側: イベントを受けて画面を描く
fn render_events(app: &PawsApp, rx: &mut mpsc::UnboundedReceiver<SessionEvent>) {
    while let Ok(event) = rx.try_recv() {
        match event {
            SessionEvent::Began { session_id, .. } => println!("session {session_id}"),
            SessionEvent::DeckInstalled { len, .. } => println!("{len} cats loaded"),
            SessionEvent::Decided { decision, .. } => println!("{decision:?}!"),
            SessionEvent::Cancelled { .. } => println!("(card snaps back)"),
            SessionEvent::SummaryReady { .. } => {
                let summary = app.engine().summary();
                println!("Your Favorite Kitties!");
                println!("{}", summary.headline());
                println!("{}", summary.message);
                for record in app.engine().liked() {
                    println!("  {} ({})", record.url, record.tags.join(", "));
                }
                println!("type `reset` to try again");
            }
            SessionEvent::Reset => println!("Swipe right to like a kitty, left to dislike!"),
        }
    }

    if let Some(record) = app.engine().current_record() {
        let total = app.engine().deck().map_or(0, |d| d.len());
        show_card(app.engine().cursor(), total, record);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = PawsConfig::load().context("loading configuration")?;
    init_tracing(&config.log.filter);

    let (sink, mut rx) = ChannelEventSink::new();
    let mut app = AppBuilder::new(config)
        .http_source()?
        .event_sink(Arc::new(sink))
        .build()?;

    println!("Paws & Preferences");
    println!("Swipe right to like a kitty, left to dislike!");
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(e) => {
                warn!(error = %format!("{e:#}"), "bad command; type `help`");
                continue;
            }
        };
        if !run_command(&mut app, command).await? {
            break;
        }
        render_events(&app, &mut rx);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!(parse_command("swipe 10 200").unwrap(), Command::Swipe(10.0, 200.0));
        assert_eq!(
            parse_command("click 250 0 300").unwrap(),
            Command::Click(250.0, CardBounds::new(0.0, 300.0))
        );
        assert_eq!(parse_command("quit").unwrap(), Command::Quit);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_command("swipe 10").is_err());
        assert!(parse_command("press left").is_err());
        assert!(parse_command("dance").is_err());
    }
}
