use std::io::BufRead;

use kanal::AsyncSender;
use tokio_util::sync::CancellationToken;
use tudien_types::SessionCommand;
use tudien_ui::messages;

use crate::ui::ViewEvent;

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(SessionCommand),
    Blank,
    Unknown(String),
}

/// Parse a line typed at the prompt. Anything not starting with `:` is a
/// word to look up.
pub fn parse_command(line: &str) -> Input {
    let line = line.trim();
    if line.is_empty() {
        return Input::Blank;
    }

    let Some(rest) = line.strip_prefix(':') else {
        return Input::Command(SessionCommand::Submit(line.to_string()));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    let index = || arg.parse::<usize>().ok();

    let command = match name {
        "clear" | "c" => Some(SessionCommand::Clear),
        "tab" | "t" => index().map(SessionCommand::SelectTab),
        "pron" | "p" => index().map(SessionCommand::TogglePronunciation),
        "suggest" | "s" => index().map(SessionCommand::SelectSuggestion),
        "related" | "r" if !arg.is_empty() => {
            Some(SessionCommand::SelectRelated(arg.to_string()))
        }
        "play" => Some(SessionCommand::PlayAudio),
        "url" => Some(SessionCommand::ShowUrl),
        "quit" | "q" => Some(SessionCommand::Quit),
        _ => None,
    };

    match command {
        Some(command) => Input::Command(command),
        None => Input::Unknown(line.to_string()),
    }
}

/// Read commands from stdin until EOF or cancellation.
///
/// Stdin is read on a plain thread so a pending read never holds up
/// runtime shutdown.
pub async fn input_io(
    command_tx: AsyncSender<SessionCommand>,
    app_to_ui_tx: AsyncSender<ViewEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let commands = command_tx.to_sync();
    let notices = app_to_ui_tx.to_sync();
    let reader_cancel = cancel.clone();

    std::thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                if reader_cancel.is_cancelled() {
                    return;
                }

                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        tracing::error!("Failed to read stdin: {}", e);
                        break;
                    }
                };

                match parse_command(&line) {
                    Input::Command(command) => {
                        if commands.send(command).is_err() {
                            return;
                        }
                    }
                    Input::Blank => {}
                    Input::Unknown(input) => {
                        tracing::debug!("Unknown command: {}", input);
                        let _ = notices.send(ViewEvent::Notice(messages::unknown_command(&input)));
                    }
                }
            }

            tracing::info!("Input closed");
            let _ = commands.send(SessionCommand::Quit);
        })?;

    cancel.cancelled().await;
    Ok(())
}
