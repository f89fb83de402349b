use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;
use tudien_core::LocationBar;
use tudien_types::SessionCommand;
use tudien_ui::messages;

use crate::audio::AudioPlayer;
use crate::session::SearchSession;
use crate::state::AppState;
use crate::ui::ViewEvent;

/// App's main loop: the only place the session is touched
pub async fn event_loop<L: LocationBar + 'static>(
    state: Arc<AppState>,
    mut session: SearchSession<L>,
    ui_to_app_rx: AsyncReceiver<SessionCommand>,
    app_to_ui_tx: AsyncSender<ViewEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let audio = {
        let config = state.config.read().await;
        AudioPlayer::new(config.audio.clone())
    };

    let completions = session.completions();

    session.init_from_url();
    publish(&session, &app_to_ui_tx).await?;

    tracing::info!("Event loop started at {}", session.location().href());
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Event loop cancelled");
                break;
            }
            command = ui_to_app_rx.recv() => {
                let command = command?;
                tracing::debug!("Command: {:?}", command);
                if !handle_command(&mut session, &audio, &app_to_ui_tx, command).await? {
                    break;
                }
            }
            completion = completions.recv() => {
                if session.apply(completion?) {
                    publish(&session, &app_to_ui_tx).await?;
                }
            }
        }
    }

    Ok(())
}

/// Returns false when the user asked to quit
async fn handle_command<L: LocationBar>(
    session: &mut SearchSession<L>,
    audio: &AudioPlayer,
    app_to_ui_tx: &AsyncSender<ViewEvent>,
    command: SessionCommand,
) -> anyhow::Result<bool> {
    let changed = match command {
        SessionCommand::Submit(input) => session.submit(&input),
        SessionCommand::SelectRelated(word) => session.select_related(&word),
        SessionCommand::SelectSuggestion(index) => {
            let changed = session.select_suggestion(index);
            if !changed {
                notice(app_to_ui_tx, messages::no_such_item(index)).await?;
            }
            changed
        }
        SessionCommand::Clear => {
            session.clear();
            true
        }
        SessionCommand::SelectTab(index) => {
            let changed = session.select_tab(index);
            if !changed {
                notice(app_to_ui_tx, messages::no_such_item(index)).await?;
            }
            changed
        }
        SessionCommand::TogglePronunciation(index) => {
            let changed = session.toggle_pronunciation_panel(index);
            if !changed {
                notice(app_to_ui_tx, messages::no_such_item(index)).await?;
            }
            changed
        }
        SessionCommand::PlayAudio => {
            match session.active_audio() {
                Some(url) => audio.play(url.to_string()),
                None => notice(app_to_ui_tx, messages::NO_AUDIO.to_string()).await?,
            }
            false
        }
        SessionCommand::ShowUrl => {
            notice(app_to_ui_tx, session.location().href()).await?;
            false
        }
        SessionCommand::Quit => {
            tracing::info!("Quit requested");
            return Ok(false);
        }
    };

    if changed {
        publish(session, app_to_ui_tx).await?;
    }
    Ok(true)
}

async fn publish<L: LocationBar>(
    session: &SearchSession<L>,
    app_to_ui_tx: &AsyncSender<ViewEvent>,
) -> anyhow::Result<()> {
    app_to_ui_tx
        .send(ViewEvent::Render(session.state().clone()))
        .await?;
    Ok(())
}

async fn notice(app_to_ui_tx: &AsyncSender<ViewEvent>, message: String) -> anyhow::Result<()> {
    app_to_ui_tx.send(ViewEvent::Notice(message)).await?;
    Ok(())
}
