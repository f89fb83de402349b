use std::io::Write;
use std::sync::Arc;

use kanal::AsyncReceiver;
use tokio::sync::RwLock;
use tudien_config::Config;
use tudien_core::SessionState;
use tudien_ui::{Renderer, messages};

/// Messages from the session to the terminal
#[derive(Debug, Clone)]
pub enum ViewEvent {
    Render(SessionState),
    Notice(String),
}

pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<ViewEvent>,
    config: Arc<RwLock<Config>>,
) -> anyhow::Result<()> {
    let color = {
        let config = config.read().await;
        config
            .ui
            .color
            .unwrap_or_else(|| atty::is(atty::Stream::Stdout))
    };
    let renderer = Renderer::new(color);

    print_block(&renderer.header())?;
    print_block(messages::HELP)?;

    while let Ok(event) = app_to_ui_rx.recv().await {
        match event {
            ViewEvent::Render(state) => print_block(&renderer.render(&state))?,
            ViewEvent::Notice(message) => print_block(&format!("{message}\n"))?,
        }
    }

    tracing::debug!("UI channel closed");
    Ok(())
}

fn print_block(text: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{text}")?;
    stdout.flush()
}
