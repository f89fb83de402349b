use anyhow::Context;
use tokio::process::Command;
use tudien_config::audio::AudioConfig;

/// Plays pronunciation audio through an external player
#[derive(Clone)]
pub struct AudioPlayer {
    config: AudioConfig,
}

impl AudioPlayer {
    pub fn new(config: AudioConfig) -> Self {
        Self { config }
    }

    /// Fire and forget; failures are only logged
    pub fn play(&self, url: String) {
        let player = self.clone();
        tokio::spawn(async move {
            if let Err(e) = player.play_and_wait(&url).await {
                tracing::warn!("Audio playback failed for {}: {:#}", url, e);
            }
        });
    }

    pub async fn play_and_wait(&self, url: &str) -> anyhow::Result<()> {
        if !self.config.enabled {
            tracing::debug!("Audio disabled, skipping {}", url);
            return Ok(());
        }

        tracing::debug!("Playing {} with {}", url, self.config.player);
        let status = Command::new(&self.config.player)
            .args(&self.config.player_args)
            .arg(url)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()
            .await
            .with_context(|| format!("Failed to launch audio player '{}'", self.config.player))?;

        anyhow::ensure!(status.success(), "Audio player exited with {}", status);
        Ok(())
    }
}
