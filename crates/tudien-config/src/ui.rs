use std::env;

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct UiConfig {
    /// Force ANSI colours on or off; `None` follows the terminal
    pub color: Option<bool>,
}

impl UiConfig {
    pub fn new() -> Self {
        let color = env::var("UI_COLOR").ok().and_then(|v| v.parse().ok());

        Self { color }
    }
}
