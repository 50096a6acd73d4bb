use serde::{Deserialize, Serialize};
use tictactoe_common::config::Validate;

pub const MAX_BOT_DELAY_MS: u64 = 5000;

/// Presentation pause before the bot answers. Has no effect on which move
/// it picks.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct BotConfig {
    pub delay_ms: u64,
}

impl Validate for BotConfig {
    fn validate(&self) -> Result<(), String> {
        if self.delay_ms > MAX_BOT_DELAY_MS {
            return Err(format!(
                "bot delay_ms must not exceed {} (got {})",
                MAX_BOT_DELAY_MS, self.delay_ms
            ));
        }
        Ok(())
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self { delay_ms: 500 }
    }
}
