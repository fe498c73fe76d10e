//! Game simulation modules

pub mod ai;
pub mod combat;
pub mod fighter;
pub mod r#match;
pub mod physics;
pub mod snapshot;

pub use r#match::{GameMatch, MatchController, MatchHandle, MatchState, MatchStatus};
pub use snapshot::{FighterSnapshot, MatchSnapshot};

use serde::{Deserialize, Serialize};

/// Match mode picked on the mode-select screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    SinglePlayer,
    TwoPlayer,
}

/// User intents emitted by the menu/UI collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchIntent {
    StartMatch,
    SelectMode(GameMode),
    ResetToMenu,
    Restart,
    Pause,
    Resume,
}
