//! Keyboard mapping
//!
//! Keys are DOM `KeyboardEvent.key` names.

use crate::session::InputCommand;

/// Map a key transition to a command. Start only fires on key down.
pub fn command_for_key(key: &str, pressed: bool) -> Option<InputCommand> {
    match (key, pressed) {
        ("ArrowLeft", true) => Some(InputCommand::MoveLeftDown),
        ("ArrowLeft", false) => Some(InputCommand::MoveLeftUp),
        ("ArrowRight", true) => Some(InputCommand::MoveRightDown),
        ("ArrowRight", false) => Some(InputCommand::MoveRightUp),
        (" " | "Enter", true) => Some(InputCommand::StartOrRestart),
        _ => None,
    }
}

/// Whether the browser's default action (scrolling) should be suppressed
pub fn is_game_key(key: &str) -> bool {
    matches!(key, "ArrowLeft" | "ArrowRight" | " " | "Enter")
}
