//! Platform abstraction layer
//!
//! Translates browser input into [`crate::InputCommand`]s and decides how the
//! page headings reflect the game phase. Storage lives with
//! [`crate::GameConfig`].

pub mod keymap;
pub mod titles;

pub use keymap::command_for_key;
pub use titles::{TitleClasses, title_classes};
