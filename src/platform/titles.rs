//! Page title swap
//!
//! The page carries two headings: the regular title and a win banner. A win
//! fades the first out and the second in; a restart puts them back.

use crate::sim::GamePhase;

/// Element id of the regular page title
pub const ORIGINAL_TITLE_ID: &str = "orig-title";
/// Element id of the win banner
pub const WIN_TITLE_ID: &str = "new-title";

/// CSS classes for the two headings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleClasses {
    pub original: &'static str,
    pub win: &'static str,
}

pub fn title_classes(phase: GamePhase) -> TitleClasses {
    match phase {
        GamePhase::Win => TitleClasses {
            original: "fadeOut",
            win: "fadeIn",
        },
        GamePhase::Idle | GamePhase::Playing | GamePhase::GameOver => TitleClasses {
            original: "",
            win: "",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::{GameEvent, GameState, tick};
    use glam::Vec2;

    #[test]
    fn test_banner_only_while_celebrating() {
        assert_eq!(title_classes(GamePhase::Win).win, "fadeIn");
        assert_eq!(title_classes(GamePhase::Win).original, "fadeOut");
        for phase in [GamePhase::Idle, GamePhase::Playing, GamePhase::GameOver] {
            assert_eq!(title_classes(phase).win, "");
            assert_eq!(title_classes(phase).original, "");
        }
    }

    #[test]
    fn test_banner_follows_win_and_restart() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config).unwrap();
        state.phase = GamePhase::Playing;

        // One block left, ball about to knock it out from below
        for block in state.blocks.iter_mut().skip(1) {
            block.active = false;
        }
        state.active_blocks = 1;
        let block = state.blocks[0].clone();
        state.ball.pos = Vec2::new(block.center().x, block.bottom_y + 6.0);
        state.ball.vel = Vec2::new(0.0, -5.0);
        assert_eq!(title_classes(state.phase).win, "");

        let events = tick(&mut state, &config, 1000.0 / 60.0);
        assert!(events.contains(&GameEvent::Won));
        assert_eq!(title_classes(state.phase).win, "fadeIn");

        // Restart lays out a fresh Idle game
        let state = GameState::new(&config).unwrap();
        assert_eq!(title_classes(state.phase).original, "");
    }
}
