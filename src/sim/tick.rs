//! Per-frame simulation step
//!
//! Advances a [`GameState`] by one frame. Positions move by a fixed amount
//! per frame; the elapsed time only feeds `running_time`, which drives the
//! cosmetic spin and the celebration timeline.

use glam::Vec2;

use super::collision::{Side, bounce, classify_circle_rect, paddle_deflection, percent_along};
use super::state::{Direction, GameEvent, GamePhase, GameState, Steer};
use crate::config::GameConfig;
use crate::consts::HEART_REST_ANGLE_DEG;

/// Spectator tilt while bobbing (degrees)
const ACTOR_BOB_SWING: f32 = -22.5;
const HEART_BOB_SWING: f32 = 22.5;

/// Advance the game state by one frame of `dt_ms` milliseconds.
///
/// Returns the events raised during the frame. `Idle` and `GameOver` do
/// not advance.
pub fn tick(state: &mut GameState, config: &GameConfig, dt_ms: f32) -> Vec<GameEvent> {
    match state.phase {
        GamePhase::Playing => step_playing(state, config, dt_ms),
        GamePhase::Win => {
            step_celebration(state, config, dt_ms);
            Vec::new()
        }
        GamePhase::Idle | GamePhase::GameOver => Vec::new(),
    }
}

/// Buffer a direction key press. Ignored outside `Playing`.
pub fn press(state: &mut GameState, config: &GameConfig, direction: Direction) {
    if state.phase != GamePhase::Playing {
        return;
    }
    let paddle_vx = match direction {
        Direction::Left => -config.paddle_step,
        Direction::Right => config.paddle_step,
    };
    state.pending_steer = Some(Steer {
        paddle_vx,
        lean: Some(direction),
    });
}

/// Buffer a direction key release.
///
/// Only stops the paddle if it is moving (or stopped) in the released
/// direction, so releasing a stale key does not cancel a newer press.
pub fn release(state: &mut GameState, direction: Direction) {
    if state.phase != GamePhase::Playing {
        return;
    }
    let vx = state.effective_paddle_vx();
    let matches = match direction {
        Direction::Left => vx <= 0.0,
        Direction::Right => vx >= 0.0,
    };
    if matches {
        state.pending_steer = Some(Steer {
            paddle_vx: 0.0,
            lean: None,
        });
    }
}

fn step_playing(state: &mut GameState, config: &GameConfig, dt_ms: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Buffered input
    if let Some(steer) = state.pending_steer.take() {
        state.paddle.vel.x = steer.paddle_vx;
        state.spectators.lean(steer.lean);
    }

    state.running_time += dt_ms;

    // Paddle first: the top face steers the ball, other faces just reflect
    let ball = &mut state.ball;
    match classify_circle_rect(ball.pos, ball.radius, &state.paddle) {
        Some(Side::Top) => {
            let along = percent_along(ball.pos.x, &state.paddle, config.paddle_width);
            ball.vel = paddle_deflection(ball.speed, along, config.paddle_angle_deg);
            events.push(GameEvent::PaddleHit {
                percent_along: along,
            });
        }
        Some(side) => ball.vel = bounce(ball.vel, side),
        None => {}
    }

    // Each block is checked once per frame against the ball
    for (index, block) in state.blocks.iter_mut().enumerate() {
        if !block.active {
            continue;
        }
        if let Some(side) = classify_circle_rect(ball.pos, ball.radius, block) {
            ball.vel = bounce(ball.vel, side);
            block.active = false;
            state.active_blocks -= 1;
            log::debug!("Block {} destroyed ({} left)", index, state.active_blocks);
            events.push(GameEvent::BlockDestroyed { index });
        }
    }

    // Walls reflect; touching a wall's top face (only the bottom wall's is
    // reachable) ends the game
    let mut lost = false;
    for wall in state.walls.iter() {
        if let Some(side) = classify_circle_rect(ball.pos, ball.radius, wall) {
            ball.vel = bounce(ball.vel, side);
            if side == Side::Top {
                lost = true;
            }
        }
    }

    // Keep the paddle between the walls
    let min_x = config.wall_width;
    let max_x = config.arena_width - config.wall_width;
    if state.paddle.left_x < min_x {
        state.paddle.set_left(min_x + 1.0);
        state.paddle.vel.x = 0.0;
    } else if state.paddle.right_x > max_x {
        state.paddle.set_right(max_x - 1.0);
        state.paddle.vel.x = 0.0;
    }

    // Integrate
    let total = state.total_blocks();
    state.spectators.puffin.track_progress(state.active_blocks, total);
    state.ball.integrate(state.running_time);
    for block in &mut state.blocks {
        block.integrate();
    }
    for wall in state.walls.iter_mut() {
        wall.integrate();
    }
    state.paddle.integrate();

    if lost {
        // Losing wins the tie against a simultaneous last block
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over after {:.0} ms with {} blocks left",
            state.running_time,
            state.active_blocks
        );
        events.push(GameEvent::GameOver);
    } else if state.active_blocks == 0 {
        state.phase = GamePhase::Win;
        log::info!("All {} blocks cleared in {:.0} ms", total, state.running_time);
        state.running_time = 0.0;
        events.push(GameEvent::Won);
    }

    events
}

/// Interpolate between two points: `t` of `to` plus `1 - t` of `from`
#[inline]
fn blend(from: f32, to: f32, t: f32) -> f32 {
    t * to + (1.0 - t) * from
}

fn step_celebration(state: &mut GameState, config: &GameConfig, dt_ms: f32) {
    state.running_time += dt_ms;

    let curve = config.ease_curve;
    let t = curve.ease(state.running_time / config.celebration_fade_ms);
    let fade = 1.0 - t;

    let w = config.arena_width;
    let canvas_h = config.canvas_height();
    let final_height = canvas_h / 7.0;
    let aw = config.actor_width;
    let ap = config.actor_padding;
    let floor_y = config.arena_height + 3.0 * ap;

    // Fade out the playfield
    for wall in state.walls.iter_mut() {
        wall.opacity = fade;
    }
    state.paddle.opacity = fade;
    state.ball.opacity = fade;

    let s = &mut state.spectators;
    s.left_sweat.active = false;
    s.right_sweat.active = false;

    // Panda to the top left, bunny to the bottom right, puffin to the middle
    s.panda.x = blend(w / 2.0 - aw / 2.0 - ap, final_height / 2.0 + 75.0, t);
    s.panda.y = blend(floor_y, 125.0, t);
    s.panda.height = blend(aw, final_height, t);

    s.bunny.x = blend(w / 2.0 + aw / 2.0 + ap, w - 50.0, t);
    s.bunny.y = blend(floor_y, canvas_h - final_height - 90.0, t);
    s.bunny.height = blend(aw, final_height, t);

    s.puffin.x = blend(w / 2.0, w / 2.0 + 20.0, t);
    s.puffin.y = blend(
        config.block_top_y + config.block_side,
        canvas_h / 2.0 - 30.0,
        t,
    );
    s.puffin.height = blend(
        config.block_rows.saturating_sub(1) as f32 * config.block_side,
        final_height,
        t,
    );

    s.left_heart.opacity = t;
    s.right_heart.opacity = t;

    // Then bob back and forth forever
    let delay = state.running_time - config.celebration_fade_ms;
    s.panda.angle = curve.ease_angle(delay, config.panda_bob_ms, 0.0, ACTOR_BOB_SWING);
    s.bunny.angle = curve.ease_angle(delay, config.bunny_bob_ms, 0.0, ACTOR_BOB_SWING);
    s.puffin.angle = curve.ease_angle(delay, config.puffin_bob_ms, 0.0, ACTOR_BOB_SWING);
    s.left_heart.angle = curve.ease_angle(
        delay,
        config.left_heart_bob_ms,
        HEART_REST_ANGLE_DEG,
        HEART_BOB_SWING,
    );
    s.right_heart.angle = curve.ease_angle(
        delay,
        config.right_heart_bob_ms,
        HEART_REST_ANGLE_DEG,
        HEART_BOB_SWING,
    );
}

/// Horizontal distance from the ball to the paddle center, for autopilots
pub fn paddle_offset(state: &GameState) -> f32 {
    let center: Vec2 = state.paddle.center();
    state.ball.pos.x - center.x
}
