//! Arrow-key polling.

use crate::audio::{AudioSink, Sfx};
use crate::config::GameConfig;

use super::PlayerState;

/// Arrow keys held this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl KeyState {
    /// Update from a DOM `KeyboardEvent.key` value. Returns false for keys
    /// the game doesn't use.
    pub fn set(&mut self, key: &str, pressed: bool) -> bool {
        let slot = match key {
            "ArrowLeft" | "Left" => &mut self.left,
            "ArrowRight" | "Right" => &mut self.right,
            "ArrowUp" | "Up" => &mut self.up,
            "ArrowDown" | "Down" => &mut self.down,
            _ => return false,
        };
        *slot = pressed;
        true
    }
}

/// Player sprite animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerAnim {
    Left,
    Turn,
    Right,
}

impl PlayerAnim {
    /// Sprite sheet frame at `now` ms; running loops four frames at 10 fps.
    pub fn frame(self, now: f64) -> u32 {
        let step = (now / 100.0).max(0.0) as u32 % 4;
        match self {
            PlayerAnim::Left => step,
            PlayerAnim::Turn => 4,
            PlayerAnim::Right => 5 + step,
        }
    }
}

pub fn poll(player: &mut PlayerState, keys: KeyState, cfg: &GameConfig, audio: &mut dyn AudioSink) {
    if keys.left {
        player.body.vx = -cfg.player_speed;
        player.anim = PlayerAnim::Left;
    } else if keys.right {
        player.body.vx = cfg.player_speed;
        player.anim = PlayerAnim::Right;
    } else {
        player.body.vx = 0.0;
        player.anim = PlayerAnim::Turn;
    }

    if keys.up {
        if player.grounded() {
            player.body.vy = -cfg.jump_velocity;
            player.can_double_jump = true;
            player.has_double_jumped = false;
            audio.play(Sfx::Jump);
        } else if player.can_double_jump && !player.has_double_jumped && player.jump_key_released {
            player.body.vy = -cfg.double_jump_velocity;
            player.has_double_jumped = true;
            audio.play(Sfx::Jump);
        }
        player.jump_key_released = false;
    } else {
        player.jump_key_released = true;
    }

    if keys.down && !player.grounded() && player.can_force_descend {
        player.body.vy = cfg.descend_velocity;
        player.can_force_descend = false;
    }
}

/// Platform contact: re-arm descend, drop any unused double jump.
pub fn land(player: &mut PlayerState) {
    player.can_double_jump = false;
    player.has_double_jumped = false;
    player.can_force_descend = true;
}
