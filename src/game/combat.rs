//! Player/boss contact resolution.

use crate::audio::{AudioSink, Sfx};
use crate::config::GameConfig;

use super::{Contact, GameState, Outcome, TimerAction, stage};

/// Resolve a player/boss contact reported by the physics step. A stomp
/// needs the player's bottom on the boss's top; anything else hurts the
/// player.
pub fn resolve(
    state: &mut GameState,
    contact: Contact,
    now: f64,
    cfg: &GameConfig,
    audio: &mut dyn AudioSink,
) {
    if state.boss.is_none() || state.is_over() {
        return;
    }
    if contact.player_touching_down && contact.boss_touching_up {
        stomp(state, now, cfg, audio);
    } else {
        hurt_player(state, now, cfg, audio);
    }
}

fn stomp(state: &mut GameState, now: f64, cfg: &GameConfig, audio: &mut dyn AudioSink) {
    let Some(boss) = state.boss.as_mut() else {
        return;
    };
    boss.health -= cfg.stomp_damage;
    let defeated = boss.health <= 0;
    state.player.body.vy = -cfg.stomp_bounce;
    state.score += cfg.hit_score;
    audio.play(Sfx::Punch);

    if defeated {
        state.boss = None;
        state.score += cfg.defeat_score;
        audio.play(Sfx::Win);
        stage::on_boss_defeated(state, now, cfg, audio);
    }
}

fn hurt_player(state: &mut GameState, now: f64, cfg: &GameConfig, audio: &mut dyn AudioSink) {
    let boss_x = match state.boss.as_ref() {
        Some(boss) => boss.body.x,
        None => return,
    };
    let player = &mut state.player;

    // Contacts inside the window neither hurt nor extend it.
    if player.invincible {
        return;
    }
    player.health -= cfg.contact_damage;
    player.tinted = true;
    player.body.vy = -cfg.knockback;
    player.body.vx = if player.body.x < boss_x {
        -cfg.knockback
    } else {
        cfg.knockback
    };
    player.invincible = true;
    if let Some(previous) = player.invincibility_timer.take() {
        state.timers.cancel(previous);
    }
    player.invincibility_timer = Some(state.timers.schedule(
        now,
        cfg.invincibility_ms,
        TimerAction::EndInvincibility,
    ));

    if state.player.health <= 0 {
        stage::end_game(state, Outcome::Defeat, audio);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentAudio;
    use crate::game::fire_timers;

    const SIDE: Contact = Contact {
        player_touching_down: true,
        boss_touching_up: false,
    };

    #[test]
    fn knockback_pushes_away_from_the_boss() {
        let cfg = GameConfig::default();
        let mut state = GameState::new(&cfg);
        state.player.body.x = 720.0;
        resolve(&mut state, SIDE, 0.0, &cfg, &mut SilentAudio);
        assert_eq!(state.player.body.vx, 200.0);
        assert_eq!(state.player.body.vy, -200.0);
        assert!(state.player.tinted);
    }

    #[test]
    fn touching_down_alone_is_not_a_stomp() {
        let cfg = GameConfig::default();
        let mut state = GameState::new(&cfg);
        resolve(&mut state, SIDE, 0.0, &cfg, &mut SilentAudio);
        assert_eq!(state.boss.as_ref().unwrap().health, 150);
        assert_eq!(state.player.health, 90);
    }

    #[test]
    fn contact_during_window_neither_hurts_nor_extends_it() {
        let cfg = GameConfig::default();
        let mut state = GameState::new(&cfg);
        resolve(&mut state, SIDE, 0.0, &cfg, &mut SilentAudio);
        resolve(&mut state, SIDE, 300.0, &cfg, &mut SilentAudio);
        assert_eq!(state.player.health, 90);
        assert_eq!(state.timers.len(), 1);

        fire_timers(&mut state, 499.0, &cfg, &mut SilentAudio);
        assert!(state.player.invincible && state.player.tinted);
        fire_timers(&mut state, 500.0, &cfg, &mut SilentAudio);
        assert!(!state.player.invincible && !state.player.tinted);
    }

    #[test]
    fn sustained_contact_hurts_once_per_window() {
        let cfg = GameConfig::default();
        let mut state = GameState::new(&cfg);
        let mut now = 0.0;
        while now < 3000.0 {
            fire_timers(&mut state, now, &cfg, &mut SilentAudio);
            resolve(&mut state, SIDE, now, &cfg, &mut SilentAudio);
            now += 100.0;
        }
        // Hits land at 0, 500, ..., 2500 ms.
        assert_eq!(state.player.health, 40);
        fire_timers(&mut state, 3000.0, &cfg, &mut SilentAudio);
        assert!(!state.player.invincible);
    }

    #[test]
    fn contact_after_game_over_is_ignored() {
        let cfg = GameConfig::default();
        let mut state = GameState::new(&cfg);
        stage::end_game(&mut state, Outcome::Defeat, &mut SilentAudio);
        resolve(&mut state, SIDE, 0.0, &cfg, &mut SilentAudio);
        assert_eq!(state.player.health, 100);
    }
}
