//! Boss wandering: a random direction every 2–4 s, an occasional hop, and
//! a soft turn-around near the arena edges.

use rand::Rng;

use crate::config::GameConfig;

use super::BossState;

pub fn steer<R: Rng + ?Sized>(boss: &mut BossState, now: f64, cfg: &GameConfig, rng: &mut R) {
    if now > boss.next_change_at {
        boss.direction = if rng.gen_bool(0.5) { -1 } else { 1 };
        boss.next_change_at = now + rng.gen_range(cfg.boss_turn_min_ms..=cfg.boss_turn_max_ms);

        if boss.grounded() && rng.gen_bool(cfg.boss_jump_chance) {
            boss.body.vy = -rng.gen_range(cfg.boss_jump_min..=cfg.boss_jump_max);
        }
    }

    boss.body.vx = boss.speed * f64::from(boss.direction);

    // Applies from the next frame's velocity onwards.
    if (boss.body.x > cfg.arena_right && boss.direction == 1)
        || (boss.body.x < cfg.arena_left && boss.direction == -1)
    {
        boss.direction = -boss.direction;
    }
}
