//! Minimal arcade physics: axis-aligned bodies under gravity, static
//! platforms, world bounds and player/boss separation.
//!
//! Bodies are centre-anchored. Each step clears the `touching` flags, so
//! gameplay code that runs before the next step (input, boss AI) sees the
//! contacts of the previous frame.

/// Velocity below which a bounce is treated as coming to rest.
const REST_SPEED: f64 = 12.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Touching {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    /// Rectangle from its centre and full size.
    pub fn centered(cx: f64, cy: f64, w: f64, h: f64) -> Self {
        Self {
            x: cx - w / 2.0,
            y: cy - h / 2.0,
            w,
            h,
        }
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.w / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.h / 2.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub x: f64,
    pub y: f64,
    pub half_w: f64,
    pub half_h: f64,
    pub vx: f64,
    pub vy: f64,
    pub bounce: f64,
    pub touching: Touching,
}

impl Body {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x,
            y,
            half_w: w / 2.0,
            half_h: h / 2.0,
            vx: 0.0,
            vy: 0.0,
            bounce: 0.2,
            touching: Touching::default(),
        }
    }

    pub fn top(&self) -> f64 {
        self.y - self.half_h
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.half_h
    }

    pub fn bounds(&self) -> Rect {
        Rect::centered(self.x, self.y, self.half_w * 2.0, self.half_h * 2.0)
    }

    fn integrate(&mut self, gravity: f64, dt: f64) {
        self.vy += gravity * dt;
        self.x += self.vx * dt;
        self.y += self.vy * dt;
    }
}

/// Geometry of a player/boss overlap, read after separation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    pub player_touching_down: bool,
    pub boss_touching_up: bool,
}

/// What a step reports back to gameplay code.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepReport {
    /// Player rests on (or hit) a static platform this step.
    pub player_on_platform: bool,
    pub player_boss: Option<Contact>,
}

#[derive(Clone, Debug)]
pub struct World {
    pub width: f64,
    pub height: f64,
    pub gravity: f64,
    pub platforms: Vec<Rect>,
}

impl World {
    pub fn new(width: f64, height: f64, gravity: f64) -> Self {
        Self {
            width,
            height,
            gravity,
            platforms: Vec::new(),
        }
    }

    pub fn add_platform(&mut self, rect: Rect) {
        self.platforms.push(rect);
    }

    pub fn step(&self, player: &mut Body, boss: Option<&mut Body>, dt: f64) -> StepReport {
        let mut report = StepReport::default();

        player.touching = Touching::default();
        player.integrate(self.gravity, dt);
        report.player_on_platform = self.collide_platforms(player);
        self.clamp_to_bounds(player);

        if let Some(boss) = boss {
            boss.touching = Touching::default();
            boss.integrate(self.gravity, dt);
            self.collide_platforms(boss);
            self.clamp_to_bounds(boss);
            report.player_boss = separate(player, boss);
        }
        report
    }

    fn collide_platforms(&self, body: &mut Body) -> bool {
        let mut hit = false;
        for platform in &self.platforms {
            hit |= collide_static(body, platform);
        }
        hit
    }

    fn clamp_to_bounds(&self, body: &mut Body) {
        if body.x - body.half_w < 0.0 {
            body.x = body.half_w;
            body.vx = -body.vx * body.bounce;
        } else if body.x + body.half_w > self.width {
            body.x = self.width - body.half_w;
            body.vx = -body.vx * body.bounce;
        }
        if body.top() < 0.0 {
            body.y = body.half_h;
            body.vy = -body.vy * body.bounce;
        } else if body.bottom() > self.height {
            body.y = self.height - body.half_h;
            body.vy = settle(-body.vy * body.bounce);
        }
    }
}

fn settle(v: f64) -> f64 {
    if v.abs() < REST_SPEED { 0.0 } else { v }
}

/// Penetration along each axis, or `None` when the boxes don't overlap.
fn overlap(a: &Rect, b: &Rect) -> Option<(f64, f64)> {
    let ox = (a.x + a.w).min(b.x + b.w) - a.x.max(b.x);
    let oy = (a.y + a.h).min(b.y + b.h) - a.y.max(b.y);
    if ox > 0.0 && oy > 0.0 {
        Some((ox, oy))
    } else {
        None
    }
}

fn collide_static(body: &mut Body, platform: &Rect) -> bool {
    let Some((ox, oy)) = overlap(&body.bounds(), platform) else {
        return false;
    };
    if oy <= ox {
        if body.y < platform.center_y() {
            body.y -= oy;
            body.touching.down = true;
            if body.vy > 0.0 {
                body.vy = settle(-body.vy * body.bounce);
            }
        } else {
            body.y += oy;
            body.touching.up = true;
            if body.vy < 0.0 {
                body.vy = -body.vy * body.bounce;
            }
        }
    } else if body.x < platform.center_x() {
        body.x -= ox;
        body.touching.right = true;
        body.vx = 0.0;
    } else {
        body.x += ox;
        body.touching.left = true;
        body.vx = 0.0;
    }
    true
}

/// Push two dynamic bodies apart and flag the touching sides.
fn separate(player: &mut Body, boss: &mut Body) -> Option<Contact> {
    let (ox, oy) = overlap(&player.bounds(), &boss.bounds())?;
    if oy <= ox {
        if player.y < boss.y {
            // Boss is usually planted on the platform, so the player takes
            // the whole correction.
            player.y -= oy;
            player.touching.down = true;
            boss.touching.up = true;
            if player.vy > 0.0 {
                player.vy = 0.0;
            }
        } else {
            boss.y -= oy;
            boss.touching.down = true;
            player.touching.up = true;
            if boss.vy > 0.0 {
                boss.vy = 0.0;
            }
        }
    } else {
        let half = ox / 2.0;
        if player.x < boss.x {
            player.x -= half;
            boss.x += half;
            player.touching.right = true;
            boss.touching.left = true;
        } else {
            player.x += half;
            boss.x -= half;
            player.touching.left = true;
            boss.touching.right = true;
        }
    }
    Some(Contact {
        player_touching_down: player.touching.down,
        boss_touching_up: boss.touching.up,
    })
}
