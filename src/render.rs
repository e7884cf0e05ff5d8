//! Canvas drawing.
//!
//! Everything here is paint-only: it reads game/scene state and never
//! mutates it. Missing images degrade to flat placeholder shapes.

use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::assets::{Assets, DUDE_FRAME, ImageKey};
use crate::config::GameConfig;
use crate::game::hud::{self, Hud};
use crate::game::{Body, GROUND, GameState, Rect};
use crate::scene::Button;

const FONT_FAMILY: &str = "'Courier New', monospace";

#[derive(Clone, Copy, Debug)]
pub struct TextStyle {
    pub size: f64,
    pub fill: &'static str,
    pub stroke: Option<(&'static str, f64)>,
    pub align: &'static str,
    pub baseline: &'static str,
}

impl TextStyle {
    pub const fn plain(size: f64) -> Self {
        Self {
            size,
            fill: "#fff",
            stroke: None,
            align: "left",
            baseline: "top",
        }
    }

    pub const fn outlined(size: f64, thickness: f64) -> Self {
        Self {
            size,
            fill: "#fff",
            stroke: Some(("#000", thickness)),
            align: "left",
            baseline: "top",
        }
    }

    pub const fn centered(self) -> Self {
        Self {
            align: "center",
            baseline: "middle",
            ..self
        }
    }

    pub const fn top_center(self) -> Self {
        Self {
            align: "center",
            baseline: "top",
            ..self
        }
    }

    pub const fn top_right(self) -> Self {
        Self {
            align: "right",
            baseline: "top",
            ..self
        }
    }
}

/// Canvas plus its 2d context.
pub struct Gfx {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Gfx {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        Self { canvas, ctx }
    }

    pub fn width(&self) -> f64 {
        self.canvas.width() as f64
    }

    pub fn height(&self) -> f64 {
        self.canvas.height() as f64
    }

    pub fn clear(&self, color: &str) {
        self.ctx.set_global_alpha(1.0);
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(0.0, 0.0, self.width(), self.height());
    }

    pub fn fill_rect(&self, color: &str, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x, y, w, h);
    }

    pub fn stroke_rect(&self, color: &str, line_width: f64, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(line_width);
        self.ctx.stroke_rect(x, y, w, h);
    }

    /// Draw an image centred on (cx, cy) at `scale` of its natural size, or a
    /// `fallback`-coloured box of `fallback_size` while it isn't available.
    pub fn image(
        &self,
        img: Option<&HtmlImageElement>,
        cx: f64,
        cy: f64,
        scale: f64,
        fallback: &str,
        fallback_size: (f64, f64),
    ) {
        match img {
            Some(img) => {
                let w = img.natural_width() as f64 * scale;
                let h = img.natural_height() as f64 * scale;
                self.ctx
                    .draw_image_with_html_image_element_and_dw_and_dh(
                        img,
                        cx - w / 2.0,
                        cy - h / 2.0,
                        w,
                        h,
                    )
                    .ok();
            }
            None => {
                let (w, h) = fallback_size;
                self.fill_rect(fallback, cx - w / 2.0, cy - h / 2.0, w, h);
            }
        }
    }

    /// Stretch an image over `rect`, or fill it with `fallback` while the
    /// image isn't available.
    pub fn image_in(&self, img: Option<&HtmlImageElement>, rect: Rect, fallback: &str) {
        match img {
            Some(img) => {
                self.ctx
                    .draw_image_with_html_image_element_and_dw_and_dh(img, rect.x, rect.y, rect.w, rect.h)
                    .ok();
            }
            None => self.fill_rect(fallback, rect.x, rect.y, rect.w, rect.h),
        }
    }

    /// Draw one horizontal-strip frame of a sprite sheet centred on (cx, cy).
    pub fn sprite_frame(
        &self,
        img: Option<&HtmlImageElement>,
        frame: u32,
        (fw, fh): (f64, f64),
        cx: f64,
        cy: f64,
        fallback: &str,
    ) {
        let (dx, dy) = (cx - fw / 2.0, cy - fh / 2.0);
        match img {
            Some(img) => {
                self.ctx
                    .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                        img,
                        frame as f64 * fw,
                        0.0,
                        fw,
                        fh,
                        dx,
                        dy,
                        fw,
                        fh,
                    )
                    .ok();
            }
            None => self.fill_rect(fallback, dx, dy, fw, fh),
        }
    }

    pub fn text(&self, s: &str, x: f64, y: f64, style: TextStyle) {
        self.ctx.set_font(&format!("{}px {}", style.size, FONT_FAMILY));
        self.ctx.set_text_align(style.align);
        self.ctx.set_text_baseline(style.baseline);
        if let Some((color, thickness)) = style.stroke {
            self.ctx.set_line_join("round");
            self.ctx.set_stroke_style_str(color);
            self.ctx.set_line_width(thickness);
            self.ctx.stroke_text(s, x, y).ok();
        }
        self.ctx.set_fill_style_str(style.fill);
        self.ctx.fill_text(s, x, y).ok();
    }

    pub fn button(&self, button: &Button) {
        let r = button.bounds();
        self.fill_rect(button.background, r.x, r.y, r.w, r.h);
        let style = TextStyle {
            fill: button.label_color(),
            ..TextStyle::plain(button.font_size).centered()
        };
        let style = match button.outline {
            Some(thickness) => TextStyle {
                stroke: Some(("#000", thickness)),
                ..style
            },
            None => style,
        };
        self.text(button.label, button.x, button.y, style);
    }

    pub fn hud(&self, hud: &Hud) {
        for bar in [&hud.player_bar, &hud.boss_bar] {
            self.fill_rect(bar.color, bar.x, bar.y, bar.width, hud::BAR_HEIGHT);
            self.stroke_rect(
                "#ffffff",
                2.0,
                bar.x - 2.0,
                bar.y - 2.0,
                hud::BAR_MAX_WIDTH + 4.0,
                hud::BAR_HEIGHT + 4.0,
            );
        }
        self.text("PLAYER", 16.0, 40.0, TextStyle::plain(16.0));
        self.text("BOSS", 780.0, 40.0, TextStyle::plain(16.0).top_right());
        self.text(
            &hud.stage_label,
            self.width() / 2.0,
            16.0,
            TextStyle::outlined(24.0, 4.0).top_center(),
        );
        self.text(&hud.score_label, 16.0, 50.0, TextStyle::outlined(24.0, 4.0));

        let (cx, cy) = (self.width() / 2.0, self.height() / 2.0);
        if let Some(banner) = hud.banner {
            self.text(banner, cx, cy, TextStyle::outlined(64.0, 6.0).centered());
        }
        if let Some(end) = &hud.end {
            self.text(end.message, cx, cy, TextStyle::outlined(64.0, 6.0).centered());
            self.text(
                &end.final_score,
                cx,
                450.0,
                TextStyle::plain(24.0).centered(),
            );
        }
    }

    fn debug_body(&self, body: &Body, color: &str) {
        let r = body.bounds();
        self.stroke_rect(color, 1.0, r.x, r.y, r.w, r.h);
    }

    fn with_alpha(&self, alpha: f64, draw: impl FnOnce(&Self)) {
        self.ctx.set_global_alpha(alpha);
        draw(self);
        self.ctx.set_global_alpha(1.0);
    }
}

/// Paint the playfield and HUD for a running (or frozen) fight.
pub fn draw_fight(gfx: &Gfx, assets: &Assets, state: &GameState, cfg: &GameConfig, now: f64) {
    gfx.clear("#000");
    gfx.image(
        assets.image(ImageKey::Sky),
        cfg.width / 2.0,
        cfg.height / 2.0,
        1.0,
        "#101030",
        (cfg.width, cfg.height),
    );
    gfx.image(
        assets.image(ImageKey::Ground),
        GROUND.center_x(),
        GROUND.center_y(),
        2.0,
        "#3a7d2c",
        (GROUND.w, GROUND.h),
    );

    // Bosses are drawn into their body box so the sprite is the hitbox.
    if let Some(boss) = &state.boss {
        gfx.image_in(
            ImageKey::for_boss(boss.sprite).and_then(|k| assets.image(k)),
            boss.body.bounds(),
            "#a03030",
        );
    }

    let player = &state.player;
    let alpha = if player.invincible { 0.5 } else { 1.0 };
    gfx.with_alpha(alpha, |g| {
        g.sprite_frame(
            assets.image(ImageKey::Dude),
            player.anim.frame(now),
            DUDE_FRAME,
            player.body.x,
            player.body.y,
            "#4060e0",
        );
        if player.tinted {
            let r = player.body.bounds();
            g.fill_rect("rgba(255,0,0,0.35)", r.x, r.y, r.w, r.h);
        }
    });

    if cfg.debug {
        gfx.debug_body(&player.body, "#ff00ff");
        if let Some(boss) = &state.boss {
            gfx.debug_body(&boss.body, "#ff00ff");
        }
        for p in &state.world.platforms {
            gfx.stroke_rect("#00ffff", 1.0, p.x, p.y, p.w, p.h);
        }
    }

    gfx.hud(&hud::layout(state, cfg));
}
