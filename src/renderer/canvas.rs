//! Canvas2D render sink (WASM only)
//!
//! Sprites load asynchronously; until an image has decoded, its entity is
//! drawn as a coloured box so the simulation never waits on assets.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::frame::{EntityPose, Frame, RenderSink};
use crate::sim::{Facing, GamePhase};

/// A sprite plus the colour used while it is unavailable
struct Sprite {
    image: Option<HtmlImageElement>,
    fallback: &'static str,
}

impl Sprite {
    fn load(src: &str, fallback: &'static str) -> Self {
        let image = match HtmlImageElement::new() {
            Ok(img) => {
                img.set_src(src);
                Some(img)
            }
            Err(e) => {
                log::error!("Could not create image for {}: {:?}", src, e);
                None
            }
        };
        Self { image, fallback }
    }

    fn ready(&self) -> Option<&HtmlImageElement> {
        self.image
            .as_ref()
            .filter(|img| img.complete() && img.natural_width() > 0)
    }
}

/// Draws frames onto a 2D canvas context
pub struct CanvasSink {
    ctx: CanvasRenderingContext2d,
    player: Sprite,
    pursuer: Sprite,
    pickup: Sprite,
    ground: Sprite,
}

impl CanvasSink {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        ctx.set_image_smoothing_enabled(true);

        Ok(Self {
            ctx,
            player: Sprite::load("images/turtle.png", "#2e8b57"),
            pursuer: Sprite::load("images/mario.png", "#d62828"),
            pickup: Sprite::load("images/mushroom.png", "#f4a261"),
            ground: Sprite::load("images/ground.png", "#8b5a2b"),
        })
    }

    fn draw_box(&self, sprite: &Sprite, x: f64, y: f64, w: f64, h: f64) -> Result<(), JsValue> {
        match sprite.ready() {
            Some(img) => self
                .ctx
                .draw_image_with_html_image_element_and_dw_and_dh(img, x, y, w, h),
            None => {
                self.ctx.set_fill_style_str(sprite.fallback);
                self.ctx.fill_rect(x, y, w, h);
                Ok(())
            }
        }
    }

    /// Draw centred on the pose, mirrored when facing left, rotated if spinning
    fn draw_entity(&self, sprite: &Sprite, pose: &EntityPose) -> Result<(), JsValue> {
        let w = pose.size.x as f64;
        let h = pose.size.y as f64;
        self.ctx.save();
        self.ctx.translate(pose.pos.x as f64, pose.pos.y as f64)?;
        if pose.rotation != 0.0 {
            self.ctx.rotate(pose.rotation as f64)?;
        } else if pose.facing == Facing::Left {
            self.ctx.scale(-1.0, 1.0)?;
        }
        let result = self.draw_box(sprite, -w / 2.0, -h / 2.0, w, h);
        self.ctx.restore();
        result
    }

    fn draw_game_over(&self, frame: &Frame) -> Result<(), JsValue> {
        let w = frame.world.x as f64;
        let h = frame.world.y as f64;
        self.ctx.set_fill_style_str("rgba(0, 0, 0, 0.7)");
        self.ctx.fill_rect(0.0, 0.0, w, h);

        self.ctx.set_fill_style_str("white");
        self.ctx.set_text_align("center");
        self.ctx.set_font("48px Arial");
        self.ctx.fill_text("Game Over!", w / 2.0, h / 2.0 - 50.0)?;
        self.ctx.set_font("24px Arial");
        self.ctx
            .fill_text(&format!("Score: {}", frame.score), w / 2.0, h / 2.0)?;
        self.ctx.fill_text(
            &format!("High score: {}", frame.high_score),
            w / 2.0,
            h / 2.0 + 40.0,
        )
    }

    fn draw(&self, frame: &Frame) -> Result<(), JsValue> {
        self.ctx
            .clear_rect(0.0, 0.0, frame.world.x as f64, frame.world.y as f64);

        for &x in &frame.ground_tiles {
            self.draw_box(
                &self.ground,
                x as f64,
                frame.ground_y as f64,
                crate::consts::GROUND_TILE_WIDTH as f64,
                frame.ground_height as f64,
            )?;
        }

        if let Some(pickup) = &frame.pickup {
            self.draw_entity(&self.pickup, pickup)?;
        }
        self.draw_entity(&self.player, &frame.player)?;
        self.draw_entity(&self.pursuer, &frame.pursuer)?;

        if frame.phase == GamePhase::GameOver {
            self.draw_game_over(frame)?;
        }
        Ok(())
    }
}

impl RenderSink for CanvasSink {
    fn present(&mut self, frame: &Frame) {
        if let Err(e) = self.draw(frame) {
            log::warn!("Render error: {:?}", e);
        }
    }
}
