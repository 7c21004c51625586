use egui::{
    pos2, vec2, Align2, Color32, ColorImage, Context, FontId, Rect, Sense, TextureHandle,
    TextureOptions, Ui, Vec2,
};
use tracing::info;

pub const SCENE_WIDTH: u32 = 960;
pub const SCENE_HEIGHT: u32 = 540;

const TITLE_TEXT: &str = "PORTFOLIO GAME SHELL";
const STATUS_TEXT: &str = "Renderer online... OK";

/// The placeholder game view. Owns one canvas texture at a fixed logical
/// resolution; the canvas scales to fit whatever rect it is given,
/// preserving aspect ratio and centering.
pub struct GameScene {
    canvas: Option<SceneCanvas>,
}

struct SceneCanvas {
    texture: TextureHandle,
}

impl GameScene {
    pub fn new() -> Self {
        Self { canvas: None }
    }

    /// Builds the canvas texture. A second mount without an intervening
    /// unmount is a no-op; the existing canvas stays.
    pub fn mount(&mut self, ctx: &Context) {
        if self.canvas.is_some() {
            return;
        }
        let texture = ctx.load_texture("game_scene", Self::backdrop(), TextureOptions::NEAREST);
        info!("game canvas mounted at {}x{}", SCENE_WIDTH, SCENE_HEIGHT);
        self.canvas = Some(SceneCanvas { texture });
    }

    /// Drops the canvas, freeing its texture, so a later mount builds a
    /// fresh one.
    pub fn unmount(&mut self) {
        if self.canvas.take().is_some() {
            info!("game canvas released");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.canvas.is_some()
    }

    // dark backdrop with faint scanlines
    fn backdrop() -> ColorImage {
        let (w, h) = (SCENE_WIDTH as usize, SCENE_HEIGHT as usize);
        let mut image = ColorImage::new([w, h], Color32::BLACK);
        for y in (0..h).step_by(4) {
            for x in 0..w {
                image.pixels[y * w + x] = Color32::from_gray(10);
            }
        }
        image
    }

    pub fn draw(&mut self, ui: &mut Ui) {
        let Some(canvas) = &self.canvas else {
            return;
        };

        let avail = ui.available_rect_before_wrap();
        let rect = fit_rect(avail, vec2(SCENE_WIDTH as f32, SCENE_HEIGHT as f32));
        let scale = rect.width() / SCENE_WIDTH as f32;

        let painter = ui.painter_at(avail);
        painter.rect_filled(avail, 0, Color32::BLACK);
        painter.image(
            canvas.texture.id(),
            rect,
            Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
            Color32::WHITE,
        );

        let center = rect.center();
        painter.text(
            center + vec2(0.0, -10.0 * scale),
            Align2::CENTER_CENTER,
            TITLE_TEXT,
            FontId::monospace(24.0 * scale),
            Color32::WHITE,
        );
        painter.text(
            center + vec2(0.0, 24.0 * scale),
            Align2::CENTER_CENTER,
            STATUS_TEXT,
            FontId::monospace(14.0 * scale),
            Color32::from_rgb(170, 170, 170),
        );

        ui.allocate_rect(avail, Sense::hover());
    }
}

/// Largest rect with `logical`'s aspect ratio that fits inside `avail`,
/// centered.
fn fit_rect(avail: Rect, logical: Vec2) -> Rect {
    let scale = (avail.width() / logical.x).min(avail.height() / logical.y);
    Rect::from_center_size(avail.center(), logical * scale)
}
