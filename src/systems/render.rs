//! Render adapter.
//!
//! Draws the latest [`RenderSnapshot`] with Raylib. Nothing here reads
//! simulation components: everything on screen comes from the snapshot plus
//! the immutable assets loaded at startup.
//!
//! Draw order: sky, banner, things with their labels, ball, debug overlay.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::resources::animationstore::BallAnimation;
use crate::resources::assetstore::SceneAssets;
use crate::resources::debugmode::DebugMode;
use crate::resources::gameconfig::GameConfig;
use crate::resources::snapshot::RenderSnapshot;

const SKY: Color = Color::new(74, 198, 239, 255);
const BANNER_POS: Vector2 = Vector2 { x: 200.0, y: 25.0 };
const BANNER_FONT_SIZE: f32 = 50.0;
/// Labels sit this far above their thing.
const LABEL_LIFT: f32 = 20.0;

/// Key of the font used for labels and the banner.
pub const LABEL_FONT: &str = "label";
/// Key of the ball sprite strip.
pub const BALL_TEXTURE: &str = "ball";
/// Key of the image drawn for each thing.
pub const THING_TEXTURE: &str = "thing";

pub fn render_system(
    mut rl: NonSendMut<raylib::RaylibHandle>,
    th: NonSend<raylib::RaylibThread>,
    assets: NonSend<SceneAssets>,
    snapshot: Res<RenderSnapshot>,
    animation: Res<BallAnimation>,
    config: Res<GameConfig>,
    debug_mode: Option<Res<DebugMode>>,
) {
    let mut d = rl.begin_drawing(&th);
    d.clear_background(SKY);

    let font = assets.font(LABEL_FONT);

    if let Some(font) = font {
        d.draw_text_ex(
            font,
            &config.banner,
            BANNER_POS,
            BANNER_FONT_SIZE,
            1.0,
            Color::BLACK,
        );
    }

    if let Some(tex) = assets.texture(THING_TEXTURE) {
        let src = Rectangle {
            x: 0.0,
            y: 0.0,
            width: tex.width as f32,
            height: tex.height as f32,
        };
        for thing in snapshot.things.iter() {
            let dest = Rectangle {
                x: thing.x,
                y: thing.y,
                width: src.width * config.thing_scale,
                height: src.height * config.thing_scale,
            };
            d.draw_texture_pro(tex, src, dest, Vector2::zero(), 0.0, Color::WHITE);
            if let Some(font) = font {
                d.draw_text_ex(
                    font,
                    &thing.label,
                    Vector2::new(thing.x, thing.y - LABEL_LIFT),
                    config.label_font_size,
                    1.0,
                    Color::WHITE,
                );
            }
        }
    }

    if let Some(tex) = assets.texture(&*animation.tex_key) {
        // Source rect selects the frame from the strip
        let src = Rectangle {
            x: animation.frame_offset(snapshot.ball.frame),
            y: 0.0,
            width: animation.frame_width,
            height: animation.frame_height,
        };
        let dest = Rectangle {
            x: snapshot.ball.x,
            y: snapshot.ball.y,
            width: animation.frame_width * config.ball_scale,
            height: animation.frame_height * config.ball_scale,
        };
        d.draw_texture_pro(tex, src, dest, Vector2::zero(), 0.0, Color::WHITE);
    }

    if debug_mode.is_some() {
        let fps = d.get_fps();
        let text = format!(
            "DEBUG MODE (F11 to toggle, SPACE to spawn) | FPS: {} | tick: {}",
            fps, snapshot.tick_count
        );
        d.draw_text(&text, 10, 10, 10, Color::BLACK);
        let text = format!(
            "Things: {} | Ball: ({:.0}, {:.0}) frame {}",
            snapshot.things.len(),
            snapshot.ball.x,
            snapshot.ball.y,
            snapshot.ball.frame
        );
        d.draw_text(&text, 10, 24, 10, Color::BLACK);
    }
}
