//! Ball animation definition.
//!
//! The ball sprite is a horizontal strip of equally sized frames. The first
//! frame of the strip is a placeholder and is never drawn, so a strip of
//! `n` frames animates through `n - 1`. Which frame is shown is a pure
//! function of the tick count; nothing about playback is stored.

use std::sync::Arc;

use bevy_ecs::prelude::Resource;

/// Immutable description of the ball's sprite strip.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct BallAnimation {
    /// Texture key in [`crate::resources::assetstore::SceneAssets`].
    pub tex_key: Arc<str>,
    /// Width of a single frame in pixels.
    pub frame_width: f32,
    /// Height of a single frame in pixels.
    pub frame_height: f32,
    /// Strip index of the first drawable frame.
    pub first_frame: usize,
    /// Number of drawable frames.
    pub frame_count: usize,
    /// Ticks each frame stays on screen.
    pub ticks_per_frame: u64,
}

impl BallAnimation {
    /// Describe a strip `strip_width` pixels wide holding `strip_frames` frames.
    ///
    /// With `skip_first` the leading placeholder frame is excluded.
    pub fn from_strip(
        tex_key: impl Into<Arc<str>>,
        strip_width: f32,
        strip_height: f32,
        strip_frames: usize,
        skip_first: bool,
        ticks_per_frame: u64,
    ) -> Self {
        let strip_frames = strip_frames.max(1);
        let first_frame = usize::from(skip_first && strip_frames > 1);
        Self {
            tex_key: tex_key.into(),
            frame_width: strip_width / strip_frames as f32,
            frame_height: strip_height,
            first_frame,
            frame_count: strip_frames - first_frame,
            ticks_per_frame,
        }
    }

    /// Frame to show on `tick_count`.
    pub fn frame_index(&self, tick_count: u64) -> usize {
        animation_frame(tick_count, self.ticks_per_frame, self.frame_count)
    }

    /// Horizontal pixel offset of `frame_index` inside the strip.
    pub fn frame_offset(&self, frame_index: usize) -> f32 {
        (self.first_frame + frame_index) as f32 * self.frame_width
    }
}

/// `(tick_count / ticks_per_frame) mod frame_count`, or 0 without frames.
pub fn animation_frame(tick_count: u64, ticks_per_frame: u64, frame_count: usize) -> usize {
    if frame_count == 0 {
        return 0;
    }
    ((tick_count / ticks_per_frame.max(1)) % frame_count as u64) as usize
}
