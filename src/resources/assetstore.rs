//! Loaded graphics for the render adapter.
//!
//! [`SceneAssets`] owns every GPU texture and font, keyed by string IDs.
//! It is filled once by [`load_assets`](crate::game::load_assets) and then
//! only read by the renderer.
//!
//! Raylib handles must stay on the main thread, so this is a non-send
//! resource: insert it with `insert_non_send_resource` and access it through
//! `NonSend<SceneAssets>`.

use raylib::prelude::{Font, Texture2D};
use rustc_hash::FxHashMap;

#[derive(Default)]
pub struct SceneAssets {
    textures: FxHashMap<String, Texture2D>,
    fonts: FxHashMap<String, Font>,
}

impl SceneAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_texture(&mut self, id: impl Into<String>, texture: Texture2D) {
        self.textures.insert(id.into(), texture);
    }

    pub fn texture(&self, id: impl AsRef<str>) -> Option<&Texture2D> {
        self.textures.get(id.as_ref())
    }

    pub fn insert_font(&mut self, id: impl Into<String>, font: Font) {
        self.fonts.insert(id.into(), font);
    }

    pub fn font(&self, id: impl AsRef<str>) -> Option<&Font> {
        self.fonts.get(id.as_ref())
    }

    /// Number of loaded textures and fonts.
    pub fn counts(&self) -> (usize, usize) {
        (self.textures.len(), self.fonts.len())
    }
}
