//! Text and font registry

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::Color;

/// Registry mapping font names to their files on disk.
#[derive(Debug, Clone, Default)]
pub struct FontCache {
    fonts: FxHashMap<String, PathBuf>,
    default_font: Option<String>,
}

impl FontCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a font file under a name.
    ///
    /// The first registered font becomes the default.
    pub fn register(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) {
        let name = name.into();
        if self.default_font.is_none() {
            self.default_font = Some(name.clone());
        }
        self.fonts.insert(name, path.into());
    }

    /// Path of a registered font
    #[must_use]
    pub fn path(&self, name: &str) -> Option<&Path> {
        self.fonts.get(name).map(PathBuf::as_path)
    }

    /// Name of the default font, if any is registered
    #[must_use]
    pub fn default_font(&self) -> Option<&str> {
        self.default_font.as_deref()
    }

    /// Override which font is the default
    pub fn set_default(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.fonts.contains_key(&name) {
            self.default_font = Some(name);
        } else {
            log::warn!("Cannot default to unregistered font '{name}'");
        }
    }

    /// Number of registered fonts
    #[must_use]
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// Whether no fonts are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

/// A piece of text drawn at a node's transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    /// The string to draw
    pub content: String,
    /// Name of the font in the [`FontCache`]
    pub font: String,
    /// Draw color
    pub color: Color,
    /// Point size
    pub point_size: u32,
}

impl Text {
    /// Create white text in a named font at 12 points
    #[must_use]
    pub fn new(content: impl Into<String>, font: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            font: font.into(),
            color: Color::WHITE,
            point_size: 12,
        }
    }

    /// Copy with a different color
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Copy with a different point size
    #[must_use]
    pub fn with_size(mut self, point_size: u32) -> Self {
        self.point_size = point_size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_font_is_default() {
        let mut cache = FontCache::new();
        cache.register("mono", "fonts/mono.ttf");
        cache.register("serif", "fonts/serif.ttf");

        assert_eq!(cache.default_font(), Some("mono"));
        assert_eq!(cache.path("serif"), Some(Path::new("fonts/serif.ttf")));
        assert_eq!(cache.path("missing"), None);
    }

    #[test]
    fn test_set_default_requires_registration() {
        let mut cache = FontCache::new();
        cache.register("mono", "fonts/mono.ttf");
        cache.set_default("missing");
        assert_eq!(cache.default_font(), Some("mono"));
    }

    #[test]
    fn test_text_builders() {
        let text = Text::new("Score: 0", "mono")
            .with_color(Color::YELLOW)
            .with_size(24);
        assert_eq!(text.color, Color::YELLOW);
        assert_eq!(text.point_size, 24);
    }
}
