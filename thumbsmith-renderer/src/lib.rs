//! # Thumbsmith Renderer
//!
//! Synchronous scene→raster pipeline for Thumbsmith. The scene is composed
//! into an SVG intermediate and rasterized with resvg onto a tiny-skia
//! pixmap, which can be exported as PNG bytes.
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │            thumbsmith-renderer              │
//! ├─────────────┬─────────────┬─────────────────┤
//! │ Compose     │ Rasterize   │ Export          │
//! │ (scene→SVG) │ (resvg →    │ (PNG bytes)     │
//! │             │  tiny-skia) │                 │
//! └─────────────┴─────────────┴─────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
mod compose;
pub mod error;
pub mod image;

use std::sync::Arc;

use thumbsmith_core::Scene;

pub use cache::{CacheStats, ImageCache, ImageCacheConfig};
pub use error::{RenderError, RenderResult};

/// Configuration for scene rendering.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Canvas fill color behind all layers (CSS color).
    pub background_color: String,
    /// Draw the dashed center-cross alignment grid.
    pub show_grid: bool,
    /// Output scale factor (e.g. 2.0 for retina export).
    pub scale: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background_color: "#000000".to_string(),
            show_grid: false,
            scale: 1.0,
        }
    }
}

/// Synchronous scene rasterizer.
///
/// Owns the image cache and the font database, so repeated renders of the
/// same scene reuse decoded sources and loaded fonts.
pub struct SceneRenderer {
    config: RenderConfig,
    cache: ImageCache,
    fontdb: Arc<usvg::fontdb::Database>,
}

impl SceneRenderer {
    /// Create a renderer with the given configuration. System fonts are
    /// loaded once for text rasterization.
    #[must_use]
    pub fn new(config: RenderConfig) -> Self {
        let mut fontdb = usvg::fontdb::Database::new();
        fontdb.load_system_fonts();
        tracing::debug!("Loaded {} font faces", fontdb.len());
        Self {
            config,
            cache: ImageCache::new(),
            fontdb: Arc::new(fontdb),
        }
    }

    /// Create a renderer with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(RenderConfig::default())
    }

    /// Load extra font data (e.g. bundled font files) into the resolver.
    pub fn load_font_data(&mut self, data: Vec<u8>) {
        Arc::make_mut(&mut self.fontdb).load_font_data(data);
    }

    /// The renderer configuration.
    #[must_use]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Mutable access to the configuration (grid toggle, background color).
    pub fn config_mut(&mut self) -> &mut RenderConfig {
        &mut self.config
    }

    /// The image cache.
    #[must_use]
    pub fn cache(&self) -> &ImageCache {
        &self.cache
    }

    /// Render the scene onto a raster pixmap.
    ///
    /// # Errors
    ///
    /// Returns an error if an image source cannot be resolved, the SVG
    /// intermediate cannot be parsed, or the pixmap cannot be allocated.
    pub fn render_to_pixmap(&mut self, scene: &Scene) -> RenderResult<tiny_skia::Pixmap> {
        tracing::trace!(
            "Rendering {} elements, canvas {}x{}",
            scene.len(),
            scene.width,
            scene.height
        );
        let svg = compose::compose_svg(scene, &self.config, &mut self.cache)?;
        self.rasterize(&svg)
    }

    /// Export the scene as PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or encoding fails.
    pub fn export_png(&mut self, scene: &Scene) -> RenderResult<Vec<u8>> {
        let pixmap = self.render_to_pixmap(scene)?;
        pixmap
            .encode_png()
            .map_err(|e| RenderError::Encode(format!("PNG encoding failed: {e}")))
    }

    /// Rasterize an SVG string at the configured scale.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn rasterize(&self, svg: &str) -> RenderResult<tiny_skia::Pixmap> {
        let options = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            ..usvg::Options::default()
        };

        let tree = usvg::Tree::from_str(svg, &options)
            .map_err(|e| RenderError::Svg(format!("SVG parsing failed: {e}")))?;

        let size = tree.size();
        let px_w = (size.width() * self.config.scale).round() as u32;
        let px_h = (size.height() * self.config.scale).round() as u32;

        let mut pixmap = tiny_skia::Pixmap::new(px_w.max(1), px_h.max(1))
            .ok_or_else(|| RenderError::Raster("Failed to create pixmap".to_string()))?;

        let transform = tiny_skia::Transform::from_scale(self.config.scale, self.config.scale);
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        Ok(pixmap)
    }
}
