//! Whole-project serialized representation.
//!
//! The persisted state is a single JSON blob: the element list, the
//! background reference, and the canvas size. Fields default when absent
//! so older saves keep loading.

use serde::{Deserialize, Serialize};

use crate::scene::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::{Element, Scene};

/// Canvas pixel dimensions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CanvasSize {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

/// The persisted whole-project state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectDocument {
    /// Elements in array order.
    #[serde(default)]
    pub elements: Vec<Element>,
    /// Background image source reference, if any.
    #[serde(default)]
    pub background: Option<String>,
    /// Canvas dimensions.
    #[serde(default)]
    pub canvas_size: CanvasSize,
}

impl ProjectDocument {
    /// Capture a document from a runtime scene.
    #[must_use]
    pub fn from_scene(scene: &Scene) -> Self {
        Self {
            elements: scene.elements().to_vec(),
            background: scene.background.clone(),
            canvas_size: CanvasSize {
                width: scene.width,
                height: scene.height,
            },
        }
    }

    /// Materialize the document as a runtime scene (no selection).
    #[must_use]
    pub fn into_scene(self) -> Scene {
        let mut scene = Scene::new(self.canvas_size.width, self.canvas_size.height);
        scene.background = self.background;
        scene.replace_elements(self.elements);
        scene
    }
}
