//! Scene graph: the ordered element list, canvas dimensions, and selection.

use serde::{Deserialize, Serialize};

use crate::{Element, SceneError, SceneResult};

/// Default canvas width in pixels.
pub const DEFAULT_WIDTH: f32 = 1280.0;

/// Default canvas height in pixels.
pub const DEFAULT_HEIGHT: f32 = 720.0;

/// A scene containing all thumbnail layers.
///
/// Elements live in a stable array; paint order is derived by an ascending
/// stable sort over `layer`, so array indices stay valid across reordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// All elements, in insertion order.
    elements: Vec<Element>,
    /// Index of the selected element, if any. Runtime-only state.
    #[serde(skip)]
    selected: Option<usize>,
    /// Canvas width in pixels.
    pub width: f32,
    /// Canvas height in pixels.
    pub height: f32,
    /// Background image source reference, if any.
    pub background: Option<String>,
}

impl Scene {
    /// Create a new empty scene with the given canvas size.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            elements: Vec::new(),
            selected: None,
            width,
            height,
            background: None,
        }
    }

    /// All elements in insertion order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Get an element by index.
    #[must_use]
    pub fn element(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    /// Get a mutable reference to an element by index.
    pub fn element_mut(&mut self, index: usize) -> Option<&mut Element> {
        self.elements.get_mut(index)
    }

    /// Append an element, returning its index.
    pub fn add_element(&mut self, element: Element) -> usize {
        self.elements.push(element);
        self.elements.len() - 1
    }

    /// Remove an element by index. Clears the selection.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::IndexOutOfBounds`] if the index is invalid.
    pub fn remove_element(&mut self, index: usize) -> SceneResult<Element> {
        if index >= self.elements.len() {
            return Err(SceneError::IndexOutOfBounds(index));
        }
        self.selected = None;
        Ok(self.elements.remove(index))
    }

    /// Replace the whole element list. Clears the selection.
    pub fn replace_elements(&mut self, elements: Vec<Element>) {
        self.elements = elements;
        self.selected = None;
    }

    /// The number of elements in the scene.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the scene is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Index of the currently selected element.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Select the element at `index`.
    pub fn set_selected(&mut self, index: usize) {
        if index < self.elements.len() {
            self.selected = Some(index);
        }
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// The currently selected element, if any.
    #[must_use]
    pub fn selected_element(&self) -> Option<&Element> {
        self.selected.and_then(|i| self.elements.get(i))
    }

    /// Mutable access to the currently selected element, if any.
    pub fn selected_element_mut(&mut self) -> Option<&mut Element> {
        let index = self.selected?;
        self.elements.get_mut(index)
    }

    /// The layer value assigned to the next appended element.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn next_layer(&self) -> i32 {
        self.elements.len() as i32
    }

    /// The highest layer value in the scene.
    #[must_use]
    pub fn max_layer(&self) -> Option<i32> {
        self.elements.iter().map(|e| e.transform.layer).max()
    }

    /// The lowest layer value in the scene.
    #[must_use]
    pub fn min_layer(&self) -> Option<i32> {
        self.elements.iter().map(|e| e.transform.layer).min()
    }

    /// Element indices in paint order: ascending stable sort by `layer`,
    /// ties resolved by array order.
    #[must_use]
    pub fn paint_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.elements.len()).collect();
        order.sort_by_key(|&i| self.elements[i].transform.layer);
        order
    }

    /// Find the element under the given canvas point, testing the top-most
    /// painted element first. Returns its array index.
    #[must_use]
    pub fn element_at(&self, x: f32, y: f32) -> Option<usize> {
        self.paint_order()
            .into_iter()
            .rev()
            .find(|&i| self.elements[i].contains_point(x, y))
    }

    /// The canvas center point.
    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }

    /// Serialize the scene to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> SceneResult<String> {
        serde_json::to_string(self).map_err(SceneError::Serialization)
    }

    /// Deserialize a scene from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> SceneResult<Self> {
        serde_json::from_str(json).map_err(SceneError::Serialization)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}
