//! Interactive editing session: selection, drag, keyboard, and mutations.
//!
//! The editor owns a [`Scene`] and a [`History`] and applies every mutation
//! the host UI can request. Structural mutations (add, delete) record a
//! pre-mutation snapshot; position and style edits do not.

use crate::{
    EditKey, Element, ElementKind, History, ImageAsset, PointerEvent, PointerPhase, ProjectDocument,
    Scene, Template, TextAlign, Transform,
};

/// Pixel radius for snap-to-center magnetism during drags.
pub const SNAP_RADIUS: f32 = 10.0;

/// Arrow-key nudge distance in pixels.
pub const NUDGE_STEP: f32 = 5.0;

/// Default content for freshly added text elements.
const DEFAULT_TEXT: &str = "Text Here";

/// Default font family for freshly added text elements.
const DEFAULT_FONT: &str = "Roboto";

/// Newly placed images are clamped to this box, per axis.
const MAX_IMAGE_WIDTH: f32 = 200.0;
const MAX_IMAGE_HEIGHT: f32 = 140.0;

/// Drag state captured on pointer-down: the grab point in the element's
/// local (unrotated) frame.
#[derive(Debug, Clone, Copy)]
struct DragState {
    offset_x: f32,
    offset_y: f32,
}

/// An interactive editing session over a scene.
#[derive(Debug, Clone, Default)]
pub struct Editor {
    scene: Scene,
    history: History,
    drag: Option<DragState>,
    show_grid: bool,
}

impl Editor {
    /// Create an editor over an empty scene with the given canvas size.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            scene: Scene::new(width, height),
            history: History::new(),
            drag: None,
            show_grid: false,
        }
    }

    /// Create an editor over an existing scene.
    #[must_use]
    pub fn with_scene(scene: Scene) -> Self {
        Self {
            scene,
            history: History::new(),
            drag: None,
            show_grid: false,
        }
    }

    /// The scene being edited.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The undo/redo history.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Whether the alignment grid overlay is enabled.
    #[must_use]
    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    /// Toggle the alignment grid overlay, returning the new state.
    pub fn toggle_grid(&mut self) -> bool {
        self.show_grid = !self.show_grid;
        self.show_grid
    }

    // -----------------------------------------------------------------------
    // Scene mutation operations
    // -----------------------------------------------------------------------

    /// Append a text element with default styling at the canvas center.
    /// Returns its index.
    pub fn add_text(&mut self) -> usize {
        self.add_text_with(DEFAULT_TEXT)
    }

    /// Append a text element with the given content and default styling.
    pub fn add_text_with(&mut self, content: &str) -> usize {
        self.history.record(self.scene.elements().to_vec());
        let (cx, cy) = self.scene.center();
        let element = Element::new(ElementKind::Text {
            content: content.to_string(),
            font_family: DEFAULT_FONT.to_string(),
            font_size: 64.0,
            color: "#fff".to_string(),
            align: TextAlign::Center,
            stroke: false,
            shadow: false,
            background: None,
        })
        .with_transform(Transform {
            x: cx,
            y: cy,
            width: 300.0,
            height: 80.0,
            rotation: 0.0,
            layer: self.scene.next_layer(),
            corner_radius: 0.0,
        });
        tracing::debug!("Added text element at ({cx}, {cy})");
        self.scene.add_element(element)
    }

    /// Append a decoded image, clamped per axis to the default placement
    /// box. Returns its index.
    pub fn add_image(&mut self, asset: ImageAsset) -> usize {
        self.history.record(self.scene.elements().to_vec());
        let (cx, cy) = self.scene.center();
        let width = asset.width.min(MAX_IMAGE_WIDTH);
        let height = asset.height.min(MAX_IMAGE_HEIGHT);
        let element = Element::new(ElementKind::Image {
            src: asset.src,
            format: asset.format,
        })
        .with_transform(Transform {
            x: cx - 100.0,
            y: cy - 70.0,
            width,
            height,
            rotation: 0.0,
            layer: self.scene.next_layer(),
            corner_radius: 0.0,
        });
        tracing::debug!("Added image element ({width}x{height})");
        self.scene.add_element(element)
    }

    /// Delete the selected element. Returns `false` when nothing is
    /// selected.
    pub fn delete_selected(&mut self) -> bool {
        let Some(index) = self.scene.selected() else {
            return false;
        };
        self.history.record(self.scene.elements().to_vec());
        tracing::debug!("Deleted element {index}");
        self.scene.remove_element(index).is_ok()
    }

    /// Move the selected element by a delta, without snapping.
    pub fn nudge(&mut self, dx: f32, dy: f32) {
        if let Some(element) = self.scene.selected_element_mut() {
            element.transform.x += dx;
            element.transform.y += dy;
        }
    }

    /// Raise the selected element one layer step. No-op when it already
    /// holds the highest layer.
    pub fn bring_forward(&mut self) {
        let Some(index) = self.scene.selected() else {
            return;
        };
        let Some(max) = self.scene.max_layer() else {
            return;
        };
        if let Some(element) = self.scene.element_mut(index) {
            if element.transform.layer == max {
                return;
            }
            element.transform.layer += 1;
        }
    }

    /// Lower the selected element one layer step. No-op when it already
    /// holds the lowest layer.
    pub fn send_back(&mut self) {
        let Some(index) = self.scene.selected() else {
            return;
        };
        let Some(min) = self.scene.min_layer() else {
            return;
        };
        if let Some(element) = self.scene.element_mut(index) {
            if element.transform.layer == min {
                return;
            }
            element.transform.layer -= 1;
        }
    }

    // -----------------------------------------------------------------------
    // Style edits (text elements only; silently ignored otherwise)
    // -----------------------------------------------------------------------

    /// Replace the selected text element's content.
    pub fn set_content(&mut self, content: &str) {
        if let Some(ElementKind::Text { content: c, .. }) = self.selected_text_kind() {
            *c = content.to_string();
        }
    }

    /// Set the selected text element's font family.
    pub fn set_font_family(&mut self, family: &str) {
        if let Some(ElementKind::Text { font_family, .. }) = self.selected_text_kind() {
            *font_family = family.to_string();
        }
    }

    /// Set the selected text element's font size in pixels.
    pub fn set_font_size(&mut self, size: f32) {
        if let Some(ElementKind::Text { font_size, .. }) = self.selected_text_kind() {
            *font_size = size;
        }
    }

    /// Set the selected text element's fill color.
    pub fn set_color(&mut self, color: &str) {
        if let Some(ElementKind::Text { color: c, .. }) = self.selected_text_kind() {
            *c = color.to_string();
        }
    }

    /// Set the selected text element's alignment.
    pub fn set_align(&mut self, align: TextAlign) {
        if let Some(ElementKind::Text { align: a, .. }) = self.selected_text_kind() {
            *a = align;
        }
    }

    /// Toggle the black outline on the selected text element.
    pub fn set_stroke(&mut self, stroke: bool) {
        if let Some(ElementKind::Text { stroke: s, .. }) = self.selected_text_kind() {
            *s = stroke;
        }
    }

    /// Toggle the drop shadow on the selected text element.
    pub fn set_shadow(&mut self, shadow: bool) {
        if let Some(ElementKind::Text { shadow: s, .. }) = self.selected_text_kind() {
            *s = shadow;
        }
    }

    /// Set or clear the fill painted behind the selected text element.
    pub fn set_text_background(&mut self, background: Option<String>) {
        if let Some(ElementKind::Text { background: b, .. }) = self.selected_text_kind() {
            *b = background;
        }
    }

    /// Set the selected text element's rotation in degrees.
    pub fn set_rotation(&mut self, degrees: f32) {
        if let Some(element) = self.selected_text_mut() {
            element.transform.rotation = degrees;
        }
    }

    /// Set the selected text element's corner radius in pixels.
    pub fn set_corner_radius(&mut self, radius: f32) {
        if let Some(element) = self.selected_text_mut() {
            element.transform.corner_radius = radius;
        }
    }

    fn selected_text_mut(&mut self) -> Option<&mut Element> {
        let element = self.scene.selected_element_mut()?;
        if element.is_text() {
            Some(element)
        } else {
            None
        }
    }

    fn selected_text_kind(&mut self) -> Option<&mut ElementKind> {
        self.selected_text_mut().map(|e| &mut e.kind)
    }

    // -----------------------------------------------------------------------
    // Undo / redo
    // -----------------------------------------------------------------------

    /// Restore the most recent snapshot. Clears the selection. Returns
    /// `false` when the undo stack is empty.
    pub fn undo(&mut self) -> bool {
        let current = self.scene.elements().to_vec();
        if let Some(snapshot) = self.history.undo(current) {
            self.scene.replace_elements(snapshot);
            tracing::debug!("Undo ({} steps left)", self.history.undo_depth());
            true
        } else {
            false
        }
    }

    /// Re-apply the most recently undone snapshot. Clears the selection.
    /// Returns `false` when the redo stack is empty.
    pub fn redo(&mut self) -> bool {
        let current = self.scene.elements().to_vec();
        if let Some(snapshot) = self.history.redo(current) {
            self.scene.replace_elements(snapshot);
            tracing::debug!("Redo ({} steps queued)", self.history.redo_depth());
            true
        } else {
            false
        }
    }

    // -----------------------------------------------------------------------
    // Pointer interaction
    // -----------------------------------------------------------------------

    /// Dispatch a pointer event to the down/move/up handlers.
    pub fn handle_pointer(&mut self, event: &PointerEvent) {
        match event.phase {
            PointerPhase::Down => {
                let _ = self.pointer_down(event.x, event.y);
            }
            PointerPhase::Move => self.pointer_move(event.x, event.y),
            PointerPhase::Up => self.pointer_up(),
        }
    }

    /// Hit-test the point against elements top-most-first. On a hit the
    /// element is selected and a drag begins with the grab offset recorded
    /// in the element's local frame; on a miss the selection is cleared.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> Option<usize> {
        if let Some(index) = self.scene.element_at(x, y) {
            self.scene.set_selected(index);
            let element = self.scene.element(index)?;
            let (offset_x, offset_y) = element.local_point(x, y);
            self.drag = Some(DragState { offset_x, offset_y });
            Some(index)
        } else {
            self.scene.clear_selection();
            self.drag = None;
            None
        }
    }

    /// While a drag is active, reposition the selected element so the grab
    /// offset stays under the pointer, then apply axis-independent
    /// snap-to-center magnetism.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        let Some(drag) = self.drag else {
            return;
        };
        let (cx, cy) = self.scene.center();
        let Some(element) = self.scene.selected_element_mut() else {
            return;
        };
        let t = &mut element.transform;
        t.x = x - drag.offset_x;
        t.y = y - drag.offset_y;
        if (t.x - cx).abs() < SNAP_RADIUS {
            t.x = cx;
        }
        if (t.y - cy).abs() < SNAP_RADIUS {
            t.y = cy;
        }
    }

    /// End the active drag, if any.
    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    /// Whether a drag is currently active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    // -----------------------------------------------------------------------
    // Keyboard
    // -----------------------------------------------------------------------

    /// Apply an editing key. Ignored when nothing is selected.
    pub fn handle_key(&mut self, key: EditKey) {
        if self.scene.selected().is_none() {
            return;
        }
        match key {
            EditKey::ArrowUp => self.nudge(0.0, -NUDGE_STEP),
            EditKey::ArrowDown => self.nudge(0.0, NUDGE_STEP),
            EditKey::ArrowLeft => self.nudge(-NUDGE_STEP, 0.0),
            EditKey::ArrowRight => self.nudge(NUDGE_STEP, 0.0),
            EditKey::Delete => {
                let _ = self.delete_selected();
            }
            EditKey::Tab => self.cycle_selection(),
        }
    }

    /// Select the element at `index`. Ignored when out of bounds.
    pub fn select(&mut self, index: usize) {
        self.scene.set_selected(index);
    }

    /// Move the selection to the next element, wrapping around.
    pub fn cycle_selection(&mut self) {
        let Some(index) = self.scene.selected() else {
            return;
        };
        let len = self.scene.len();
        if len > 0 {
            self.scene.set_selected((index + 1) % len);
        }
    }

    // -----------------------------------------------------------------------
    // Canvas controls
    // -----------------------------------------------------------------------

    /// Resize the canvas.
    pub fn set_canvas_size(&mut self, width: f32, height: f32) {
        self.scene.width = width;
        self.scene.height = height;
    }

    /// Set the background image source reference.
    pub fn set_background(&mut self, src: impl Into<String>) {
        self.scene.background = Some(src.into());
    }

    /// Remove the background image.
    pub fn clear_background(&mut self) {
        self.scene.background = None;
    }

    // -----------------------------------------------------------------------
    // Templates and documents
    // -----------------------------------------------------------------------

    /// Replace the element list with a copy of the template's elements.
    /// Clears the selection.
    pub fn apply_template(&mut self, template: &Template) {
        tracing::debug!("Applying template '{}'", template.name);
        self.scene.replace_elements(template.elements.clone());
    }

    /// Capture the whole project state for persistence.
    #[must_use]
    pub fn save_document(&self) -> ProjectDocument {
        ProjectDocument::from_scene(&self.scene)
    }

    /// Replace the scene from a persisted document. Clears the selection
    /// and drops the drag state; history is kept.
    pub fn load_document(&mut self, document: ProjectDocument) {
        self.scene = document.into_scene();
        self.drag = None;
    }

    // -----------------------------------------------------------------------
    // Status readout
    // -----------------------------------------------------------------------

    /// Live position/size readout for the selected element, or `None` when
    /// nothing is selected.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn status_line(&self) -> Option<String> {
        use std::fmt::Write;

        let element = self.scene.selected_element()?;
        let t = &element.transform;
        let mut line = format!(
            "X:{} Y:{} | W:{} H:{}",
            t.x.trunc() as i32,
            t.y.trunc() as i32,
            t.width.trunc() as i32,
            t.height.trunc() as i32,
        );
        if element.is_text() {
            let _ = write!(line, " | rot:{}", t.rotation);
        }
        Some(line)
    }
}
