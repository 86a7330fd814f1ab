//! WebAssembly bindings for thumbsmith-core.
//!
//! This module provides JavaScript-callable functions when compiled to
//! WASM, so a browser host can route pointer, keyboard, and form-control
//! events into the editor.

use wasm_bindgen::prelude::*;

use crate::{
    builtin_template, EditKey, Editor, ImageAsset, ImageFormat, ProjectDocument, TextAlign,
};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();
}

/// Editor instance for WASM hosts.
#[wasm_bindgen]
pub struct WasmEditor {
    editor: Editor,
}

#[wasm_bindgen]
impl WasmEditor {
    /// Create an editor with the given canvas size.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            editor: Editor::new(width, height),
        }
    }

    /// Pointer press at canvas coordinates. Returns `true` on a hit.
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f32, y: f32) -> bool {
        self.editor.pointer_down(x, y).is_some()
    }

    /// Pointer movement at canvas coordinates.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.editor.pointer_move(x, y);
    }

    /// Pointer release.
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) {
        self.editor.pointer_up();
    }

    /// Apply a DOM key name (e.g. `"ArrowUp"`, `"Delete"`, `"Tab"`).
    /// Returns `false` for keys the editor does not handle.
    #[wasm_bindgen(js_name = handleKey)]
    pub fn handle_key(&mut self, name: &str) -> bool {
        if let Some(key) = EditKey::from_name(name) {
            self.editor.handle_key(key);
            true
        } else {
            false
        }
    }

    /// Add a default-styled text element. Returns its index.
    #[wasm_bindgen(js_name = addText)]
    pub fn add_text(&mut self) -> usize {
        self.editor.add_text()
    }

    /// Add a decoded image by source reference and natural size.
    /// Returns its index.
    #[wasm_bindgen(js_name = addImage)]
    pub fn add_image(&mut self, src: String, width: f32, height: f32) -> usize {
        let format = format_from_src(&src);
        self.editor
            .add_image(ImageAsset::new(src, format, width, height))
    }

    /// Delete the selected element.
    #[wasm_bindgen(js_name = deleteSelected)]
    pub fn delete_selected(&mut self) -> bool {
        self.editor.delete_selected()
    }

    /// Undo the latest structural mutation.
    pub fn undo(&mut self) -> bool {
        self.editor.undo()
    }

    /// Redo the latest undone mutation.
    pub fn redo(&mut self) -> bool {
        self.editor.redo()
    }

    /// Raise the selected element one layer step.
    #[wasm_bindgen(js_name = bringForward)]
    pub fn bring_forward(&mut self) {
        self.editor.bring_forward();
    }

    /// Lower the selected element one layer step.
    #[wasm_bindgen(js_name = sendBack)]
    pub fn send_back(&mut self) {
        self.editor.send_back();
    }

    /// Replace the selected text element's content.
    #[wasm_bindgen(js_name = setContent)]
    pub fn set_content(&mut self, content: &str) {
        self.editor.set_content(content);
    }

    /// Set the selected text element's font family.
    #[wasm_bindgen(js_name = setFontFamily)]
    pub fn set_font_family(&mut self, family: &str) {
        self.editor.set_font_family(family);
    }

    /// Set the selected text element's font size.
    #[wasm_bindgen(js_name = setFontSize)]
    pub fn set_font_size(&mut self, size: f32) {
        self.editor.set_font_size(size);
    }

    /// Set the selected text element's fill color.
    #[wasm_bindgen(js_name = setColor)]
    pub fn set_color(&mut self, color: &str) {
        self.editor.set_color(color);
    }

    /// Set the selected text element's alignment
    /// (`"left"`, `"center"`, `"right"`).
    #[wasm_bindgen(js_name = setAlign)]
    pub fn set_align(&mut self, align: &str) {
        let align = match align {
            "left" => TextAlign::Left,
            "right" => TextAlign::Right,
            _ => TextAlign::Center,
        };
        self.editor.set_align(align);
    }

    /// Toggle the black outline on the selected text element.
    #[wasm_bindgen(js_name = setStroke)]
    pub fn set_stroke(&mut self, stroke: bool) {
        self.editor.set_stroke(stroke);
    }

    /// Toggle the drop shadow on the selected text element.
    #[wasm_bindgen(js_name = setShadow)]
    pub fn set_shadow(&mut self, shadow: bool) {
        self.editor.set_shadow(shadow);
    }

    /// Set the selected text element's rotation in degrees.
    #[wasm_bindgen(js_name = setRotation)]
    pub fn set_rotation(&mut self, degrees: f32) {
        self.editor.set_rotation(degrees);
    }

    /// Set the selected text element's corner radius.
    #[wasm_bindgen(js_name = setCornerRadius)]
    pub fn set_corner_radius(&mut self, radius: f32) {
        self.editor.set_corner_radius(radius);
    }

    /// Resize the canvas.
    #[wasm_bindgen(js_name = setCanvasSize)]
    pub fn set_canvas_size(&mut self, width: f32, height: f32) {
        self.editor.set_canvas_size(width, height);
    }

    /// Set the background image source reference.
    #[wasm_bindgen(js_name = setBackground)]
    pub fn set_background(&mut self, src: String) {
        self.editor.set_background(src);
    }

    /// Remove the background image.
    #[wasm_bindgen(js_name = clearBackground)]
    pub fn clear_background(&mut self) {
        self.editor.clear_background();
    }

    /// Toggle the alignment grid, returning the new state.
    #[wasm_bindgen(js_name = toggleGrid)]
    pub fn toggle_grid(&mut self) -> bool {
        self.editor.toggle_grid()
    }

    /// Apply a built-in template by name. Returns `false` for unknown
    /// names.
    #[wasm_bindgen(js_name = applyTemplate)]
    pub fn apply_template(&mut self, name: &str) -> bool {
        if let Some(template) = builtin_template(name) {
            self.editor.apply_template(&template);
            true
        } else {
            false
        }
    }

    /// Live position/size readout for the selected element.
    #[wasm_bindgen(js_name = statusLine)]
    #[must_use]
    pub fn status_line(&self) -> Option<String> {
        self.editor.status_line()
    }

    /// Get the current scene as JSON.
    #[wasm_bindgen(js_name = getSceneJson)]
    #[must_use]
    pub fn get_scene_json(&self) -> String {
        self.editor.scene().to_json().unwrap_or_default()
    }

    /// Serialize the whole project state as a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error string if serialization fails.
    #[wasm_bindgen(js_name = saveDocument)]
    pub fn save_document(&self) -> Result<String, String> {
        serde_json::to_string(&self.editor.save_document()).map_err(|e| e.to_string())
    }

    /// Replace the project state from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error string if JSON parsing fails.
    #[wasm_bindgen(js_name = loadDocument)]
    pub fn load_document(&mut self, json: &str) -> Result<(), String> {
        let document: ProjectDocument = serde_json::from_str(json).map_err(|e| e.to_string())?;
        self.editor.load_document(document);
        Ok(())
    }
}

impl Default for WasmEditor {
    fn default() -> Self {
        Self::new(crate::scene::DEFAULT_WIDTH, crate::scene::DEFAULT_HEIGHT)
    }
}

/// Best-effort format detection from a data URI or file extension.
fn format_from_src(src: &str) -> ImageFormat {
    if let Some(rest) = src.strip_prefix("data:") {
        let mime = rest.split([';', ',']).next().unwrap_or_default();
        return ImageFormat::from_mime(mime).unwrap_or(ImageFormat::Png);
    }
    src.rsplit('.')
        .next()
        .and_then(ImageFormat::from_extension)
        .unwrap_or(ImageFormat::Png)
}
