//! Scene elements - the layered building blocks of a thumbnail.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Create a new unique element ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Horizontal text alignment relative to the element center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Text grows rightward from the center.
    Left,
    /// Text is centered on the element center.
    Center,
    /// Text grows leftward from the center.
    Right,
}

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// PNG image.
    Png,
    /// JPEG image.
    Jpeg,
    /// SVG vector image.
    Svg,
    /// WebP image.
    WebP,
}

impl ImageFormat {
    /// Detect format from file extension.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "svg" => Some(Self::Svg),
            "webp" => Some(Self::WebP),
            _ => None,
        }
    }

    /// Detect format from MIME type.
    #[must_use]
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.to_lowercase().as_str() {
            "image/png" => Some(Self::Png),
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/svg+xml" => Some(Self::Svg),
            "image/webp" => Some(Self::WebP),
            _ => None,
        }
    }

    /// The MIME type for this format.
    #[must_use]
    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Svg => "image/svg+xml",
            Self::WebP => "image/webp",
        }
    }
}

/// The type of content an element contains.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ElementKind {
    /// A styled text layer.
    Text {
        /// Text content.
        content: String,
        /// Font family name.
        font_family: String,
        /// Font size in pixels.
        font_size: f32,
        /// Fill color as hex.
        color: String,
        /// Horizontal alignment.
        align: TextAlign,
        /// Draw a black outline behind the fill.
        stroke: bool,
        /// Draw a drop shadow.
        shadow: bool,
        /// Optional fill color painted behind the text box.
        background: Option<String>,
    },

    /// A 2D image layer.
    Image {
        /// Image source URI or base64 data.
        src: String,
        /// Image format.
        format: ImageFormat,
    },
}

/// Transform for positioning and sizing elements.
///
/// `x`/`y` locate the element *center*; rotation happens about it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Transform {
    /// Center X position in canvas pixels.
    pub x: f32,
    /// Center Y position in canvas pixels.
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
    /// Rotation in degrees.
    pub rotation: f32,
    /// Layer value for paint order (higher paints later, ties allowed).
    pub layer: i32,
    /// Corner radius in pixels for rounded clipping.
    pub corner_radius: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
            rotation: 0.0,
            layer: 0,
            corner_radius: 0.0,
        }
    }
}

/// A scene element with content and transform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    /// Unique identifier.
    pub id: ElementId,
    /// Element content type.
    pub kind: ElementKind,
    /// Position, size, rotation and layer.
    pub transform: Transform,
}

impl Element {
    /// Create a new element with the given kind.
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        Self {
            id: ElementId::new(),
            kind,
            transform: Transform::default(),
        }
    }

    /// Set the transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Whether this is a text element.
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self.kind, ElementKind::Text { .. })
    }

    /// Whether this is an image element.
    #[must_use]
    pub fn is_image(&self) -> bool {
        matches!(self.kind, ElementKind::Image { .. })
    }

    /// Transform a canvas-space point into the element's local (unrotated)
    /// frame, relative to the element center.
    #[must_use]
    pub fn local_point(&self, x: f32, y: f32) -> (f32, f32) {
        let t = &self.transform;
        let dx = x - t.x;
        let dy = y - t.y;
        let theta = -t.rotation.to_radians();
        let (sin, cos) = theta.sin_cos();
        (cos * dx - sin * dy, sin * dx + cos * dy)
    }

    /// Check if a point (in canvas coordinates) falls within this element's
    /// bounding box, honoring rotation. The box edges are exclusive.
    #[must_use]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        let (lx, ly) = self.local_point(x, y);
        let t = &self.transform;
        lx > -t.width / 2.0 && lx < t.width / 2.0 && ly > -t.height / 2.0 && ly < t.height / 2.0
    }
}

/// A decoded image ready to be placed in the scene.
///
/// Decoding is the host's asynchronous boundary; once it completes, the
/// natural dimensions travel with the source reference so initial placement
/// can clamp the element box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageAsset {
    /// Image source URI or base64 data.
    pub src: String,
    /// Image format.
    pub format: ImageFormat,
    /// Natural width in pixels.
    pub width: f32,
    /// Natural height in pixels.
    pub height: f32,
}

impl ImageAsset {
    /// Create a new asset from a decoded image.
    #[must_use]
    pub fn new(src: impl Into<String>, format: ImageFormat, width: f32, height: f32) -> Self {
        Self {
            src: src.into(),
            format,
            width,
            height,
        }
    }
}
