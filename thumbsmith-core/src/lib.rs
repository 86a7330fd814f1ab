//! # Thumbsmith Core
//!
//! Scene and interaction logic for composing fixed-size raster thumbnails.
//! Compiles to WASM for true cross-platform portability.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │            thumbsmith-core.wasm             │
//! ├─────────────────────────────────────────────┤
//! │  Scene Graph     │  Input Handler           │
//! │  - Elements      │  - Pointer hit-testing   │
//! │  - Layer order   │  - Drag + center snap    │
//! │  - Background    │  - Keyboard nudges       │
//! ├─────────────────────────────────────────────┤
//! │  History         │  Persistence             │
//! │  - Undo stack    │  - Project documents     │
//! │  - Redo stack    │  - Key-value store       │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod document;
pub mod editor;
pub mod element;
pub mod error;
pub mod event;
pub mod history;
pub mod scene;
pub mod store;
pub mod template;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use document::{CanvasSize, ProjectDocument};
pub use editor::{Editor, NUDGE_STEP, SNAP_RADIUS};
pub use element::{Element, ElementId, ElementKind, ImageAsset, ImageFormat, TextAlign, Transform};
pub use error::{SceneError, SceneResult};
pub use event::{EditKey, PointerEvent, PointerPhase};
pub use history::{History, Snapshot, MAX_UNDO_DEPTH};
pub use scene::Scene;
pub use store::{ProjectStore, StoreError, DEFAULT_KEY};
pub use template::{builtin_template, builtin_templates, Template};

/// Core crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
