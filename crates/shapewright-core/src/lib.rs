//! Shapewright Core Library
//!
//! Platform-agnostic shape editing: vector shapes with region algebra, an
//! ordered document, pointer-driven move/resize/create/compose gestures and the
//! line-oriented document format.

pub mod codec;
pub mod config;
pub mod document;
pub mod geometry;
pub mod input;
pub mod interaction;
pub mod selection;
pub mod shapes;
pub mod storage;

pub use codec::{CodecError, CodecResult};
pub use config::{ConfigError, EditorConfig, RemoteConfig};
pub use document::{Background, DepthAction, Document, ImageRef};
pub use input::{MouseButton, PointerEvent};
pub use interaction::{CreationPreview, Editor, EditorEvent, Mode};
pub use selection::{Handle, HitZone};
pub use shapes::{Axis, CompositionOp, Rgb, Shape, ShapeId, ShapeKind};
pub use storage::{FileStorage, MemoryStorage, PersistenceError, RemoteSession, Storage};
