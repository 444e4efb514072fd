//! golboard Core Library
//!
//! Platform-agnostic input normalization and clipboard bridging for the
//! golboard LiveView front-end. Every browser facility is reached through a
//! small capability trait so the logic can be driven by synthetic events.

pub mod clipboard;
pub mod config;
pub mod gesture;
pub mod helpers;
pub mod normalize;
pub mod surface;
pub mod touch;

pub use clipboard::{
    ClipboardBridge, ClipboardError, CopyError, CopyEvent, CopyOutcome, CopyPayload, CopyRequest,
    CopyTarget, Document, PlatformClipboard, ScriptBridge,
};
pub use config::{ConfigError, CopyConfig, HelpersConfig, HookConfig, SurfaceConfig};
pub use gesture::{GestureInput, GesturePhase, GestureState, SurfaceEvent};
pub use normalize::{LOGICAL_GRID, NormalizedOffset, normalize};
pub use surface::{
    CoordinateNormalizer, EventSink, RawPointerSample, SamplePosition, Surface, SurfaceBounds,
};
pub use touch::TouchSample;
