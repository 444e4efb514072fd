//! Replay of synthetic input scripts through a coordinate normalizer.
//!
//! A script describes a surface and a sequence of pointer, touch and resize
//! events:
//! ```json
//! {
//!   "surface": { "width": 500, "height": 500 },
//!   "events": [
//!     { "type": "pointer_down", "x": 10, "y": 10 },
//!     { "type": "pointer_move", "x": 60, "y": 60 },
//!     { "type": "touch_move", "touches": [{ "x": 80, "y": 80 }], "scale": 0.8 },
//!     { "type": "resize", "width": 250, "height": 250 }
//!   ]
//! }
//! ```
//! Every emitted event is written as one JSON object per line.

use std::cell::{Cell, RefCell};
use std::io::{self, Read, Write};

use golboard_core::{
    CoordinateNormalizer, EventSink, RawPointerSample, Surface, SurfaceBounds, SurfaceConfig,
    SurfaceEvent, TouchSample,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Replay errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid script: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Bounding rectangle of the replayed surface in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceRect {
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl SurfaceRect {
    pub fn to_bounds(self) -> SurfaceBounds {
        SurfaceBounds::new(self.left, self.top, self.width, self.height)
    }
}

/// One scripted input. Pointer positions are surface-relative, touch
/// positions are viewport positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplayEvent {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    TouchStart(TouchSample),
    TouchMove(TouchSample),
    TouchEnd(TouchSample),
    Resize(SurfaceRect),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    pub surface: SurfaceRect,
    #[serde(default)]
    pub config: SurfaceConfig,
    #[serde(default)]
    pub events: Vec<ReplayEvent>,
}

/// Surface whose bounds the script can change between samples.
struct ScriptSurface {
    bounds: Cell<SurfaceBounds>,
}

impl Surface for ScriptSurface {
    fn bounds(&self) -> SurfaceBounds {
        self.bounds.get()
    }
}

#[derive(Default)]
struct CollectingSink {
    events: RefCell<Vec<SurfaceEvent>>,
}

impl EventSink for CollectingSink {
    fn push_event(&self, event: SurfaceEvent) {
        self.events.borrow_mut().push(event);
    }
}

/// Load a script from `path`, or from stdin when `path` is `-`.
pub fn load_script(path: &str) -> Result<ReplayScript, ReplayError> {
    let json = if path == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&json)?)
}

/// Feed every scripted event through a fresh normalizer and return what it emitted.
pub fn replay(script: &ReplayScript) -> Vec<SurfaceEvent> {
    let surface = ScriptSurface {
        bounds: Cell::new(script.surface.to_bounds()),
    };
    let sink = CollectingSink::default();
    let mut normalizer = CoordinateNormalizer::with_config(&surface, &sink, script.config.clone());

    for event in &script.events {
        match event {
            ReplayEvent::PointerDown { x, y } => {
                normalizer.pointer_down(RawPointerSample::offset(*x, *y));
            }
            ReplayEvent::PointerMove { x, y } => {
                normalizer.pointer_move(RawPointerSample::offset(*x, *y));
            }
            ReplayEvent::PointerUp { x, y } => {
                normalizer.pointer_up(RawPointerSample::offset(*x, *y));
            }
            ReplayEvent::TouchStart(sample) => {
                normalizer.touch_start(sample);
            }
            ReplayEvent::TouchMove(sample) => {
                normalizer.touch_move(sample);
            }
            ReplayEvent::TouchEnd(sample) => {
                normalizer.touch_end(sample);
            }
            ReplayEvent::Resize(rect) => {
                log::debug!("Surface resized to {}x{}", rect.width, rect.height);
                surface.bounds.set(rect.to_bounds());
            }
        }
    }

    log::info!(
        "Replayed {} input events, {} emitted",
        script.events.len(),
        sink.events.borrow().len()
    );
    sink.events.take()
}

/// Replay `script` and write each emitted event as a JSON line.
pub fn run<W: Write>(script: &ReplayScript, out: &mut W) -> Result<(), ReplayError> {
    for event in replay(script) {
        serde_json::to_writer(&mut *out, &event)?;
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use golboard_core::NormalizedOffset;

    fn write_script(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_drag_on_half_size_surface() {
        let file = write_script(
            r#"{
                "surface": { "width": 500, "height": 500 },
                "events": [
                    { "type": "pointer_down", "x": 10, "y": 10 },
                    { "type": "pointer_move", "x": 60, "y": 60 },
                    { "type": "pointer_move", "x": 80, "y": 80 }
                ]
            }"#,
        );
        let script = load_script(file.path().to_str().unwrap()).unwrap();

        assert_eq!(
            replay(&script),
            vec![SurfaceEvent::Draw(NormalizedOffset::new(160, 160))]
        );
    }

    #[test]
    fn test_fractional_surface_origin() {
        let script: ReplayScript = serde_json::from_str(
            r#"{
                "surface": { "left": 17.7, "top": 17.7, "width": 500, "height": 500 },
                "events": [
                    { "type": "pointer_down", "x": 10, "y": 10 },
                    { "type": "pointer_move", "x": 60, "y": 60 },
                    { "type": "pointer_move", "x": 80, "y": 80 }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(
            replay(&script),
            vec![SurfaceEvent::Draw(NormalizedOffset::new(160, 160))]
        );
    }

    #[test]
    fn test_tap_writes_click_line() {
        let file = write_script(
            r#"{
                "surface": { "width": 1000, "height": 1000 },
                "events": [
                    { "type": "pointer_down", "x": 200, "y": 200 },
                    { "type": "pointer_up", "x": 200, "y": 200 }
                ]
            }"#,
        );
        let script = load_script(file.path().to_str().unwrap()).unwrap();
        let mut out = Vec::new();
        run(&script, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"event\":\"click\",\"offset_x\":200,\"offset_y\":200}\n"
        );
    }

    #[test]
    fn test_pinch_and_resize() {
        let script: ReplayScript = serde_json::from_str(
            r#"{
                "surface": { "left": 100, "top": 100, "width": 500, "height": 500 },
                "events": [
                    { "type": "touch_start", "touches": [{ "x": 110, "y": 110 }] },
                    { "type": "touch_move", "touches": [{ "x": 150, "y": 150 }, { "x": 300, "y": 300 }], "scale": 0.8 },
                    { "type": "touch_move", "touches": [{ "x": 160, "y": 160 }] },
                    { "type": "resize", "left": 100, "top": 100, "width": 250, "height": 250 },
                    { "type": "touch_move", "touches": [{ "x": 150, "y": 150 }] },
                    { "type": "touch_end", "touches": [] }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(
            replay(&script),
            vec![SurfaceEvent::Draw(NormalizedOffset::new(200, 200))]
        );
    }

    #[test]
    fn test_missing_file() {
        let result = load_script("/nonexistent/golboard/script.json");
        assert!(matches!(result, Err(ReplayError::Io(_))));
    }

    #[test]
    fn test_invalid_script() {
        let file = write_script(r#"{ "events": [] }"#);
        let result = load_script(file.path().to_str().unwrap());
        assert!(matches!(result, Err(ReplayError::Parse(_))));
    }
}
