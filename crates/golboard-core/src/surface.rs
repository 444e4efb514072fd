//! Drawing surface input: raw pointer and touch samples in, `draw` and
//! `click` events out.
//!
//! The normalizer owns the gesture state of exactly one surface. It reaches
//! the element and the server only through [`Surface`] and [`EventSink`],
//! so it can be fed synthetic event sequences without a document.

use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

use crate::config::SurfaceConfig;
use crate::gesture::{GestureInput, GestureState, SurfaceEvent};
use crate::normalize::normalize;
use crate::touch::TouchSample;

/// Measured placement of a surface in viewport coordinates.
///
/// The size is kept as measured rather than derived from corner
/// coordinates, which would round on fractional origins.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfaceBounds {
    /// Top-left corner.
    pub origin: Point,
    pub size: Size,
}

impl SurfaceBounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }
}

/// The element gestures are tracked on.
pub trait Surface {
    /// Current bounds in viewport coordinates.
    fn bounds(&self) -> SurfaceBounds;
}

/// Receiver of outbound surface events.
pub trait EventSink {
    fn push_event(&self, event: SurfaceEvent);
}

impl<S: Surface + ?Sized> Surface for &S {
    fn bounds(&self) -> SurfaceBounds {
        (**self).bounds()
    }
}

impl<K: EventSink + ?Sized> EventSink for &K {
    fn push_event(&self, event: SurfaceEvent) {
        (**self).push_event(event)
    }
}

/// Where a pointer sample's coordinates are measured from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplePosition {
    /// Relative to the surface's top-left corner (`offsetX`/`offsetY`).
    Offset(Point),
    /// Relative to the viewport (`clientX`/`clientY`).
    Client(Point),
}

/// A single mouse/pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawPointerSample {
    pub position: SamplePosition,
}

impl RawPointerSample {
    pub fn offset(x: f64, y: f64) -> Self {
        Self {
            position: SamplePosition::Offset(Point::new(x, y)),
        }
    }

    pub fn client(x: f64, y: f64) -> Self {
        Self {
            position: SamplePosition::Client(Point::new(x, y)),
        }
    }

    /// Position relative to `origin`, the surface's top-left corner.
    pub fn surface_position(&self, origin: Point) -> Point {
        match self.position {
            SamplePosition::Offset(point) => point,
            SamplePosition::Client(point) => Point::new(point.x - origin.x, point.y - origin.y),
        }
    }
}

/// Translates the input of one surface into a `draw`/`click` stream.
pub struct CoordinateNormalizer<S, K> {
    surface: S,
    sink: K,
    config: SurfaceConfig,
    state: GestureState,
}

impl<S: Surface, K: EventSink> CoordinateNormalizer<S, K> {
    pub fn new(surface: S, sink: K) -> Self {
        Self::with_config(surface, sink, SurfaceConfig::default())
    }

    pub fn with_config(surface: S, sink: K, config: SurfaceConfig) -> Self {
        Self {
            surface,
            sink,
            config,
            state: GestureState::default(),
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn pointer_down(&mut self, sample: RawPointerSample) -> Option<SurfaceEvent> {
        self.pointer(GestureInput::Down, sample)
    }

    pub fn pointer_move(&mut self, sample: RawPointerSample) -> Option<SurfaceEvent> {
        self.pointer(GestureInput::Move, sample)
    }

    pub fn pointer_up(&mut self, sample: RawPointerSample) -> Option<SurfaceEvent> {
        self.pointer(GestureInput::Up, sample)
    }

    pub fn touch_start(&mut self, sample: &TouchSample) -> Option<SurfaceEvent> {
        self.touch(GestureInput::Down, sample)
    }

    pub fn touch_move(&mut self, sample: &TouchSample) -> Option<SurfaceEvent> {
        self.touch(GestureInput::Move, sample)
    }

    pub fn touch_end(&mut self, sample: &TouchSample) -> Option<SurfaceEvent> {
        self.touch(GestureInput::Up, sample)
    }

    fn pointer(&mut self, input: GestureInput, sample: RawPointerSample) -> Option<SurfaceEvent> {
        let bounds = self.surface.bounds();
        self.feed(input, sample.surface_position(bounds.origin), bounds.size)
    }

    fn touch(&mut self, input: GestureInput, sample: &TouchSample) -> Option<SurfaceEvent> {
        let bounds = self.surface.bounds();
        let position = sample.surface_position(bounds.origin)?;
        self.feed(input, position, bounds.size)
    }

    /// `size` is measured once per sample and never cached across samples.
    fn feed(&mut self, input: GestureInput, position: Point, size: Size) -> Option<SurfaceEvent> {
        let action = self.state.advance(input)?;
        let mut offset = normalize(position, size, self.config.grid);
        if self.config.clamp {
            offset = offset.clamped(self.config.grid);
        }
        let event = action.at(offset);
        self.sink.push_event(event);
        Some(event)
    }
}
