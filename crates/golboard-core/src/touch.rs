//! Adaptation of touch input to surface-relative positions.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// One touch event as seen by the surface.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TouchSample {
    /// Viewport (`clientX`, `clientY`) positions of the active contacts.
    pub touches: Vec<Point>,
    /// Pinch scale, when the platform reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
}

impl TouchSample {
    pub fn new(touches: Vec<Point>) -> Self {
        Self { touches, scale: None }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Whether the sample belongs to a pinch-zoom gesture.
    pub fn is_pinch(&self) -> bool {
        self.scale.is_some_and(|scale| scale != 1.0)
    }

    /// Position of the first contact relative to `origin`, the surface's
    /// top-left corner.
    ///
    /// `None` when there is no active contact or the sample is part of a
    /// pinch-zoom; such samples must not reach the gesture machine.
    pub fn surface_position(&self, origin: Point) -> Option<Point> {
        if self.is_pinch() {
            return None;
        }
        let first = self.touches.first()?;
        Some(Point::new(first.x - origin.x, first.y - origin.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Point {
        Point::new(100.0, 50.0)
    }

    #[test]
    fn test_offsets_from_surface_origin() {
        let sample = TouchSample::new(vec![Point::new(160.0, 110.0)]);
        assert_eq!(sample.surface_position(origin()), Some(Point::new(60.0, 60.0)));
    }

    #[test]
    fn test_uses_first_contact() {
        let sample = TouchSample::new(vec![Point::new(110.0, 60.0), Point::new(400.0, 400.0)]);
        assert_eq!(sample.surface_position(origin()), Some(Point::new(10.0, 10.0)));
    }

    #[test]
    fn test_no_contact_is_dropped() {
        assert_eq!(TouchSample::default().surface_position(origin()), None);
    }

    #[test]
    fn test_pinch_is_dropped() {
        let sample = TouchSample::new(vec![Point::new(160.0, 110.0), Point::new(300.0, 300.0)])
            .with_scale(0.8);
        assert!(sample.is_pinch());
        assert_eq!(sample.surface_position(origin()), None);
    }

    #[test]
    fn test_unit_scale_is_not_pinch() {
        let sample = TouchSample::new(vec![Point::new(160.0, 110.0)]).with_scale(1.0);
        assert!(!sample.is_pinch());
        assert!(sample.surface_position(origin()).is_some());
    }
}
