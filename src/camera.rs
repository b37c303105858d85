use crate::foundation::core::{Point, Vec2};

/// Pan/zoom view onto world space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Camera {
    /// World-space position of the screen origin.
    pub origin: Point,
    /// Screen pixels per world unit. Must be finite and > 0 to draw through.
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            origin: Point::ORIGIN,
            zoom: 1.0,
        }
    }
}

impl Camera {
    pub fn new(x: f64, y: f64, zoom: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            zoom,
        }
    }

    pub fn pan(&mut self, delta: Vec2) {
        self.origin += delta;
    }

    /// Multiply zoom by `factor` while keeping the world point under `(screen_x, screen_y)`
    /// fixed on screen.
    pub fn zoom_at_point(&mut self, factor: f64, screen_x: i32, screen_y: i32) {
        let before = self.screen_to_world(screen_x, screen_y);
        self.zoom *= factor;
        let after = self.screen_to_world(screen_x, screen_y);
        self.origin += before - after;
    }

    /// Truncating world-to-screen mapping.
    pub fn world_to_screen(&self, world: Point) -> (i32, i32) {
        let v = (world - self.origin) * self.zoom;
        (v.x as i32, v.y as i32)
    }

    pub fn screen_to_world(&self, screen_x: i32, screen_y: i32) -> Point {
        self.origin + Vec2::new(f64::from(screen_x), f64::from(screen_y)) / self.zoom
    }

    pub(crate) fn has_valid_zoom(&self) -> bool {
        self.zoom.is_finite() && self.zoom > 0.0
    }
}

#[cfg(test)]
#[path = "../tests/unit/camera.rs"]
mod tests;
