use crate::geometry::Point;

/// Scales source-viewbox coordinates to target-canvas coordinates.
///
/// The x and y factors are independent ratios of the canvas dimensions to
/// the viewbox dimensions; no fitting or centering is applied.
#[derive(Debug, Clone)]
pub struct Scaler {
    scale_x: f64,
    scale_y: f64,
}

impl Scaler {
    /// Create a scaler from (width, height) of the source viewbox and the
    /// target canvas.
    pub fn new(viewbox: (f64, f64), canvas: (f64, f64)) -> Self {
        Self {
            scale_x: canvas.0 / viewbox.0,
            scale_y: canvas.1 / viewbox.1,
        }
    }

    /// Scale one point into target coordinates, rounded for output
    /// stability.
    pub fn scale_point(&self, p: Point) -> Point {
        Point::new(round2(p.x * self.scale_x), round2(p.y * self.scale_y))
    }

    pub fn scale_ring(&self, ring: &[Point]) -> Vec<Point> {
        ring.iter().map(|&p| self.scale_point(p)).collect()
    }
}

/// Round to two decimal places.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
