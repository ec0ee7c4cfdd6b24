use std::f64::consts::PI;

use crate::geometry::Point;

/// Flatten an SVG elliptical arc into line-segment sample points.
///
/// The endpoint parameterization (radii, x-axis rotation, large-arc and
/// sweep flags, endpoint) is converted to center parameterization, then
/// the arc is sampled at `segments` equal angular steps. The returned
/// points exclude the start point and end with the literal endpoint.
///
/// Zero radii or coincident endpoints degrade to a straight line-to.
pub fn flatten_arc(
    start: Point,
    rx: f64,
    ry: f64,
    rotation_deg: f64,
    large_arc: bool,
    sweep: bool,
    end: Point,
    segments: usize,
) -> Vec<Point> {
    if rx == 0.0 || ry == 0.0 || (start.x == end.x && start.y == end.y) {
        return vec![end];
    }

    let mut rx = rx.abs();
    let mut ry = ry.abs();
    let phi = rotation_deg.to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();

    // Midpoint into the ellipse's local frame (rotate by -phi).
    let dx = (start.x - end.x) / 2.0;
    let dy = (start.y - end.y) / 2.0;
    let x1p = cos_phi * dx + sin_phi * dy;
    let y1p = -sin_phi * dx + cos_phi * dy;

    // Scale both radii up by the same factor when they cannot reach the
    // endpoint.
    let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
    if lambda > 1.0 {
        let s = lambda.sqrt();
        rx *= s;
        ry *= s;
    }

    // Center in the local frame; sign branch from large_arc XOR sweep.
    let rx2 = rx * rx;
    let ry2 = ry * ry;
    let num = rx2 * ry2 - rx2 * y1p * y1p - ry2 * x1p * x1p;
    let den = rx2 * y1p * y1p + ry2 * x1p * x1p;
    let sign = if large_arc != sweep { 1.0 } else { -1.0 };
    let coef = sign * (num / den).max(0.0).sqrt();
    let cxp = coef * rx * y1p / ry;
    let cyp = -coef * ry * x1p / rx;

    // Center back in the path's frame.
    let cx = cos_phi * cxp - sin_phi * cyp + (start.x + end.x) / 2.0;
    let cy = sin_phi * cxp + cos_phi * cyp + (start.y + end.y) / 2.0;

    // Start angle and sweep-consistent signed delta, wrapped by 2*pi so
    // sweep=false gives delta <= 0 and sweep=true gives delta >= 0.
    let theta1 = ((y1p - cyp) / ry).atan2((x1p - cxp) / rx);
    let theta2 = ((-y1p - cyp) / ry).atan2((-x1p - cxp) / rx);
    let mut delta = theta2 - theta1;
    if sweep && delta < 0.0 {
        delta += 2.0 * PI;
    } else if !sweep && delta > 0.0 {
        delta -= 2.0 * PI;
    }

    let mut out = Vec::with_capacity(segments);
    for i in 1..segments {
        let theta = theta1 + delta * (i as f64) / (segments as f64);
        let (sin_t, cos_t) = theta.sin_cos();
        out.push(Point::new(
            cx + rx * cos_t * cos_phi - ry * sin_t * sin_phi,
            cy + rx * cos_t * sin_phi + ry * sin_t * cos_phi,
        ));
    }
    out.push(end);
    out
}
