pub mod arc;
pub mod primitives;
pub mod scaling;

pub use primitives::{Point, convex_hull, points_equal, ring_area, signed_area};
pub use scaling::Scaler;
