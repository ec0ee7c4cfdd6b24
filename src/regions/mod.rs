pub mod grouper;
pub mod stitch;

pub use grouper::{GroupingResult, build_families};
pub use stitch::{ResolvedRegion, resolve_families, resolve_ring};
