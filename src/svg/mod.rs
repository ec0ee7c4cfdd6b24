pub mod parser;
pub mod path;

pub use parser::{MapGroup, RawPrimitive, RawShape, SvgMapError, parse_groups};
pub use path::tessellate_path;
