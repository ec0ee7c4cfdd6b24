pub mod emit;

pub use emit::{OutputDocument, assemble, write_module};
