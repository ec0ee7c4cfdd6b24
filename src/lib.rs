//! svg2map - Generate game-ready region fill polygons from an SVG map document

pub mod config;
pub mod domain;
pub mod geometry;
pub mod output;
pub mod regions;
pub mod svg;
