mod geometry;
pub mod markers;
mod projection;
mod renderer;

pub use geometry::{draw_line, draw_ring};
pub use markers::{hit_test, place_markers, severity_glyph, Marker};
pub use projection::Viewport;
pub use renderer::{LineString, Lod, MapLayers, MapRenderer};
