pub mod canvas;
pub mod hit;
pub mod paint;
pub mod raster;
pub mod svg;
pub mod transform;

pub use canvas::{AssemblyCanvas, Rgba8, Theme};
pub use hit::hit_test_instance;
pub use raster::{RasterError, encode_png, rasterize_assembly};
pub use svg::{export_assembly_svg, export_tile_svg};
pub use transform::instance_transform;
