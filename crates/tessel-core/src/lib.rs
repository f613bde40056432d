pub mod config;
pub mod id;
pub mod kernel;
pub mod model;
pub mod path;

pub use config::{ConfigError, EditorConfig, snap_to};
pub use id::InstanceId;
pub use kernel::{GeometryError, SetOp};
pub use model::*;
pub use path::to_path_data;
