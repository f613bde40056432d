pub mod action;
pub mod editor;
pub mod history;
pub mod input;
pub mod mutation;
pub mod placement;
pub mod shortcuts;
pub mod state;
pub mod tools;

pub use action::{Action, reduce};
pub use editor::Editor;
pub use history::History;
pub use state::{BooleanOp, EditorState, Mode, SlideDirection, TileInstance, TileOp};
