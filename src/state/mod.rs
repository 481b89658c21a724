pub mod context;
mod editor;
mod view;

pub use context::EditorContext;
pub use editor::Editor;
pub use view::View;
