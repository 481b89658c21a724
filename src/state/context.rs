use crate::level::{Level, LevelStore};

/// The session data an editor operates on.
///
/// The level is owned by the caller and lent to the editor for each event,
/// so every mutation point is visible at the call site.
#[derive(Debug)]
pub struct EditorContext<'a> {
    /// The level being edited
    pub level: &'a mut Level,
    /// Where levels are loaded from and saved to
    pub store: &'a LevelStore,
}

impl<'a> EditorContext<'a> {
    /// Create a new editor context
    pub fn new(level: &'a mut Level, store: &'a LevelStore) -> Self {
        Self { level, store }
    }
}
