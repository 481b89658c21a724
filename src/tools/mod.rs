use crate::command::{Command, CommandError, HistoryStep, Operation};
use crate::input::InputEvent;
use crate::level::{Level, LevelStore, Vertex};

/// Everything a tool may read or change while handling one event
pub struct ToolContext<'a> {
    pub level: &'a mut Level,
    pub store: &'a LevelStore,
    pub status: &'a mut String,
    pub message: &'a mut String,
    /// Unsaved changes since the last save or load
    pub changed: &'a mut bool,
    /// Pick distance in world units at the current zoom
    pub pick_radius: f64,
    pub exit: &'a mut dyn FnMut(),
}

/// What the editor should do after a tool handled an event
#[derive(Debug, Default)]
pub struct ToolResponse {
    /// The event needs no further handling
    pub consumed: bool,
    /// An applied edit to append to the history
    pub record: Option<Command>,
    /// Tool to install in place of the current one
    pub next: Option<Tool>,
    /// The level was replaced wholesale, so history no longer applies
    pub replaced_level: bool,
    /// Undo or redo requested by the tool
    pub history: Option<HistoryStep>,
}

impl ToolResponse {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn consumed() -> Self {
        Self {
            consumed: true,
            ..Self::default()
        }
    }

    pub fn switch_to(tool: impl Into<Tool>) -> Self {
        Self {
            consumed: true,
            next: Some(tool.into()),
            ..Self::default()
        }
    }

    pub fn record(mut self, command: Command) -> Self {
        self.record = Some(command);
        self
    }

    pub fn replaced_level(mut self) -> Self {
        self.replaced_level = true;
        self
    }
}

/// Behaviour shared by every tool variant
pub trait ToolBehavior {
    /// Return the name of the tool
    fn name(&self) -> &'static str;

    /// Status line shown when the tool is installed
    fn initial_status(&self) -> String;

    /// Handle one event. `coord` is the world position of the pointer.
    fn handle_event(
        &mut self,
        event: &InputEvent,
        coord: Vertex,
        ctx: &mut ToolContext<'_>,
    ) -> ToolResponse;

    /// True while the tool is capturing typed text
    fn captures_text(&self) -> bool {
        false
    }
}

mod command_tool;
mod delete_tool;
mod line_tool;
mod null_tool;
mod open_tool;
mod save_tool;
mod text_field;
mod vertex_tool;

pub use command_tool::CommandTool;
pub use delete_tool::DeleteTool;
pub use line_tool::LineTool;
pub use null_tool::{NullTool, Prompt};
pub use open_tool::OpenTool;
pub use save_tool::SaveTool;
pub use text_field::{TextField, TextFieldOutcome};
pub use vertex_tool::VertexTool;

/// The modal interpretations of input the editor can be in
#[derive(Debug, Clone, PartialEq)]
pub enum Tool {
    Null(NullTool),
    Open(OpenTool),
    Save(SaveTool),
    Vertex(VertexTool),
    Line(LineTool),
    Delete(DeleteTool),
    Command(CommandTool),
}

impl Default for Tool {
    fn default() -> Self {
        Tool::Null(NullTool::new())
    }
}

impl ToolBehavior for Tool {
    fn name(&self) -> &'static str {
        match self {
            Self::Null(tool) => tool.name(),
            Self::Open(tool) => tool.name(),
            Self::Save(tool) => tool.name(),
            Self::Vertex(tool) => tool.name(),
            Self::Line(tool) => tool.name(),
            Self::Delete(tool) => tool.name(),
            Self::Command(tool) => tool.name(),
        }
    }

    fn initial_status(&self) -> String {
        match self {
            Self::Null(tool) => tool.initial_status(),
            Self::Open(tool) => tool.initial_status(),
            Self::Save(tool) => tool.initial_status(),
            Self::Vertex(tool) => tool.initial_status(),
            Self::Line(tool) => tool.initial_status(),
            Self::Delete(tool) => tool.initial_status(),
            Self::Command(tool) => tool.initial_status(),
        }
    }

    fn handle_event(
        &mut self,
        event: &InputEvent,
        coord: Vertex,
        ctx: &mut ToolContext<'_>,
    ) -> ToolResponse {
        match self {
            Self::Null(tool) => tool.handle_event(event, coord, ctx),
            Self::Open(tool) => tool.handle_event(event, coord, ctx),
            Self::Save(tool) => tool.handle_event(event, coord, ctx),
            Self::Vertex(tool) => tool.handle_event(event, coord, ctx),
            Self::Line(tool) => tool.handle_event(event, coord, ctx),
            Self::Delete(tool) => tool.handle_event(event, coord, ctx),
            Self::Command(tool) => tool.handle_event(event, coord, ctx),
        }
    }

    fn captures_text(&self) -> bool {
        match self {
            Self::Null(tool) => tool.captures_text(),
            Self::Open(tool) => tool.captures_text(),
            Self::Save(tool) => tool.captures_text(),
            Self::Vertex(tool) => tool.captures_text(),
            Self::Line(tool) => tool.captures_text(),
            Self::Delete(tool) => tool.captures_text(),
            Self::Command(tool) => tool.captures_text(),
        }
    }
}

macro_rules! impl_from_tool {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Tool {
                fn from(tool: $ty) -> Self {
                    Tool::$variant(tool)
                }
            }
        )*
    };
}

impl_from_tool!(
    Null(NullTool),
    Open(OpenTool),
    Save(SaveTool),
    Vertex(VertexTool),
    Line(LineTool),
    Delete(DeleteTool),
    Command(CommandTool),
);

impl Tool {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null(_))
    }
}

/// Apply `command` to the level, returning it as an undo record on success
pub(crate) fn apply(command: Command, level: &mut Level) -> Result<Command, CommandError> {
    command.activate(level)?;
    Ok(command)
}

/// Check that a line between `v0` and `v1` may be added
pub(crate) fn validate_line(level: &Level, v0: u16, v1: u16) -> Result<(), CommandError> {
    let count = level.vertices().len();
    if usize::from(v0) >= count || usize::from(v1) >= count {
        return Err(CommandError::Rejected(format!(
            "line ({v0}, {v1}): vertex index out of range"
        )));
    }
    if v0 == v1 {
        return Err(CommandError::Rejected(format!(
            "line ({v0}, {v1}): a line cannot join a vertex to itself"
        )));
    }
    if level.contains_line(v0, v1) {
        return Err(CommandError::Rejected(format!(
            "line ({v0}, {v1}): line already exists"
        )));
    }
    Ok(())
}

/// Format a world coordinate for the status line
pub(crate) fn format_coord(coord: Vertex) -> String {
    format!("({:.3},{:.3})", coord.x, coord.y)
}
