use super::{ToolBehavior, ToolContext, ToolResponse, apply};
use crate::command::{Command, CommandError};
use crate::input::InputEvent;
use crate::level::Vertex;

const STATUS: &str = "Delete: click a vertex or line";

/// Removes the vertex or line under the pointer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteTool;

impl DeleteTool {
    pub fn new() -> Self {
        Self
    }

    fn target(coord: Vertex, ctx: &ToolContext<'_>) -> Option<Command> {
        if let Some(index) = ctx.level.nearest_vertex(coord, ctx.pick_radius) {
            return Command::remove_vertex(ctx.level, index);
        }
        ctx.level
            .nearest_line(coord, ctx.pick_radius)
            .map(|line| Command::remove_line(line.v0, line.v1))
    }
}

impl ToolBehavior for DeleteTool {
    fn name(&self) -> &'static str {
        "Delete"
    }

    fn initial_status(&self) -> String {
        STATUS.to_owned()
    }

    fn handle_event(
        &mut self,
        event: &InputEvent,
        coord: Vertex,
        ctx: &mut ToolContext<'_>,
    ) -> ToolResponse {
        if !event.is_click() {
            return ToolResponse::ignored();
        }

        let result = Self::target(coord, ctx)
            .ok_or_else(|| CommandError::Rejected("nothing to delete here".to_owned()))
            .and_then(|command| apply(command, ctx.level));
        match result {
            Ok(record) => {
                *ctx.message = record.to_string();
                ToolResponse::consumed().record(record)
            }
            Err(err) => {
                *ctx.message = format!("Error: {err}");
                ToolResponse::consumed()
            }
        }
    }
}
