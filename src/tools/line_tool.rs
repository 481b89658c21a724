use super::{ToolBehavior, ToolContext, ToolResponse, apply, validate_line};
use crate::command::Command;
use crate::input::InputEvent;
use crate::level::Vertex;

const STATUS: &str = "Line: pick the first vertex";

/// Joins two picked vertices with a line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineTool {
    first: Option<u16>,
}

impl LineTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// The vertex picked as the line's start, if any
    pub fn first(&self) -> Option<u16> {
        self.first
    }

    fn pick(&mut self, coord: Vertex, ctx: &mut ToolContext<'_>) -> ToolResponse {
        let picked = ctx
            .level
            .nearest_vertex(coord, ctx.pick_radius)
            .and_then(|index| u16::try_from(index).ok());
        let Some(index) = picked else {
            *ctx.message = "No vertex here".to_owned();
            return ToolResponse::consumed();
        };

        let Some(first) = self.first else {
            self.first = Some(index);
            *ctx.status = format!("Line: from vertex {index}, pick the second vertex");
            return ToolResponse::consumed();
        };

        let result = validate_line(ctx.level, first, index)
            .and_then(|()| apply(Command::add_line(first, index), ctx.level));
        match result {
            Ok(record) => {
                self.first = None;
                *ctx.status = STATUS.to_owned();
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

impl ToolBehavior for LineTool {
    fn name(&self) -> &'static str {
        "Line"
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
        if event.is_click() {
            self.pick(coord, ctx)
        } else {
            ToolResponse::ignored()
        }
    }
}
