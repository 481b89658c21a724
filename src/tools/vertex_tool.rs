use super::{ToolBehavior, ToolContext, ToolResponse, apply, format_coord};
use crate::command::Command;
use crate::input::InputEvent;
use crate::level::Vertex;

const STATUS: &str = "Vertex: click to place ";

/// Places a vertex at every click
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexTool;

impl VertexTool {
    pub fn new() -> Self {
        Self
    }
}

impl ToolBehavior for VertexTool {
    fn name(&self) -> &'static str {
        "Vertex"
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
        match event {
            InputEvent::PointerMove { .. } => {
                *ctx.status = format!("{STATUS}{}", format_coord(coord));
                ToolResponse::consumed()
            }
            _ if event.is_click() => {
                let command = Command::add_vertex(ctx.level, coord);
                match apply(command, ctx.level) {
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
            _ => ToolResponse::ignored(),
        }
    }
}
