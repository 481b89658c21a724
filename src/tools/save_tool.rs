use super::{NullTool, TextField, TextFieldOutcome, ToolBehavior, ToolContext, ToolResponse};
use crate::input::InputEvent;
use crate::level::Vertex;

const STATUS: &str = "Save as: ";

/// Collects a file name and writes the level under it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaveTool {
    field: TextField,
}

impl SaveTool {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ToolBehavior for SaveTool {
    fn name(&self) -> &'static str {
        "Save"
    }

    fn initial_status(&self) -> String {
        STATUS.to_owned()
    }

    fn captures_text(&self) -> bool {
        true
    }

    fn handle_event(
        &mut self,
        event: &InputEvent,
        _coord: Vertex,
        ctx: &mut ToolContext<'_>,
    ) -> ToolResponse {
        match self.field.handle(event) {
            TextFieldOutcome::Unhandled => ToolResponse::ignored(),
            TextFieldOutcome::Editing => {
                *ctx.status = format!("{STATUS}{}", self.field.text());
                ToolResponse::consumed()
            }
            TextFieldOutcome::Previous => ToolResponse::switch_to(NullTool::new()),
            TextFieldOutcome::Advance => {
                let name = self.field.text();
                if name.is_empty() {
                    *ctx.message = "Error: save: no file name given".to_owned();
                } else {
                    match ctx.level.save(ctx.store, name) {
                        Ok(()) => {
                            *ctx.changed = false;
                            *ctx.message = format!("Saved \"{name}\"");
                        }
                        Err(err) => {
                            *ctx.message = format!("Error: cannot save \"{name}\": {err}");
                        }
                    }
                }
                ToolResponse::switch_to(NullTool::new())
            }
        }
    }
}
