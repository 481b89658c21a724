use super::null_tool::NEW_PROMPT_STATUS;
use super::{NullTool, TextField, TextFieldOutcome, ToolBehavior, ToolContext, ToolResponse};
use crate::input::{InputEvent, Key};
use crate::level::Vertex;

const STATUS: &str = "Open: ";

/// Collects a file name and replaces the level with the stored one
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpenTool {
    field: TextField,
    confirming: bool,
}

impl OpenTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file_name(&self) -> &str {
        self.field.text()
    }

    fn open(&self, ctx: &mut ToolContext<'_>) -> ToolResponse {
        let name = self.field.text();
        let done = ToolResponse::switch_to(NullTool::new());
        match ctx.level.load(ctx.store, name) {
            Ok(()) => {
                *ctx.message = format!("Opened \"{name}\"");
                done.replaced_level()
            }
            Err(err) => {
                *ctx.message = format!("Error: cannot open \"{name}\": {err}");
                done
            }
        }
    }
}

impl ToolBehavior for OpenTool {
    fn name(&self) -> &'static str {
        "Open"
    }

    fn initial_status(&self) -> String {
        STATUS.to_owned()
    }

    fn captures_text(&self) -> bool {
        !self.confirming
    }

    fn handle_event(
        &mut self,
        event: &InputEvent,
        _coord: Vertex,
        ctx: &mut ToolContext<'_>,
    ) -> ToolResponse {
        if self.confirming {
            return match event {
                InputEvent::KeyDown(Key::Char('y')) => self.open(ctx),
                InputEvent::KeyDown(Key::Char('n')) | InputEvent::KeyDown(Key::Enter) => {
                    *ctx.message = "Open cancelled".to_owned();
                    ToolResponse::switch_to(NullTool::new())
                }
                // undo and redo abandon the open
                InputEvent::KeyDown(Key::Char('u' | 'r')) => ToolResponse::ignored(),
                InputEvent::KeyDown(Key::Char(_)) | InputEvent::Text(_) => {
                    ToolResponse::consumed()
                }
                _ => ToolResponse::ignored(),
            };
        }

        match self.field.handle(event) {
            TextFieldOutcome::Unhandled => ToolResponse::ignored(),
            TextFieldOutcome::Editing => {
                *ctx.status = format!("{STATUS}{}", self.field.text());
                ToolResponse::consumed()
            }
            TextFieldOutcome::Previous => ToolResponse::switch_to(NullTool::new()),
            TextFieldOutcome::Advance if self.field.text().is_empty() => {
                *ctx.message = "Error: open: no file name given".to_owned();
                ToolResponse::switch_to(NullTool::new())
            }
            TextFieldOutcome::Advance if *ctx.changed => {
                self.confirming = true;
                *ctx.status = NEW_PROMPT_STATUS.to_owned();
                ToolResponse::consumed()
            }
            TextFieldOutcome::Advance => self.open(ctx),
        }
    }
}
