use super::{
    NullTool, TextField, TextFieldOutcome, ToolBehavior, ToolContext, ToolResponse, apply,
    validate_line,
};
use crate::command::{Command, CommandError, EditorCommand, HistoryStep, parse_command};
use crate::input::InputEvent;
use crate::level::Vertex;
use crate::tokenizer::tokenize;

const STATUS: &str = ":";

/// Command line driving the level through typed verbs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandTool {
    field: TextField,
}

impl CommandTool {
    pub fn new() -> Self {
        Self::default()
    }

    fn run(&self, ctx: &mut ToolContext<'_>) -> Result<ToolResponse, CommandError> {
        let tokens = tokenize(self.field.text());
        let Some(command) = parse_command(&tokens)? else {
            return Ok(ToolResponse::consumed());
        };
        log::debug!("Command line: {:?}", command);

        let response = match command {
            EditorCommand::Quit => {
                (ctx.exit)();
                ToolResponse::consumed()
            }
            EditorCommand::New => {
                ctx.level.clear();
                *ctx.message = "New level".to_owned();
                ToolResponse::consumed().replaced_level()
            }
            EditorCommand::Open(name) => {
                ctx.level
                    .load(ctx.store, &name)
                    .map_err(|err| CommandError::Rejected(format!("cannot open \"{name}\": {err}")))?;
                *ctx.message = format!("Opened \"{name}\"");
                ToolResponse::consumed().replaced_level()
            }
            EditorCommand::Save(name) => {
                ctx.level
                    .save(ctx.store, &name)
                    .map_err(|err| CommandError::Rejected(format!("cannot save \"{name}\": {err}")))?;
                *ctx.changed = false;
                *ctx.message = format!("Saved \"{name}\"");
                ToolResponse::consumed()
            }
            EditorCommand::Vertex { x, y } => {
                let command = Command::add_vertex(ctx.level, Vertex::new(x, y));
                Self::recorded(apply(command, ctx.level)?, ctx)
            }
            EditorCommand::Line { v0, v1 } => {
                validate_line(ctx.level, v0, v1)?;
                Self::recorded(apply(Command::add_line(v0, v1), ctx.level)?, ctx)
            }
            EditorCommand::DeleteVertex(index) => {
                let command = Command::remove_vertex(ctx.level, index).ok_or_else(|| {
                    CommandError::Rejected(format!("vertex {index} does not exist"))
                })?;
                Self::recorded(apply(command, ctx.level)?, ctx)
            }
            EditorCommand::DeleteLine { v0, v1 } => {
                if !ctx.level.contains_line(v0, v1) {
                    return Err(CommandError::Rejected(format!(
                        "line ({v0}, {v1}) does not exist"
                    )));
                }
                Self::recorded(apply(Command::remove_line(v0, v1), ctx.level)?, ctx)
            }
            EditorCommand::Undo => ToolResponse {
                history: Some(HistoryStep::Undo),
                ..ToolResponse::consumed()
            },
            EditorCommand::Redo => ToolResponse {
                history: Some(HistoryStep::Redo),
                ..ToolResponse::consumed()
            },
        };
        Ok(response)
    }

    fn recorded(record: Command, ctx: &mut ToolContext<'_>) -> ToolResponse {
        *ctx.message = record.to_string();
        ToolResponse::consumed().record(record)
    }
}

impl ToolBehavior for CommandTool {
    fn name(&self) -> &'static str {
        "Command"
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
                ctx.message.clear();
                let mut response = self.run(ctx).unwrap_or_else(|err| {
                    *ctx.message = format!("Error: {err}");
                    ToolResponse::consumed()
                });
                response.next = Some(NullTool::new().into());
                response
            }
        }
    }
}
