use super::{
    CommandTool, DeleteTool, LineTool, OpenTool, SaveTool, ToolBehavior, ToolContext,
    ToolResponse, VertexTool, format_coord,
};
use crate::input::{InputEvent, Key};
use crate::level::Vertex;

pub const DEFAULT_STATUS: &str = "Editor: ";
pub const DEFAULT_STATUS_PROMPT: &str =
    "q quit, n new, o open, s save, v vertex, l line, d delete, : command";
pub const QUIT_PROMPT_STATUS: &str = "Quit editor? (y/N)";
pub const NEW_PROMPT_STATUS: &str = "Discard unsaved changes? (y/N)";

/// A pending yes/no question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    Quit,
    New,
}

/// The idle tool: reports coordinates and launches the other tools
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NullTool {
    prompt: Option<Prompt>,
}

impl NullTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idle tool that starts out asking whether to quit
    pub fn confirm_quit() -> Self {
        Self {
            prompt: Some(Prompt::Quit),
        }
    }

    pub fn prompt(&self) -> Option<Prompt> {
        self.prompt
    }

    fn ask(&mut self, prompt: Prompt, ctx: &mut ToolContext<'_>) -> ToolResponse {
        self.prompt = Some(prompt);
        *ctx.status = match prompt {
            Prompt::Quit => QUIT_PROMPT_STATUS,
            Prompt::New => NEW_PROMPT_STATUS,
        }
        .to_owned();
        ToolResponse::consumed()
    }

    fn cancel(&mut self, ctx: &mut ToolContext<'_>) -> ToolResponse {
        self.prompt = None;
        *ctx.status = DEFAULT_STATUS.to_owned();
        ToolResponse::consumed()
    }

    fn new_level(&mut self, ctx: &mut ToolContext<'_>) -> ToolResponse {
        self.prompt = None;
        ctx.level.clear();
        *ctx.status = DEFAULT_STATUS.to_owned();
        *ctx.message = "New level".to_owned();
        log::info!("Started a new level");
        ToolResponse::consumed().replaced_level()
    }

    fn handle_prompt(
        &mut self,
        prompt: Prompt,
        event: &InputEvent,
        ctx: &mut ToolContext<'_>,
    ) -> ToolResponse {
        match event {
            InputEvent::KeyDown(Key::Char('y')) => match prompt {
                Prompt::Quit => {
                    self.prompt = None;
                    (ctx.exit)();
                    ToolResponse::consumed()
                }
                Prompt::New => self.new_level(ctx),
            },
            InputEvent::KeyDown(Key::Char('n')) | InputEvent::KeyDown(Key::Enter) => {
                self.cancel(ctx)
            }
            // undo and redo drop the question, then reach the editor
            InputEvent::KeyDown(Key::Char('u' | 'r')) => {
                self.cancel(ctx);
                ToolResponse::ignored()
            }
            InputEvent::KeyDown(Key::Char(_)) | InputEvent::Text(_) => ToolResponse::consumed(),
            _ => ToolResponse::ignored(),
        }
    }
}

impl ToolBehavior for NullTool {
    fn name(&self) -> &'static str {
        "Null"
    }

    fn initial_status(&self) -> String {
        match self.prompt {
            Some(Prompt::Quit) => QUIT_PROMPT_STATUS.to_owned(),
            Some(Prompt::New) => NEW_PROMPT_STATUS.to_owned(),
            None => format!("{DEFAULT_STATUS}{DEFAULT_STATUS_PROMPT}"),
        }
    }

    fn handle_event(
        &mut self,
        event: &InputEvent,
        coord: Vertex,
        ctx: &mut ToolContext<'_>,
    ) -> ToolResponse {
        if let Some(prompt) = self.prompt {
            return self.handle_prompt(prompt, event, ctx);
        }

        match event {
            InputEvent::KeyDown(Key::Char(c)) => match c {
                'q' => self.ask(Prompt::Quit, ctx),
                'n' if *ctx.changed => self.ask(Prompt::New, ctx),
                'n' => self.new_level(ctx),
                'o' => ToolResponse::switch_to(OpenTool::new()),
                's' => ToolResponse::switch_to(SaveTool::new()),
                'v' => ToolResponse::switch_to(VertexTool::new()),
                'l' => ToolResponse::switch_to(LineTool::new()),
                'd' => ToolResponse::switch_to(DeleteTool::new()),
                ':' => ToolResponse::switch_to(CommandTool::new()),
                _ => ToolResponse::ignored(),
            },
            InputEvent::PointerMove { .. } | InputEvent::PointerUp { .. } => {
                *ctx.status = format!("{DEFAULT_STATUS}{}", format_coord(coord));
                ToolResponse::consumed()
            }
            _ => ToolResponse::ignored(),
        }
    }
}
