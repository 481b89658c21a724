//! The editing session: routes raw input to the active tool.
//!
//! Keys go to the active tool first. Whatever the tool leaves unconsumed is
//! checked against the global bindings:
//!
//! ```text
//! Escape      back to the idle tool
//! u / r       undo / redo one operation
//! Left Shift  toggle horizontal lock
//! Left Alt    toggle vertical lock
//! ```
//!
//! Pointer input is handled by the editor itself (canvas drag, wheel zoom,
//! axis locks) and reaches the tool in world coordinates.

use std::fmt;

use super::{EditorContext, View};
use crate::command::{CommandHistory, HistoryStep};
use crate::config::EditorConfig;
use crate::input::{InputEvent, Key, PointerButton, ScreenPos};
use crate::level::{Level, Vertex};
use crate::tools::{NullTool, Tool, ToolBehavior, ToolContext, ToolResponse};

pub struct Editor {
    config: EditorConfig,
    view: View,
    tool: Tool,
    history: CommandHistory,

    h_locked: bool,
    y_align: f64,
    v_locked: bool,
    x_align: f64,

    left_button_down: bool,
    dragged: bool,
    pointer: ScreenPos,

    status: String,
    message: String,
    changed: bool,
    on_exit: Box<dyn FnMut()>,
}

impl fmt::Debug for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("view", &self.view)
            .field("tool", &self.tool)
            .field("history_len", &self.history.len())
            .field("history_cursor", &self.history.cursor())
            .field("h_locked", &self.h_locked)
            .field("v_locked", &self.v_locked)
            .field("status", &self.status)
            .field("message", &self.message)
            .field("changed", &self.changed)
            .finish_non_exhaustive()
    }
}

impl Editor {
    pub fn new(config: EditorConfig, on_exit: impl FnMut() + 'static) -> Self {
        let tool = Tool::default();
        let status = tool.initial_status();
        let view = View::new(Vertex::default(), config.initial_scale);
        Self {
            config,
            view,
            tool,
            history: CommandHistory::new(),
            h_locked: false,
            y_align: 0.0,
            v_locked: false,
            x_align: 0.0,
            left_button_down: false,
            dragged: false,
            pointer: ScreenPos::default(),
            status,
            message: String::new(),
            changed: false,
            on_exit: Box::new(on_exit),
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// True if the level changed since it was last saved or loaded
    pub fn changed(&self) -> bool {
        self.changed
    }

    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn is_horizontal_locked(&self) -> bool {
        self.h_locked
    }

    pub fn is_vertical_locked(&self) -> bool {
        self.v_locked
    }

    /// True while the active tool wants `Text` events
    pub fn wants_text_input(&self) -> bool {
        self.tool.captures_text()
    }

    /// Type `line` into the command line and submit it
    pub fn submit_command(&mut self, line: &str, ctx: &mut EditorContext<'_>) {
        if !matches!(self.tool, Tool::Command(_)) {
            self.install(NullTool::new().into());
            self.handle_event(&InputEvent::char(':'), ctx);
        }
        self.handle_event(&InputEvent::text(line), ctx);
        self.handle_event(&InputEvent::key(Key::Enter), ctx);
    }

    /// Process one input event to completion
    pub fn handle_event(&mut self, event: &InputEvent, ctx: &mut EditorContext<'_>) {
        match event {
            InputEvent::KeyDown(key) => {
                let coord = self.view.screen_to_world(self.pointer);
                if !self.dispatch(event, coord, ctx) {
                    self.handle_global_key(*key, ctx.level);
                }
            }

            InputEvent::Text(_) => {
                let coord = self.view.screen_to_world(self.pointer);
                self.dispatch(event, coord, ctx);
            }

            InputEvent::PointerMove { pos } => {
                let pos = self.constrain_motion(*pos);
                if self.left_button_down {
                    self.dragged = true;
                    self.view.pan(self.pointer, pos);
                    self.message = "Dragging".to_owned();
                } else {
                    let coord = self.view.screen_to_world(pos);
                    self.dispatch(&InputEvent::PointerMove { pos }, coord, ctx);
                }
                self.pointer = pos;
            }

            InputEvent::PointerDown { button, pos } => {
                if *button == PointerButton::Left {
                    self.left_button_down = true;
                    self.dragged = false;
                    self.pointer = self.constrain(*pos);
                }
            }

            InputEvent::PointerUp { button, pos } => {
                if *button == PointerButton::Left {
                    if !self.dragged {
                        let pos = self.constrain(*pos);
                        let coord = self.view.screen_to_world(pos);
                        self.dispatch(&InputEvent::PointerUp { button: *button, pos }, coord, ctx);
                    }
                    self.left_button_down = false;
                    self.dragged = false;
                }
            }

            InputEvent::Wheel { delta, flipped } => self.zoom(*delta, *flipped),

            InputEvent::Quit => {
                let tool = NullTool::confirm_quit();
                self.install(tool.into());
            }
        }
    }

    fn dispatch(&mut self, event: &InputEvent, coord: Vertex, ctx: &mut EditorContext<'_>) -> bool {
        let mut tool_ctx = ToolContext {
            level: &mut *ctx.level,
            store: ctx.store,
            status: &mut self.status,
            message: &mut self.message,
            changed: &mut self.changed,
            pick_radius: self.config.pick_radius * self.view.scale,
            exit: &mut *self.on_exit,
        };
        let response = self.tool.handle_event(event, coord, &mut tool_ctx);
        self.apply_response(response, ctx.level)
    }

    fn apply_response(&mut self, response: ToolResponse, level: &mut Level) -> bool {
        let ToolResponse {
            consumed,
            record,
            next,
            replaced_level,
            history,
        } = response;

        if let Some(record) = record {
            self.history.append(record);
            self.changed = true;
        }
        if replaced_level {
            self.history.clear();
            self.changed = false;
        }
        if let Some(step) = history {
            self.step_history(step, level);
        }
        if let Some(next) = next {
            self.install(next);
        }
        consumed
    }

    fn install(&mut self, tool: Tool) {
        log::debug!("Tool: {} -> {}", self.tool.name(), tool.name());
        self.status = tool.initial_status();
        self.tool = tool;
    }

    fn handle_global_key(&mut self, key: Key, level: &mut Level) {
        match key {
            Key::Escape => self.install(NullTool::new().into()),
            Key::Char('u') => {
                self.install(NullTool::new().into());
                self.step_history(HistoryStep::Undo, level);
            }
            Key::Char('r') => {
                self.install(NullTool::new().into());
                self.step_history(HistoryStep::Redo, level);
            }
            Key::LeftShift => {
                self.h_locked = !self.h_locked;
                self.v_locked = false;
                self.message = if self.h_locked {
                    "Horizontal locked"
                } else {
                    "Horizontal unlocked"
                }
                .to_owned();
            }
            Key::LeftAlt => {
                self.v_locked = !self.v_locked;
                self.h_locked = false;
                self.message = if self.v_locked {
                    "Vertical locked"
                } else {
                    "Vertical unlocked"
                }
                .to_owned();
            }
            _ => {}
        }
    }

    fn step_history(&mut self, step: HistoryStep, level: &mut Level) {
        let moved = self.history.step(step, level);
        if moved {
            self.changed = true;
        }
        self.message = match (step, moved) {
            (HistoryStep::Undo, true) => "Undo one operation",
            (HistoryStep::Undo, false) => "Already at oldest change",
            (HistoryStep::Redo, true) => "Redo one operation",
            (HistoryStep::Redo, false) => "Already at newest change",
        }
        .to_owned();
    }

    /// Apply the axis locks to a motion, remembering the unlocked axes
    fn constrain_motion(&mut self, pos: ScreenPos) -> ScreenPos {
        if !self.h_locked {
            self.y_align = pos.y;
        }
        if !self.v_locked {
            self.x_align = pos.x;
        }
        self.constrain(pos)
    }

    fn constrain(&self, pos: ScreenPos) -> ScreenPos {
        ScreenPos::new(
            if self.v_locked { self.x_align } else { pos.x },
            if self.h_locked { self.y_align } else { pos.y },
        )
    }

    fn zoom(&mut self, delta: f64, flipped: bool) {
        let mut zoom = self.config.zoom_coeff * delta;
        if flipped {
            zoom = -zoom;
        }
        let scale = (self.view.scale + zoom).clamp(self.config.zoom_min, self.config.zoom_max);
        self.view.zoom_at(self.pointer, scale);
    }
}
