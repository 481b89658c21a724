use std::fmt;

use super::{CommandError, CommandResult};
use crate::level::{Level, Line, Vertex};

/// A reversible edit that can be replayed against a level.
///
/// Implementations are only recorded after they applied successfully, so a
/// failed replay means the level no longer matches the history.
pub trait Operation: fmt::Display {
    /// Apply (or re-apply) the edit
    fn activate(&self, level: &mut Level) -> CommandResult;

    /// Reverse the edit
    fn undo(&self, level: &mut Level) -> CommandResult;
}

/// Undo records for every structural edit the editor can make
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// A vertex appended at `index`
    AddVertex { index: usize, vertex: Vertex },

    /// A line added in canonical form
    AddLine { line: Line },

    /// A vertex removed along with the lines that touched it
    RemoveVertex {
        index: usize,
        vertex: Vertex,
        lines: Vec<Line>,
    },

    /// A single line removed
    RemoveLine { line: Line },
}

impl Command {
    /// Record for appending `vertex` to `level`
    pub fn add_vertex(level: &Level, vertex: Vertex) -> Self {
        Command::AddVertex {
            index: level.vertices().len(),
            vertex,
        }
    }

    pub fn add_line(v0: u16, v1: u16) -> Self {
        Command::AddLine {
            line: Line::new(v0, v1),
        }
    }

    /// Record for removing the vertex at `index`, capturing the lines the
    /// removal will cascade to. `None` if there is no such vertex.
    ///
    /// Loops and repeated pairs (possible in loaded files) are not captured,
    /// since they could never be added back.
    pub fn remove_vertex(level: &Level, index: usize) -> Option<Self> {
        let vertex = level.vertex(index)?;
        let mut lines: Vec<Line> = Vec::new();
        for line in level.lines_touching(index).map(Line::canonical) {
            if !line.is_loop() && !lines.contains(&line) {
                lines.push(line);
            }
        }
        Some(Command::RemoveVertex {
            index,
            vertex,
            lines,
        })
    }

    pub fn remove_line(v0: u16, v1: u16) -> Self {
        Command::RemoveLine {
            line: Line::new(v0, v1),
        }
    }

    fn contract(&self, reason: &'static str) -> CommandError {
        CommandError::Contract {
            command: self.to_string(),
            reason,
        }
    }

    fn restore_vertex(&self, level: &mut Level, index: usize, vertex: Vertex) -> CommandResult {
        if level.insert_vertex(index, vertex) {
            Ok(())
        } else {
            Err(self.contract("vertex index out of range"))
        }
    }

    fn drop_vertex(&self, level: &mut Level, index: usize) -> CommandResult {
        level
            .take_vertex(index)
            .map(|_| ())
            .ok_or_else(|| self.contract("vertex does not exist"))
    }

    fn restore_line(&self, level: &mut Level, line: Line) -> CommandResult {
        if level.add_line(line.v0, line.v1) {
            Ok(())
        } else {
            Err(self.contract("line already exists or is a loop"))
        }
    }

    fn drop_line(&self, level: &mut Level, line: Line) -> CommandResult {
        if level.remove_line(line.v0, line.v1) {
            Ok(())
        } else {
            Err(self.contract("line does not exist"))
        }
    }
}

impl Operation for Command {
    fn activate(&self, level: &mut Level) -> CommandResult {
        match self {
            Command::AddVertex { index, vertex } => self.restore_vertex(level, *index, *vertex),
            Command::AddLine { line } => self.restore_line(level, *line),
            Command::RemoveVertex { index, .. } => self.drop_vertex(level, *index),
            Command::RemoveLine { line } => self.drop_line(level, *line),
        }
    }

    fn undo(&self, level: &mut Level) -> CommandResult {
        match self {
            Command::AddVertex { index, .. } => self.drop_vertex(level, *index),
            Command::AddLine { line } => self.drop_line(level, *line),
            Command::RemoveVertex {
                index,
                vertex,
                lines,
            } => {
                self.restore_vertex(level, *index, *vertex)?;
                // restore every line we can, reporting the first failure
                let mut result = Ok(());
                for line in lines {
                    if let Err(err) = self.restore_line(level, *line) {
                        result = result.and(Err(err));
                    }
                }
                result
            }
            Command::RemoveLine { line } => self.restore_line(level, *line),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::AddVertex { index, vertex } => {
                write!(f, "add vertex {} ({}, {})", index, vertex.x, vertex.y)
            }
            Command::AddLine { line } => write!(f, "add line ({}, {})", line.v0, line.v1),
            Command::RemoveVertex { index, lines, .. } => {
                write!(f, "delete vertex {} and {} lines", index, lines.len())
            }
            Command::RemoveLine { line } => {
                write!(f, "delete line ({}, {})", line.v0, line.v1)
            }
        }
    }
}
