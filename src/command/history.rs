use super::{Command, CommandResult, Operation};
use crate::level::Level;

/// Which way to move through the history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryStep {
    Undo,
    Redo,
}

/// Linear undo/redo log.
///
/// `cursor` sits one past the last applied operation; everything from the
/// cursor to the end is the redo tail.
#[derive(Debug, Clone)]
pub struct CommandHistory<C = Command> {
    operations: Vec<C>,
    cursor: usize,
}

impl<C> Default for CommandHistory<C> {
    fn default() -> Self {
        Self {
            operations: Vec::new(),
            cursor: 0,
        }
    }
}

impl<C: Operation> CommandHistory<C> {
    /// Creates a new empty command history
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an operation that has already been applied.
    ///
    /// Any undone operations after the cursor are discarded first.
    pub fn append(&mut self, operation: C) {
        let discarded = self.operations.len() - self.cursor;
        if discarded > 0 {
            log::debug!("History: discarding {} undone operations", discarded);
        }
        self.operations.truncate(self.cursor);
        log::debug!("History: append {}", operation);
        self.operations.push(operation);
        self.cursor = self.operations.len();
    }

    /// Apply `operation` and record it if it succeeded
    pub fn execute(&mut self, operation: C, level: &mut Level) -> CommandResult {
        operation.activate(level)?;
        self.append(operation);
        Ok(())
    }

    /// Step back over the last applied operation.
    ///
    /// Returns false only when there is nothing to undo. A failing replay is
    /// logged and still moves the cursor.
    pub fn undo(&mut self, level: &mut Level) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let operation = &self.operations[self.cursor];
        log::debug!("History: undo {}", operation);
        if let Err(err) = operation.undo(level) {
            log::error!("History: undo failed: {}", err);
        }
        true
    }

    /// Re-apply the operation at the cursor.
    ///
    /// Returns false only when there is nothing to redo.
    pub fn redo(&mut self, level: &mut Level) -> bool {
        let Some(operation) = self.operations.get(self.cursor) else {
            return false;
        };
        log::debug!("History: redo {}", operation);
        if let Err(err) = operation.activate(level) {
            log::error!("History: redo failed: {}", err);
        }
        self.cursor += 1;
        true
    }

    /// Move by one step in the given direction
    pub fn step(&mut self, step: HistoryStep, level: &mut Level) -> bool {
        match step {
            HistoryStep::Undo => self.undo(level),
            HistoryStep::Redo => self.redo(level),
        }
    }

    /// Drop every recorded operation
    pub fn clear(&mut self) {
        self.operations.clear();
        self.cursor = 0;
    }

    pub fn operations(&self) -> &[C] {
        &self.operations
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Returns true if there are operations that can be undone
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Returns true if there are operations that can be redone
    pub fn can_redo(&self) -> bool {
        self.cursor < self.operations.len()
    }
}
