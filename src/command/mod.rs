mod commands;
mod history;
mod parser;

use thiserror::Error;

use crate::tokenizer::TokenError;

pub use commands::{Command, Operation};
pub use history::{CommandHistory, HistoryStep};
pub use parser::{EditorCommand, parse_command};

/// Result type for command operations
pub type CommandResult = Result<(), CommandError>;

/// Errors that can occur while parsing or replaying commands
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    /// The verb is not part of the command set
    #[error("Command does not exist: {0}")]
    UnknownCommand(String),

    /// The verb exists but its arguments are malformed
    #[error("{verb}: {source}")]
    Arguments {
        verb: &'static str,
        #[source]
        source: TokenError,
    },

    /// The level rejected the edit
    #[error("{0}")]
    Rejected(String),

    /// A recorded command no longer applies to the level it is replayed on
    #[error("replay of {command} violated its contract: {reason}")]
    Contract { command: String, reason: &'static str },
}
