#![warn(clippy::all, rust_2018_idioms)]

pub mod codec;
pub mod command;
pub mod config;
pub mod input;
pub mod level;
pub mod state;
pub mod tokenizer;
pub mod tools;

pub use codec::{Codec, CodecError};
pub use command::{Command, CommandError, CommandHistory, EditorCommand, Operation};
pub use config::{Config, ConfigError, EditorConfig};
pub use input::{InputEvent, Key, PointerButton, ScreenPos};
pub use level::{Level, LevelError, LevelStore, Line, Vertex};
pub use state::{Editor, EditorContext, View};
pub use tokenizer::{TokenError, Tokens, tokenize};
pub use tools::{Tool, ToolBehavior};
