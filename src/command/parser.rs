use super::CommandError;
use crate::tokenizer::{TokenResult, Tokens};

/// A command typed on the editor's command line
#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    Quit,
    New,
    Open(String),
    Save(String),
    Vertex { x: f64, y: f64 },
    Line { v0: u16, v1: u16 },
    DeleteVertex(usize),
    DeleteLine { v0: u16, v1: u16 },
    Undo,
    Redo,
}

/// Parse a tokenized command line.
///
/// Returns `Ok(None)` for an empty line.
pub fn parse_command(tokens: &[String]) -> Result<Option<EditorCommand>, CommandError> {
    let mut args = Tokens::new(tokens);
    let Some(verb) = args.next_word() else {
        return Ok(None);
    };

    let command = match verb {
        "q" | "quit" => arguments("quit", args, |_| Ok(EditorCommand::Quit))?,
        "n" | "new" => arguments("new", args, |_| Ok(EditorCommand::New))?,
        "o" | "open" => arguments("open", args, |a| Ok(EditorCommand::Open(a.next_arg()?)))?,
        "s" | "save" => arguments("save", args, |a| Ok(EditorCommand::Save(a.next_arg()?)))?,
        "v" | "vertex" => arguments("vertex", args, |a| {
            Ok(EditorCommand::Vertex {
                x: a.next_arg()?,
                y: a.next_arg()?,
            })
        })?,
        "l" | "line" => arguments("line", args, |a| {
            Ok(EditorCommand::Line {
                v0: a.next_arg()?,
                v1: a.next_arg()?,
            })
        })?,
        "d" | "delete" => match args.next_word() {
            Some("v" | "vertex") => arguments("delete vertex", args, |a| {
                Ok(EditorCommand::DeleteVertex(a.next_arg()?))
            })?,
            Some("l" | "line") => arguments("delete line", args, |a| {
                Ok(EditorCommand::DeleteLine {
                    v0: a.next_arg()?,
                    v1: a.next_arg()?,
                })
            })?,
            Some(other) => return Err(CommandError::UnknownCommand(format!("delete {other}"))),
            None => return Err(CommandError::UnknownCommand("delete".to_owned())),
        },
        "u" | "undo" => arguments("undo", args, |_| Ok(EditorCommand::Undo))?,
        "r" | "redo" => arguments("redo", args, |_| Ok(EditorCommand::Redo))?,
        other => return Err(CommandError::UnknownCommand(other.to_owned())),
    };

    Ok(Some(command))
}

fn arguments<'a>(
    verb: &'static str,
    mut args: Tokens<'a>,
    parse: impl FnOnce(&mut Tokens<'a>) -> TokenResult<EditorCommand>,
) -> Result<EditorCommand, CommandError> {
    parse(&mut args)
        .and_then(|command| args.finish().map(|()| command))
        .map_err(|source| CommandError::Arguments { verb, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::{TokenError, tokenize};

    fn parse(line: &str) -> Result<Option<EditorCommand>, CommandError> {
        parse_command(&tokenize(line))
    }

    #[test]
    fn test_parse_verbs() {
        assert_eq!(parse("quit"), Ok(Some(EditorCommand::Quit)));
        assert_eq!(parse("n"), Ok(Some(EditorCommand::New)));
        assert_eq!(
            parse("open \"my level.lvl\""),
            Ok(Some(EditorCommand::Open("my level.lvl".into())))
        );
        assert_eq!(parse("s a.lvl"), Ok(Some(EditorCommand::Save("a.lvl".into()))));
        assert_eq!(
            parse("vertex 1.5 -2"),
            Ok(Some(EditorCommand::Vertex { x: 1.5, y: -2.0 }))
        );
        assert_eq!(parse("l 0 3"), Ok(Some(EditorCommand::Line { v0: 0, v1: 3 })));
        assert_eq!(parse("delete vertex 4"), Ok(Some(EditorCommand::DeleteVertex(4))));
        assert_eq!(
            parse("d l 2 1"),
            Ok(Some(EditorCommand::DeleteLine { v0: 2, v1: 1 }))
        );
        assert_eq!(parse("undo"), Ok(Some(EditorCommand::Undo)));
        assert_eq!(parse("r"), Ok(Some(EditorCommand::Redo)));
    }

    #[test]
    fn test_empty_line() {
        assert_eq!(parse("   "), Ok(None));
    }

    #[test]
    fn test_unknown_commands() {
        assert_eq!(
            parse("jump 3"),
            Err(CommandError::UnknownCommand("jump".into()))
        );
        assert_eq!(
            parse("delete face 1"),
            Err(CommandError::UnknownCommand("delete face".into()))
        );
        assert!(matches!(parse("delete"), Err(CommandError::UnknownCommand(_))));
    }

    #[test]
    fn test_argument_errors() {
        assert_eq!(
            parse("vertex 1"),
            Err(CommandError::Arguments {
                verb: "vertex",
                source: TokenError::MissingArgument { position: 2 },
            })
        );
        assert!(matches!(
            parse("line 0 x"),
            Err(CommandError::Arguments { verb: "line", .. })
        ));
        assert!(matches!(
            parse("line 0 70000"),
            Err(CommandError::Arguments { verb: "line", .. })
        ));
        assert!(matches!(
            parse("quit now"),
            Err(CommandError::Arguments {
                source: TokenError::TrailingTokens { .. },
                ..
            })
        ));
    }
}
