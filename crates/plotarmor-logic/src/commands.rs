//! Operator command grammar and tab-completion filtering.
//!
//! Pure string handling only: name resolution and roster mutation live in
//! the runtime crate. Subcommands are matched case-insensitively, as are
//! completion prefixes.

/// Subcommands offered for first-argument completion.
pub const SUBCOMMANDS: [&str; 3] = ["add", "remove", "list"];

/// A successfully parsed operator command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// Grant protection to a named player.
    Add(&'a str),
    /// Revoke protection from a named player.
    Remove(&'a str),
    /// Show the current roster.
    List,
}

/// Why an input failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// `add`/`remove` given without a player name; `verb` names which.
    MissingPlayer { verb: &'static str },
    /// Empty input or an unknown subcommand.
    Unrecognized,
}

/// Parse the arguments following the command label. Extra trailing
/// arguments are ignored.
pub fn parse<'a>(args: &[&'a str]) -> Result<Command<'a>, ParseError> {
    let (sub, rest) = match args.split_first() {
        Some((sub, rest)) => (sub, rest),
        None => return Err(ParseError::Unrecognized),
    };

    match sub.to_ascii_lowercase().as_str() {
        "add" => match rest.first() {
            Some(name) => Ok(Command::Add(name)),
            None => Err(ParseError::MissingPlayer { verb: "add" }),
        },
        "remove" => match rest.first() {
            Some(name) => Ok(Command::Remove(name)),
            None => Err(ParseError::MissingPlayer { verb: "remove" }),
        },
        "list" => Ok(Command::List),
        _ => Err(ParseError::Unrecognized),
    }
}

/// First-argument completion: subcommands matching the prefix.
pub fn complete_subcommand(prefix: &str) -> Vec<String> {
    let prefix = prefix.to_ascii_lowercase();
    SUBCOMMANDS
        .iter()
        .filter(|s| s.starts_with(&prefix))
        .map(|s| s.to_string())
        .collect()
}

/// Second-argument completion: candidate names matching the prefix,
/// case-insensitively. Candidate order is preserved.
pub fn complete_name<'a>(
    candidates: impl IntoIterator<Item = &'a str>,
    prefix: &str,
) -> Vec<String> {
    let prefix = prefix.to_ascii_lowercase();
    candidates
        .into_iter()
        .filter(|name| name.to_ascii_lowercase().starts_with(&prefix))
        .map(|name| name.to_string())
        .collect()
}
