//! Command vocabulary, parsing and tab completion
//!
//! Maps typed text to a fixed set of command tokens. Everything here is pure:
//! no output is produced and nothing is opened, that is the interpreter's job.
//!
//! ## Matching rules
//! - Input is trimmed and case-folded before matching
//! - The whole line must equal a token; no command takes arguments, so any
//!   trailing text makes the line unknown
//! - Empty input is distinct from unknown input

use crate::domain::window::WindowId;

/// Every recognized command token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Help,
    About,
    Skills,
    Projects,
    Srat,
    Contact,
    Education,
    Clear,
    Date,
    Whoami,
    Gui,
    Pwd,
    Ls,
    Echo,
    Neofetch,
    Banner,
    Shutdown,
}

impl Command {
    /// The fixed vocabulary, in help-listing order
    pub const ALL: [Command; 17] = [
        Command::Help,
        Command::About,
        Command::Skills,
        Command::Projects,
        Command::Srat,
        Command::Contact,
        Command::Education,
        Command::Clear,
        Command::Date,
        Command::Whoami,
        Command::Gui,
        Command::Pwd,
        Command::Ls,
        Command::Echo,
        Command::Neofetch,
        Command::Banner,
        Command::Shutdown,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::About => "about",
            Command::Skills => "skills",
            Command::Projects => "projects",
            Command::Srat => "srat",
            Command::Contact => "contact",
            Command::Education => "education",
            Command::Clear => "clear",
            Command::Date => "date",
            Command::Whoami => "whoami",
            Command::Gui => "gui",
            Command::Pwd => "pwd",
            Command::Ls => "ls",
            Command::Echo => "echo",
            Command::Neofetch => "neofetch",
            Command::Banner => "banner",
            Command::Shutdown => "shutdown",
        }
    }

    /// One-line description shown by `help`
    pub fn summary(&self) -> &'static str {
        match self {
            Command::Help => "Show this help message",
            Command::About => "Open About Me terminal",
            Command::Skills => "View skills and expertise",
            Command::Projects => "View projects portfolio",
            Command::Srat => "SRat team information",
            Command::Contact => "Contact information",
            Command::Education => "Education details",
            Command::Clear => "Clear terminal screen",
            Command::Date => "Show current date and time",
            Command::Whoami => "Show user information",
            Command::Gui => "Open graphical interface",
            Command::Pwd => "Print working directory",
            Command::Ls => "List directory contents",
            Command::Echo => "Display a line of text",
            Command::Neofetch => "Display system information",
            Command::Banner => "Display ASCII banner",
            Command::Shutdown => "Shutdown the system",
        }
    }

    pub fn from_token(token: &str) -> Option<Command> {
        Command::ALL.into_iter().find(|cmd| cmd.token() == token)
    }

    /// Window this command opens as a side effect
    pub fn window(&self) -> Option<WindowId> {
        match self {
            Command::About => Some(WindowId::About),
            Command::Skills => Some(WindowId::Skills),
            Command::Projects => Some(WindowId::Projects),
            Command::Srat => Some(WindowId::Srat),
            Command::Contact => Some(WindowId::Contact),
            Command::Education => Some(WindowId::Education),
            _ => None,
        }
    }
}

/// Trims and case-folds a raw input line
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Result of matching a normalized line against the vocabulary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    /// Nothing but whitespace was typed
    Empty,
    /// A recognized command
    Known(Command),
    /// Anything else; carries the normalized text for the error message
    Unknown(String),
}

/// Parses a raw input line
pub fn parse(raw: &str) -> ParsedCommand {
    let line = normalize(raw);
    if line.is_empty() {
        return ParsedCommand::Empty;
    }

    match Command::from_token(&line) {
        Some(command) => ParsedCommand::Known(command),
        None => ParsedCommand::Unknown(line),
    }
}

/// Outcome of tab completion on a partial line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Exactly one token matches; the line becomes this token
    Unique(&'static str),
    /// Several tokens match; the partial text is submitted as typed
    Ambiguous(Vec<&'static str>),
    /// Nothing matches; the line is left alone
    NoMatch,
}

/// Completes a partial line against the vocabulary by prefix
pub fn complete(partial: &str) -> Completion {
    let prefix = normalize(partial);
    let matches: Vec<&'static str> = Command::ALL
        .iter()
        .map(Command::token)
        .filter(|token| token.starts_with(prefix.as_str()))
        .collect();

    match matches.len() {
        0 => Completion::NoMatch,
        1 => Completion::Unique(matches[0]),
        _ => Completion::Ambiguous(matches),
    }
}
