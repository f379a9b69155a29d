//! Command interpreter
//!
//! Turns a submitted line into an output record and a list of side effects.
//! The interpreter never touches windows or timers itself; the controller
//! applies the returned [`Effect`]s. Its only state is the append-only output
//! log, which `clear` truncates.

use std::time::Duration;

use chrono::{DateTime, FixedOffset};
use tracing::debug;

use crate::config::Profile;
use crate::domain::command::{self, Command, ParsedCommand};
use crate::domain::window::WindowId;

/// Rendered result of one command, independent of styling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputBlock {
    /// A single line of plain text
    Text(String),
    /// Several lines shown as a paragraph list
    Lines(Vec<String>),
    /// Monospace block kept verbatim (ASCII art, system info)
    Preformatted(String),
    /// Unknown command, carrying the offending text
    NotFound(String),
}

impl OutputBlock {
    /// Plain text lines for hosts without rich rendering
    pub fn lines(&self) -> Vec<String> {
        match self {
            OutputBlock::Text(text) => vec![text.clone()],
            OutputBlock::Lines(lines) => lines.clone(),
            OutputBlock::Preformatted(text) => text.lines().map(str::to_string).collect(),
            OutputBlock::NotFound(text) => vec![
                format!("Command not found: {text}"),
                "Type help for available commands.".to_string(),
            ],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines().iter().all(|line| line.trim().is_empty())
    }
}

/// One entry in the terminal scrollback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRecord {
    /// Prompt and command as echoed, e.g. `root@host:~# help`
    pub echo: String,
    pub output: OutputBlock,
}

/// Side effect requested by a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    OpenWindow(WindowId),
    /// Scrollback was truncated; the input line stays armed
    ClearScreen,
    /// Start the shutdown sequence after the acknowledgement renders
    ScheduleShutdown,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandResult {
    pub record: Option<CommandRecord>,
    pub effects: Vec<Effect>,
}

/// Host-supplied facts some commands print
#[derive(Debug, Clone, Copy)]
pub struct CommandContext<'a> {
    pub profile: &'a Profile,
    pub now: DateTime<FixedOffset>,
    pub uptime: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct CommandInterpreter {
    log: Vec<CommandRecord>,
}

impl CommandInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scrollback in submission order
    pub fn log(&self) -> &[CommandRecord] {
        &self.log
    }

    /// Interprets one raw line. Never fails: unknown input yields a not-found record.
    pub fn interpret(&mut self, raw: &str, ctx: &CommandContext<'_>) -> CommandResult {
        let (command, text) = match command::parse(raw) {
            ParsedCommand::Empty => return CommandResult::default(),
            ParsedCommand::Unknown(text) => {
                debug!(%text, "command not found");
                let record = self.append(ctx, &text, OutputBlock::NotFound(text.clone()));
                return CommandResult {
                    record: Some(record),
                    effects: Vec::new(),
                };
            }
            ParsedCommand::Known(command) => (command, command::normalize(raw)),
        };

        if command == Command::Clear {
            self.log.clear();
            return CommandResult {
                record: None,
                effects: vec![Effect::ClearScreen],
            };
        }

        let mut effects = Vec::new();
        if let Some(window) = command.window() {
            effects.push(Effect::OpenWindow(window));
        }
        if command == Command::Shutdown {
            effects.push(Effect::ScheduleShutdown);
        }

        let output = render(command, ctx);
        let record = self.append(ctx, &text, output);
        CommandResult {
            record: Some(record),
            effects,
        }
    }

    fn append(&mut self, ctx: &CommandContext<'_>, text: &str, output: OutputBlock) -> CommandRecord {
        let record = CommandRecord {
            echo: format!("{} {}", ctx.profile.prompt(), text),
            output,
        };
        self.log.push(record.clone());
        record
    }
}

fn render(command: Command, ctx: &CommandContext<'_>) -> OutputBlock {
    let profile = ctx.profile;
    match command {
        Command::Help => {
            let mut lines = vec!["Available Commands:".to_string()];
            lines.extend(
                Command::ALL
                    .iter()
                    .map(|cmd| format!("{} - {}", cmd.token(), cmd.summary())),
            );
            OutputBlock::Lines(lines)
        }
        Command::About => OutputBlock::Text("Opening About Me terminal...".into()),
        Command::Skills => OutputBlock::Text("Opening Skills terminal...".into()),
        Command::Projects => OutputBlock::Text("Opening Projects terminal...".into()),
        Command::Srat => OutputBlock::Text("Opening SRat Team terminal...".into()),
        Command::Contact => OutputBlock::Text("Opening Contact terminal...".into()),
        Command::Education => OutputBlock::Text("Opening Education terminal...".into()),
        Command::Shutdown => OutputBlock::Text("Initiating shutdown sequence...".into()),
        Command::Gui => OutputBlock::Lines(vec![
            "Graphical Interface: Already running!".into(),
            "Try clicking on desktop icons or using the Kali Menu.".into(),
            "Current desktop applications:".into(),
            "• Terminal Emulator".into(),
            "• File Browser (Projects)".into(),
            "• System Monitor".into(),
            "• Settings Panel".into(),
        ]),
        Command::Date => OutputBlock::Text(ctx.now.format("%a %b %d %Y %H:%M:%S GMT%z").to_string()),
        Command::Whoami => OutputBlock::Lines(vec![
            format!("User: {}", profile.user),
            format!("Groups: {}", profile.groups.join(", ")),
            format!("Home: {}", profile.home),
            format!("Shell: {}", profile.shell),
            format!("Description: {}", profile.description),
        ]),
        Command::Pwd => OutputBlock::Text(profile.working_directory()),
        Command::Ls => OutputBlock::Lines(vec![
            "Desktop/        Projects/        Documents/".into(),
            "Downloads/      Music/           Videos/".into(),
            "about.txt       skills.md        resume.pdf".into(),
            "portfolio.html  srat-docs/       jee-notes/".into(),
        ]),
        Command::Echo => OutputBlock::Text("Usage: echo [text] - Try typing something after echo".into()),
        Command::Neofetch => {
            let hours_total = ctx.uptime.as_secs() / 3600;
            let (days, hours) = (hours_total / 24, hours_total % 24);
            OutputBlock::Preformatted(format!(
                "{user}@{host}\n\
                 --------------------\n\
                 OS: {os}\n\
                 Host: Web Browser\n\
                 Kernel: 5.15.0-kali3-amd64\n\
                 Uptime: {days} days, {hours} hours\n\
                 Shell: WebTerminal 1.0\n\
                 CPU: Virtual CPU @ 2.0GHz\n\
                 Memory: 1024MB / 2048MB",
                user = profile.user,
                host = profile.host,
                os = profile.os_name,
            ))
        }
        Command::Banner => OutputBlock::Preformatted(
            "╔══════════════════════════════════════════╗\n\
             ║   C O - F O U N D E R   S R A T   T E A M ║\n\
             ║         JEE ASPIRANT | DEVELOPER          ║\n\
             ╚══════════════════════════════════════════╝"
                .into(),
        ),
        // Handled before rendering; kept so the match stays exhaustive.
        Command::Clear => OutputBlock::Text(String::new()),
    }
}
