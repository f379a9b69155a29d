use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use portfolio_desk::app::{ClockFace, CommandRecord, DesktopController, Notification, TimerEvent, Theme};
use portfolio_desk::config::DesktopConfig;
use portfolio_desk::domain::shutdown::{ShutdownStage, ShutdownState};
use portfolio_desk::domain::window::{Window, WindowId};
use portfolio_desk::input::Key;
use portfolio_desk::platform::{SystemClock, TimerQueue};
use portfolio_desk::ui::{SceneRenderer, Surface};

#[derive(Parser, Debug)]
#[command(about = "Terminal-driven simulated desktop")]
struct Cli {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write a PNG snapshot of the final desktop here
    #[arg(long)]
    snapshot: Option<PathBuf>,
    #[arg(long)]
    width: Option<i32>,
    #[arg(long)]
    height: Option<i32>,
}

/// Prints what a page would show
#[derive(Debug, Default)]
struct ConsoleSurface;

impl Surface for ConsoleSurface {
    fn append_output(&mut self, record: &CommandRecord) {
        println!("{}", record.echo);
        for line in record.output.lines() {
            println!("{line}");
        }
    }

    fn clear_output(&mut self) {
        print!("\x1b[2J\x1b[H");
    }

    fn set_input_line(&mut self, _text: &str, _caret: usize) {}

    fn focus_command_line(&mut self) {}

    fn show_notification(&mut self, notification: &Notification) {
        let bell = if notification.chime { "\x07" } else { "" };
        println!("[notice] {}{bell}", notification.text);
    }

    fn hide_notification(&mut self) {}

    fn update_window(&mut self, _window: &Window, _focused: bool) {}

    fn show_tab(&mut self, window: WindowId, tab: &str, _content_id: &str) {
        println!("[{window}] tab: {tab}");
    }

    fn set_start_menu(&mut self, open: bool) {
        println!("[menu] {}", if open { "open" } else { "closed" });
    }

    fn set_theme(&mut self, _theme: Theme) {}

    fn set_clock(&mut self, _face: &ClockFace) {}

    fn set_desktop_visible(&mut self, _visible: bool) {}

    fn set_shutdown_control_animating(&mut self) {}

    fn shutdown_progress(&mut self, state: ShutdownState, message: Option<&str>) {
        if let Some(message) = message {
            println!("[{:>3}%] {message}", state.progress_percent);
        }
    }

    fn fade_shutdown_screen(&mut self) {}

    fn show_power_off_screen(&mut self) {
        println!("System Powered Off");
        println!("Press F5 or refresh to restart the portfolio");
    }
}

type Desktop = DesktopController<TimerQueue<TimerEvent>, SystemClock, ConsoleSurface>;

fn load_config(cli: &Cli) -> Result<DesktopConfig> {
    let mut config = match &cli.config {
        Some(path) => DesktopConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => DesktopConfig::default(),
    };
    if let Some(width) = cli.width {
        config.viewport.width = width;
    }
    if let Some(height) = cli.height {
        config.viewport.height = height;
    }
    config.validate().context("validating command-line overrides")?;
    Ok(config)
}

/// Desktop controls that have no typed-command equivalent, prefixed with `:`
fn run_control(desktop: &mut Desktop, line: &str) {
    let mut parts = line.split_whitespace();
    let verb = parts.next().unwrap_or_default();
    let arg = parts.next().unwrap_or_default();
    let extra = parts.next().unwrap_or_default();
    let target = desktop.windows().resolve(arg);

    match (verb, target) {
        ("open", _) => {
            desktop.click_icon(arg);
        }
        ("touch", _) => {
            desktop.touch_icon(arg);
        }
        ("close", Some(id)) => {
            desktop.close_window(id);
        }
        ("minimize", Some(id)) => {
            desktop.minimize_window(id);
        }
        ("maximize", Some(id)) => {
            desktop.toggle_maximize(id);
        }
        ("select", Some(id)) => {
            desktop.switch_tab(id, extra);
        }
        ("menu", _) => {
            desktop.toggle_start_menu();
        }
        ("sound", _) => {
            desktop.toggle_sound();
        }
        ("theme", _) => {
            desktop.toggle_theme();
        }
        ("help", _) => {
            desktop.show_help();
        }
        ("shutdown", _) => {
            desktop.trigger_shutdown();
        }
        ("tab", _) => {
            // Completion starts from an empty line, not from an earlier partial.
            desktop.clear_command_line();
            for ch in arg.chars() {
                desktop.handle_key(Key::Char(ch));
            }
            desktop.handle_key(Key::Tab);
            println!("> {}", desktop.command_line().text());
        }
        _ => warn!(line, "unknown control"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let tick = Duration::from_millis(config.timing.shutdown_tick_ms);

    let started = Instant::now();
    let elapsed = || started.elapsed().as_millis() as u64;

    let mut desktop: Desktop = DesktopController::new(config, TimerQueue::new(), SystemClock, ConsoleSurface);
    desktop.boot();
    desktop.pump(elapsed());

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        desktop.pump(elapsed());
        match line.strip_prefix(':') {
            Some(control) => run_control(&mut desktop, control),
            None => {
                for ch in line.chars() {
                    desktop.handle_key(Key::Char(ch));
                }
                desktop.handle_key(Key::Enter);
            }
        }
        desktop.pump(elapsed());
        stdout.flush().context("flushing stdout")?;
    }

    // Let a requested shutdown play out before exiting.
    while desktop.is_shutdown_requested() && desktop.shutdown_state().stage != ShutdownStage::Terminal {
        thread::sleep(tick);
        desktop.pump(elapsed());
    }
    let pending = desktop.scheduler().pending();
    if pending > 0 {
        info!(pending, "exiting with timers still scheduled");
    }

    if let Some(path) = &cli.snapshot {
        let renderer = SceneRenderer::new();
        let pixmap = renderer.render_scene(&desktop.scene(), 1.0)?;
        renderer.save_png(&pixmap, path)?;
        info!(path = %path.display(), "snapshot written");
    }
    Ok(())
}
