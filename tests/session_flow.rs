//! End-to-end desktop sessions driven through the controller with virtual time.

use chrono::{FixedOffset, TimeZone};

use portfolio_desk::app::{DesktopController, OutputBlock, TimerEvent};
use portfolio_desk::config::DesktopConfig;
use portfolio_desk::domain::core::Point;
use portfolio_desk::domain::shutdown::ShutdownStage;
use portfolio_desk::domain::window::{WindowId, WindowState};
use portfolio_desk::input::{Key, TouchEvent, TouchPhase};
use portfolio_desk::platform::{FixedClock, Scheduler, TimerQueue};
use portfolio_desk::ui::{RecordingSurface, SurfaceCall};

type Desktop = DesktopController<TimerQueue<TimerEvent>, FixedClock, RecordingSurface>;

fn desktop_with(config: DesktopConfig) -> Desktop {
    let clock = FixedClock(
        FixedOffset::east_opt(3_600)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 18, 8, 15, 0)
            .unwrap(),
    );
    let mut desktop = DesktopController::new(config, TimerQueue::new(), clock, RecordingSurface::new());
    desktop.boot();
    desktop
}

fn desktop() -> Desktop {
    desktop_with(DesktopConfig::default())
}

fn type_line(desktop: &mut Desktop, text: &str) {
    for ch in text.chars() {
        desktop.handle_key(Key::Char(ch));
    }
    desktop.handle_key(Key::Enter);
}

fn state_of(desktop: &Desktop, id: WindowId) -> WindowState {
    desktop.windows().get(id).unwrap().state
}

#[test]
fn open_and_close_move_focus() {
    let mut desktop = desktop();
    type_line(&mut desktop, "about");
    assert_eq!(state_of(&desktop, WindowId::About), WindowState::Open);
    assert_eq!(desktop.state().focused, Some(WindowId::About));
    assert_eq!(state_of(&desktop, WindowId::Terminal), WindowState::Open);

    assert!(desktop.close_window(WindowId::About));
    assert_eq!(state_of(&desktop, WindowId::About), WindowState::Closed);
    assert_eq!(desktop.state().focused, None);
}

#[test]
fn unknown_and_empty_input() {
    let mut desktop = desktop();
    type_line(&mut desktop, "   ");
    assert!(desktop.interpreter().log().is_empty());

    type_line(&mut desktop, "rm -rf /");
    let record = desktop.interpreter().log().last().unwrap();
    assert_eq!(record.output, OutputBlock::NotFound("rm -rf /".into()));
    assert!(!desktop.open_window_named("kernel"));
    assert!(desktop.open_window_named("hacking"));
    assert_eq!(desktop.state().focused, Some(WindowId::Hacking));
}

#[test]
fn tab_completion_end_to_end() {
    let mut desktop = desktop();
    desktop.handle_key(Key::Char('a'));
    desktop.handle_key(Key::Char('b'));
    desktop.handle_key(Key::Tab);
    assert_eq!(desktop.command_line().text(), "about");
    desktop.handle_key(Key::Enter);
    assert_eq!(state_of(&desktop, WindowId::About), WindowState::Open);

    desktop.handle_key(Key::Char('s'));
    desktop.handle_key(Key::Tab);
    let record = desktop.interpreter().log().last().unwrap();
    assert_eq!(record.output, OutputBlock::NotFound("s".into()));
}

#[test]
fn clear_keeps_prompt_usable() {
    let mut desktop = desktop();
    type_line(&mut desktop, "ls");
    type_line(&mut desktop, "banner");
    type_line(&mut desktop, "clear");
    assert!(desktop.interpreter().log().is_empty());
    type_line(&mut desktop, "whoami");
    assert_eq!(desktop.interpreter().log().len(), 1);
}

#[test]
fn shutdown_is_idempotent() {
    let mut desktop = desktop();
    type_line(&mut desktop, "shutdown");
    type_line(&mut desktop, "shutdown");
    desktop.pump(1_000);
    assert!(desktop.state().is_shutting_down());

    desktop.pump(1_300);
    let progress = desktop.shutdown_state().progress_percent;
    assert_eq!(progress, 10);

    assert!(!desktop.trigger_shutdown());
    type_line(&mut desktop, "shutdown");
    desktop.pump(1_300);
    assert_eq!(desktop.shutdown_state().progress_percent, progress);

    desktop.pump(10_000);
    assert_eq!(desktop.shutdown_state().stage, ShutdownStage::Terminal);
    let power_offs = desktop
        .surface()
        .calls
        .iter()
        .filter(|call| **call == SurfaceCall::PowerOff)
        .count();
    assert_eq!(power_offs, 1);
}

#[test]
fn timers_scheduled_before_shutdown_do_nothing() {
    let mut desktop = desktop();
    desktop.touch_icon("education");
    desktop.show_help();
    desktop.trigger_shutdown();
    desktop.pump(500);
    assert_eq!(state_of(&desktop, WindowId::Education), WindowState::Closed);
    assert!(desktop.interpreter().log().is_empty());
    assert!(desktop.notifications().current().is_none());
}

#[test]
fn touch_drag_moves_window_and_blocks_scroll() {
    let mut desktop = desktop();
    let geometry = desktop.windows().get(WindowId::Terminal).unwrap().geometry;
    let grab = Point::new(geometry.x + 30, geometry.y + 12);
    let to = Point::new(grab.x - 25, grab.y + 40);

    let touch = |phase, touches: Vec<Point>, changed: Vec<Point>, time| TouchEvent {
        phase,
        touches,
        changed,
        time,
    };
    desktop.handle_touch(&touch(TouchPhase::Start, vec![grab], vec![grab], 0));
    assert!(desktop.state().is_dragging());
    assert!(desktop.handle_touch(&touch(TouchPhase::Move, vec![to], vec![to], 30)));
    desktop.handle_touch(&touch(TouchPhase::End, vec![], vec![to], 400));
    assert!(!desktop.state().is_dragging());

    let moved = desktop.windows().get(WindowId::Terminal).unwrap().geometry;
    assert_eq!((moved.x, moved.y), (geometry.x - 25, geometry.y + 40));
}

#[test]
fn config_timings_drive_schedule() {
    let config = DesktopConfig::from_toml_str(
        r#"
        [timing]
        minimize_ms = 50
        notification_ms = 200
        "#,
    )
    .unwrap();
    let mut desktop = desktop_with(config);
    desktop.minimize_window(WindowId::Terminal);
    desktop.pump(50);
    assert_eq!(state_of(&desktop, WindowId::Terminal), WindowState::Closed);
    desktop.pump(200);
    assert!(desktop.notifications().current().is_none());
    assert!(desktop.scheduler().now() >= 200);
}
