//! Desktop controller and coordination layer
//!
//! The controller routes host input to the gesture tracker, command line and
//! window manager, turns interpreter effects into window and timer work, and
//! reports every visible change to the [`Surface`]. Timers are requested from
//! an injected [`Scheduler`] and come back through [`DesktopController::pump`],
//! so the whole desktop runs against virtual time in tests.

use std::time::Duration;

use tracing::{debug, info};

use crate::app::interpreter::{CommandContext, CommandInterpreter, Effect};
use crate::app::notification::NotificationService;
use crate::app::shell::{ClockFace, StartMenu, Theme};
use crate::app::state::UiState;
use crate::app::window_manager::{MaximizeToggle, WindowManager};
use crate::config::DesktopConfig;
use crate::domain::gesture::Millis;
use crate::domain::shutdown::{ShutdownSequencer, ShutdownState};
use crate::domain::window::{WindowControl, WindowId};
use crate::input::{
    CommandLine, Gesture, InputEvent, Key, LineAction, MouseAdapter, MouseEvent, PointerGestureTracker,
    TouchAdapter, TouchEvent,
};
use crate::platform::{Scheduler, TimerId, WallClock};
use crate::ui::{Scene, Surface};

/// Everything the controller schedules for later
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Hide the notification with this generation
    HideNotification(u64),
    MinimizeComplete(WindowId),
    FocusCommandLine,
    Welcome,
    ClockTick,
    /// Submit `help` on behalf of the help control
    RunHelp,
    OpenFromIcon(WindowId),
    BeginShutdown,
    ShutdownTick,
    FadeOut,
    PowerOff,
}

/// Message shown once the desktop has booted
pub const WELCOME_MESSAGE: &str = "Kali Linux Portfolio v3.0 loaded successfully!";

/// Main desktop controller
///
/// Owns every component and the host collaborators. All public operations
/// are safe to call at any time; once shutdown has begun they do nothing.
pub struct DesktopController<S, C, R>
where
    S: Scheduler<TimerEvent>,
    C: WallClock,
    R: Surface,
{
    config: DesktopConfig,
    state: UiState,
    windows: WindowManager,
    interpreter: CommandInterpreter,
    notifications: NotificationService,
    shutdown: ShutdownSequencer,
    tracker: PointerGestureTracker,
    mouse: MouseAdapter,
    touch: TouchAdapter,
    line: CommandLine,
    menu: StartMenu,
    theme: Theme,
    scheduler: S,
    clock: C,
    surface: R,
    boot_time: Millis,
    clock_timer: Option<TimerId>,
    shutdown_timer: Option<TimerId>,
    shutdown_requested: bool,
}

impl<S, C, R> DesktopController<S, C, R>
where
    S: Scheduler<TimerEvent>,
    C: WallClock,
    R: Surface,
{
    /// Creates a controller with every window closed. Call
    /// [`boot`](Self::boot) to bring the desktop up.
    pub fn new(config: DesktopConfig, scheduler: S, clock: C, surface: R) -> Self {
        let viewport = config.viewport();
        Self {
            state: UiState::new(viewport),
            windows: WindowManager::new(viewport, config.window.width, config.window.height),
            interpreter: CommandInterpreter::new(),
            notifications: NotificationService::new(config.sound_on),
            shutdown: ShutdownSequencer::new(config.timing.shutdown_step),
            tracker: PointerGestureTracker::new(config.gesture.tap_policy()),
            mouse: MouseAdapter,
            touch: TouchAdapter::new(config.gesture.double_tap_ms),
            line: CommandLine::new(),
            menu: StartMenu::default(),
            theme: Theme::default(),
            boot_time: scheduler.now(),
            scheduler,
            clock,
            surface,
            clock_timer: None,
            shutdown_timer: None,
            shutdown_requested: false,
            config,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn windows(&self) -> &WindowManager {
        &self.windows
    }

    pub fn interpreter(&self) -> &CommandInterpreter {
        &self.interpreter
    }

    pub fn notifications(&self) -> &NotificationService {
        &self.notifications
    }

    pub fn shutdown_state(&self) -> ShutdownState {
        self.shutdown.state()
    }

    pub fn command_line(&self) -> &CommandLine {
        &self.line
    }

    pub fn start_menu(&self) -> StartMenu {
        self.menu
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn surface(&self) -> &R {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut R {
        &mut self.surface
    }

    /// True once shutdown has started or been scheduled by the `shutdown` command
    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_requested
    }

    /// Snapshot of what a rasterizer should draw
    pub fn scene(&self) -> Scene<'_> {
        Scene {
            viewport: self.state.viewport,
            windows: self.windows.windows(),
            focused: self.state.focused,
            theme: self.theme,
            notification: self.notifications.current().is_some(),
            shutdown: self.shutdown.state(),
        }
    }

    /// Time since the controller was created
    pub fn uptime(&self) -> Duration {
        Duration::from_millis(self.scheduler.now().saturating_sub(self.boot_time))
    }

    /// Opens the terminal, starts the taskbar clock and queues the welcome
    /// notification
    pub fn boot(&mut self) {
        info!("desktop booting");
        self.surface.set_theme(self.theme);
        self.surface.set_desktop_visible(true);
        self.open_window(WindowId::Terminal);
        self.render_clock();
        self.clock_timer = Some(self.scheduler.every(self.config.timing.clock_tick_ms, TimerEvent::ClockTick));
        self.scheduler.once(self.config.timing.welcome_delay_ms, TimerEvent::Welcome);
    }

    /// Delivers every timer due at or before `now`
    ///
    /// # Returns
    /// Number of timer events handled
    pub fn pump(&mut self, now: Millis) -> usize {
        let mut fired = 0;
        while let Some(event) = self.scheduler.pop_due(now) {
            self.fire(event);
            fired += 1;
        }
        fired
    }

    fn fire(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::HideNotification(generation) => {
                if self.notifications.expire(generation) {
                    self.surface.hide_notification();
                }
            }
            TimerEvent::MinimizeComplete(id) => {
                if self.windows.finish_minimize(&mut self.state, id) {
                    self.render_windows();
                }
            }
            TimerEvent::FocusCommandLine => {
                if !self.state.is_shutting_down() {
                    self.surface.focus_command_line();
                }
            }
            TimerEvent::Welcome => self.notify(WELCOME_MESSAGE),
            TimerEvent::ClockTick => {
                if !self.state.is_shutting_down() {
                    self.render_clock();
                }
            }
            TimerEvent::RunHelp => {
                if !self.state.is_shutting_down() {
                    self.submit("help");
                }
            }
            TimerEvent::OpenFromIcon(id) => {
                self.open_window(id);
            }
            TimerEvent::BeginShutdown => {
                self.trigger_shutdown();
            }
            TimerEvent::ShutdownTick => self.shutdown_tick(),
            TimerEvent::FadeOut => {
                self.surface.fade_shutdown_screen();
                self.scheduler.once(self.config.timing.power_off_ms, TimerEvent::PowerOff);
            }
            TimerEvent::PowerOff => {
                if self.shutdown.power_off() {
                    self.surface.show_power_off_screen();
                }
            }
        }
    }

    /// Shows a notification and schedules its hide
    fn notify(&mut self, text: impl Into<String>) {
        let Some(notification) = self.notifications.show(&self.state, text) else {
            return;
        };
        let generation = notification.generation;
        self.surface.show_notification(notification);
        self.scheduler.once(
            self.config.timing.notification_ms,
            TimerEvent::HideNotification(generation),
        );
    }

    fn render_windows(&mut self) {
        for window in self.windows.windows() {
            self.surface.update_window(window, self.state.focused == Some(window.id));
        }
    }

    fn render_clock(&mut self) {
        let face = ClockFace::new(self.clock.now(), self.uptime());
        self.surface.set_clock(&face);
    }

    fn render_line(&mut self) {
        self.surface.set_input_line(self.line.text(), self.line.caret());
    }

    /// Opens a window, announces it, and arms the command line for the terminal
    pub fn open_window(&mut self, id: WindowId) -> bool {
        if !self.windows.open(&mut self.state, id) {
            return false;
        }
        self.render_windows();
        self.notify(format!("Terminal opened: {id}"));
        if id == WindowId::Terminal {
            self.scheduler.once(self.config.timing.focus_delay_ms, TimerEvent::FocusCommandLine);
        }
        true
    }

    /// Opens a window by its registry name. Unknown names do nothing.
    pub fn open_window_named(&mut self, name: &str) -> bool {
        match self.windows.resolve(name) {
            Some(id) => self.open_window(id),
            None => false,
        }
    }

    pub fn close_window(&mut self, id: WindowId) -> bool {
        let closed = self.windows.close(&mut self.state, id);
        if closed {
            self.render_windows();
        }
        closed
    }

    /// Starts the minimize animation; the window closes when it finishes
    pub fn minimize_window(&mut self, id: WindowId) -> bool {
        if !self.windows.minimize(&mut self.state, id) {
            return false;
        }
        self.render_windows();
        self.scheduler.once(self.config.timing.minimize_ms, TimerEvent::MinimizeComplete(id));
        self.notify(format!("Terminal minimized: {id}"));
        true
    }

    pub fn toggle_maximize(&mut self, id: WindowId) -> Option<MaximizeToggle> {
        let toggle = self.windows.toggle_maximize(&mut self.state, id)?;
        self.render_windows();
        match toggle {
            MaximizeToggle::Maximized => self.notify(format!("Terminal maximized: {id}")),
            MaximizeToggle::Restored => self.notify(format!("Terminal restored: {id}")),
        }
        Some(toggle)
    }

    /// Empties the prompt line, e.g. after an ambiguous completion left text on it
    pub fn clear_command_line(&mut self) {
        if self.state.is_shutting_down() {
            return;
        }
        self.line.clear();
        self.render_line();
    }

    /// Switches the active tab of the projects or hacking window
    pub fn switch_tab(&mut self, id: WindowId, tab: &str) -> bool {
        if !self.windows.switch_tab(&mut self.state, id, tab) {
            return false;
        }
        if let Some(window) = self.windows.get(id)
            && let (Some(active), Some(content_id)) = (window.active_tab(), window.tab_content_id())
        {
            self.surface.show_tab(id, active, &content_id);
        }
        true
    }

    /// Handles a key press on the terminal prompt
    pub fn handle_key(&mut self, key: Key) {
        if self.state.is_shutting_down() {
            return;
        }
        match self.line.handle(key) {
            LineAction::Edited => {}
            LineAction::Submit(text) => self.submit(&text),
        }
        self.render_line();
    }

    /// Interprets one line as if it had been typed and submitted
    pub fn submit(&mut self, raw: &str) {
        if self.state.is_shutting_down() {
            debug!(raw, "command ignored during shutdown");
            return;
        }
        let ctx = CommandContext {
            profile: &self.config.profile,
            now: self.clock.now(),
            uptime: self.uptime(),
        };
        let result = self.interpreter.interpret(raw, &ctx);
        if let Some(record) = &result.record {
            self.surface.append_output(record);
        }
        for effect in result.effects {
            self.apply_effect(effect);
        }
    }

    fn apply_effect(&mut self, effect: Effect) {
        match effect {
            Effect::OpenWindow(id) => {
                self.open_window(id);
            }
            Effect::ClearScreen => self.surface.clear_output(),
            Effect::ScheduleShutdown => {
                if self.shutdown_requested {
                    return;
                }
                self.shutdown_requested = true;
                self.scheduler.once(self.config.timing.shutdown_delay_ms, TimerEvent::BeginShutdown);
            }
        }
    }

    /// Feeds a mouse event through the gesture tracker
    ///
    /// # Returns
    /// Whether the host should suppress default handling
    pub fn handle_mouse(&mut self, event: &MouseEvent) -> bool {
        let input = self.mouse.normalize(event);
        self.handle_input(input)
    }

    /// Feeds a touch event through the touch adapter and gesture tracker
    ///
    /// # Returns
    /// Whether the host should suppress default handling
    pub fn handle_touch(&mut self, event: &TouchEvent) -> bool {
        let output = self.touch.normalize(event);
        let suppress = output.event.is_some_and(|input| self.handle_input(input));
        output.suppress_default || suppress
    }

    /// Applies one normalized pointer event
    pub fn handle_input(&mut self, input: InputEvent) -> bool {
        let output = self.tracker.handle(&mut self.state, &self.windows, input);
        for gesture in &output.gestures {
            self.apply_gesture(*gesture);
        }
        output.suppress_default
    }

    fn apply_gesture(&mut self, gesture: Gesture) {
        match gesture {
            Gesture::Start { target, .. } => {
                if self.windows.focus(&mut self.state, target) {
                    self.render_windows();
                }
            }
            Gesture::Move { target, dx, dy, .. } => {
                if self.windows.apply_drag(&mut self.state, target, dx, dy).is_some()
                    && let Some(window) = self.windows.get(target)
                {
                    self.surface.update_window(window, self.state.focused == Some(target));
                }
            }
            Gesture::End { .. } | Gesture::Cancel { .. } => {}
            Gesture::Activate { target, control } => match control {
                WindowControl::Close => {
                    self.close_window(target);
                }
                WindowControl::Minimize => {
                    self.minimize_window(target);
                }
                WindowControl::Maximize => {
                    self.toggle_maximize(target);
                }
            },
        }
    }

    /// Desktop icon clicked with a mouse: opens immediately
    pub fn click_icon(&mut self, name: &str) -> bool {
        self.open_window_named(name)
    }

    /// Desktop icon touched: opens after the touch feedback delay
    pub fn touch_icon(&mut self, name: &str) -> bool {
        if self.state.is_shutting_down() {
            return false;
        }
        let Some(id) = self.windows.resolve(name) else {
            return false;
        };
        self.scheduler.once(self.config.timing.icon_touch_delay_ms, TimerEvent::OpenFromIcon(id));
        true
    }

    pub fn toggle_start_menu(&mut self) -> bool {
        if self.state.is_shutting_down() {
            return false;
        }
        let open = self.menu.toggle();
        self.surface.set_start_menu(open);
        true
    }

    pub fn close_start_menu(&mut self) -> bool {
        let closed = self.menu.close();
        if closed {
            self.surface.set_start_menu(false);
        }
        closed
    }

    /// A click or touch landed somewhere on the page
    ///
    /// # Arguments
    /// * `inside_menu` - The target is the start menu or its button
    pub fn handle_page_click(&mut self, inside_menu: bool) {
        if !inside_menu {
            self.close_start_menu();
        }
    }

    /// Flips the notification sound. Returns the new setting, or None during shutdown.
    pub fn toggle_sound(&mut self) -> Option<bool> {
        if self.state.is_shutting_down() {
            return None;
        }
        let on = self.notifications.toggle_sound();
        self.notify(if on { "Sound: ON" } else { "Sound: OFF" });
        Some(on)
    }

    pub fn toggle_theme(&mut self) -> Option<Theme> {
        if self.state.is_shutting_down() {
            return None;
        }
        self.theme = self.theme.toggled();
        self.surface.set_theme(self.theme);
        self.notify(self.theme.announcement());
        Some(self.theme)
    }

    /// Opens the terminal and runs `help` shortly after
    pub fn show_help(&mut self) -> bool {
        if self.state.is_shutting_down() {
            return false;
        }
        self.open_window(WindowId::Terminal);
        self.scheduler.once(self.config.timing.help_delay_ms, TimerEvent::RunHelp);
        true
    }

    /// Starts the shutdown sequence. Later calls have no effect.
    pub fn trigger_shutdown(&mut self) -> bool {
        if !self.state.begin_shutdown() {
            debug!("shutdown already in progress");
            return false;
        }
        self.shutdown.start();
        self.shutdown_requested = true;

        if let Some(timer) = self.clock_timer.take() {
            self.scheduler.cancel(timer);
        }
        self.surface.set_shutdown_control_animating();
        self.dismiss_notification();
        self.windows.close_all(&mut self.state);
        self.render_windows();
        self.close_start_menu();
        self.surface.set_desktop_visible(false);
        self.surface.shutdown_progress(self.shutdown.state(), None);

        self.shutdown_timer = Some(self.scheduler.every(self.config.timing.shutdown_tick_ms, TimerEvent::ShutdownTick));
        true
    }

    fn shutdown_tick(&mut self) {
        let outcome = self.shutdown.tick();
        self.surface.shutdown_progress(self.shutdown.state(), outcome.message());
        if !outcome.completed {
            return;
        }

        if let Some(timer) = self.shutdown_timer.take() {
            self.scheduler.cancel(timer);
        }
        self.windows.close_all(&mut self.state);
        self.dismiss_notification();
        self.scheduler.once(self.config.timing.fade_ms, TimerEvent::FadeOut);
    }

    fn dismiss_notification(&mut self) {
        if self.notifications.dismiss() {
            self.surface.hide_notification();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::core::Point;
    use crate::domain::shutdown::{MESSAGES, ShutdownStage};
    use crate::domain::window::WindowState;
    use crate::input::MouseKind;
    use crate::platform::{FixedClock, TimerQueue};
    use crate::ui::{RecordingSurface, SurfaceCall};
    use chrono::{FixedOffset, TimeZone};

    type TestController = DesktopController<TimerQueue<TimerEvent>, FixedClock, RecordingSurface>;

    fn controller() -> TestController {
        let clock = FixedClock(
            FixedOffset::east_opt(0)
                .unwrap()
                .with_ymd_and_hms(2026, 10, 18, 12, 0, 0)
                .unwrap(),
        );
        DesktopController::new(DesktopConfig::default(), TimerQueue::new(), clock, RecordingSurface::new())
    }

    fn booted() -> TestController {
        let mut desktop = controller();
        desktop.boot();
        desktop
    }

    fn state_of(desktop: &TestController, id: WindowId) -> WindowState {
        desktop.windows().get(id).unwrap().state
    }

    #[test]
    fn boot_opens_terminal_then_welcomes() {
        let mut desktop = booted();
        assert_eq!(desktop.state().focused, Some(WindowId::Terminal));
        assert_eq!(desktop.surface().notifications(), vec!["Terminal opened: terminal"]);

        desktop.pump(100);
        assert!(desktop.surface().calls.contains(&SurfaceCall::FocusCommandLine));

        desktop.pump(1_000);
        assert_eq!(desktop.notifications().current().unwrap().text, WELCOME_MESSAGE);
    }

    #[test]
    fn notification_hides_after_timeout() {
        let mut desktop = controller();
        desktop.open_window(WindowId::About);
        desktop.pump(2_999);
        assert!(desktop.notifications().current().is_some());
        desktop.pump(3_000);
        assert!(desktop.notifications().current().is_none());
    }

    #[test]
    fn older_hide_timer_leaves_newer_notification() {
        let mut desktop = controller();
        desktop.open_window(WindowId::About);
        desktop.pump(2_000);
        desktop.toggle_sound();
        desktop.pump(3_500);
        assert_eq!(desktop.notifications().current().unwrap().text, "Sound: OFF");
    }

    #[test]
    fn typed_command_opens_window() {
        let mut desktop = booted();
        for ch in "skills".chars() {
            desktop.handle_key(Key::Char(ch));
        }
        desktop.handle_key(Key::Enter);
        assert_eq!(state_of(&desktop, WindowId::Skills), WindowState::Open);
        assert_eq!(desktop.state().focused, Some(WindowId::Skills));
        assert_eq!(desktop.surface().outputs().len(), 1);
        assert_eq!(desktop.command_line().text(), "");
    }

    #[test]
    fn minimize_closes_after_animation() {
        let mut desktop = booted();
        assert!(desktop.minimize_window(WindowId::Terminal));
        desktop.pump(299);
        assert_eq!(state_of(&desktop, WindowId::Terminal), WindowState::Minimized);
        desktop.pump(300);
        assert_eq!(state_of(&desktop, WindowId::Terminal), WindowState::Closed);
        assert_eq!(desktop.state().focused, None);
    }

    #[test]
    fn tap_on_maximize_control_toggles() {
        let mut desktop = booted();
        let geometry = desktop.windows().get(WindowId::Terminal).unwrap().geometry;
        // Controls run close, maximize, minimize from the right edge.
        let at = Point::new(geometry.right() - 44 - 10, geometry.y + 10);
        desktop.handle_mouse(&MouseEvent { kind: MouseKind::Down, at, time: 0 });
        desktop.handle_mouse(&MouseEvent { kind: MouseKind::Up, at, time: 120 });
        assert_eq!(state_of(&desktop, WindowId::Terminal), WindowState::Maximized);
        assert_eq!(
            desktop.notifications().current().unwrap().text,
            "Terminal maximized: terminal"
        );
    }

    #[test]
    fn header_drag_moves_and_focuses_window() {
        let mut desktop = booted();
        desktop.open_window(WindowId::About);
        desktop.close_window(WindowId::About);
        let before = desktop.windows().get(WindowId::Terminal).unwrap().geometry;
        let grab = Point::new(before.x + 20, before.y + 10);

        desktop.handle_mouse(&MouseEvent { kind: MouseKind::Down, at: grab, time: 0 });
        assert_eq!(desktop.state().focused, Some(WindowId::Terminal));
        let suppress = desktop.handle_mouse(&MouseEvent {
            kind: MouseKind::Move,
            at: Point::new(grab.x + 30, grab.y + 15),
            time: 40,
        });
        assert!(suppress);
        let after = desktop.windows().get(WindowId::Terminal).unwrap().geometry;
        assert_eq!((after.x, after.y), (before.x + 30, before.y + 15));
    }

    #[test]
    fn touched_icon_opens_after_delay() {
        let mut desktop = controller();
        assert!(desktop.touch_icon("projects"));
        desktop.pump(299);
        assert_eq!(state_of(&desktop, WindowId::Projects), WindowState::Closed);
        desktop.pump(300);
        assert_eq!(state_of(&desktop, WindowId::Projects), WindowState::Open);
        assert!(!desktop.touch_icon("kernel"));
    }

    #[test]
    fn cleared_line_completes_fresh() {
        let mut desktop = booted();
        desktop.handle_key(Key::Char('s'));
        desktop.handle_key(Key::Tab);
        assert_eq!(desktop.command_line().text(), "s");

        desktop.clear_command_line();
        desktop.handle_key(Key::Char('a'));
        desktop.handle_key(Key::Char('b'));
        desktop.handle_key(Key::Tab);
        assert_eq!(desktop.command_line().text(), "about");
    }

    #[test]
    fn tab_switch_reaches_surface() {
        let mut desktop = booted();
        assert!(!desktop.switch_tab(WindowId::Hacking, "ctf"));

        assert!(desktop.click_icon("hacking"));
        desktop.surface_mut().take();
        assert!(desktop.switch_tab(WindowId::Hacking, "CTF"));
        assert_eq!(
            desktop.surface_mut().take(),
            vec![SurfaceCall::Tab {
                window: WindowId::Hacking,
                tab: "ctf".into(),
                content_id: "ctf-hacking".into(),
            }]
        );

        assert!(!desktop.switch_tab(WindowId::About, "bio"));
        desktop.trigger_shutdown();
        desktop.surface_mut().take();
        assert!(!desktop.switch_tab(WindowId::Hacking, "tools"));
        assert!(desktop.surface().calls.is_empty());
    }

    #[test]
    fn show_help_runs_help_in_terminal() {
        let mut desktop = controller();
        desktop.show_help();
        assert_eq!(state_of(&desktop, WindowId::Terminal), WindowState::Open);
        desktop.pump(100);
        let outputs = desktop.surface().outputs();
        assert_eq!(outputs.len(), 1);
        assert!(outputs[0].echo.ends_with("# help"));
    }

    #[test]
    fn outside_click_closes_start_menu() {
        let mut desktop = controller();
        desktop.toggle_start_menu();
        desktop.handle_page_click(true);
        assert!(desktop.start_menu().is_open());
        desktop.handle_page_click(false);
        assert!(!desktop.start_menu().is_open());
    }

    #[test]
    fn shutdown_command_runs_full_sequence() {
        let mut desktop = booted();
        desktop.open_window(WindowId::Contact);
        desktop.toggle_start_menu();
        desktop.submit("shutdown");

        desktop.pump(999);
        assert!(!desktop.state().is_shutting_down());
        desktop.pump(1_000);
        assert!(desktop.state().is_shutting_down());
        assert!(!desktop.start_menu().is_open());
        assert!(desktop.windows().windows().iter().all(|w| w.state == WindowState::Closed));
        assert!(desktop.surface().calls.contains(&SurfaceCall::DesktopVisible(false)));

        // 100 ticks of 30 ms reach 100%.
        desktop.pump(1_000 + 100 * 30);
        assert_eq!(desktop.shutdown_state().progress_percent, 100);
        assert_eq!(desktop.shutdown_state().stage, ShutdownStage::FadingOut);
        let messages: Vec<String> = desktop
            .surface()
            .calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::ShutdownProgress { message: Some(m), .. } => Some(m.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(messages, MESSAGES.to_vec());

        desktop.pump(4_000 + 500);
        assert!(desktop.surface().calls.contains(&SurfaceCall::FadeShutdown));
        desktop.pump(4_000 + 1_500);
        assert_eq!(desktop.shutdown_state().stage, ShutdownStage::Terminal);
        assert_eq!(desktop.surface().calls.last(), Some(&SurfaceCall::PowerOff));
    }

    #[test]
    fn everything_is_inert_while_shutting_down() {
        let mut desktop = booted();
        assert!(desktop.trigger_shutdown());
        assert!(!desktop.trigger_shutdown());
        let calls = desktop.surface().calls.len();

        assert!(!desktop.open_window(WindowId::About));
        assert!(!desktop.toggle_start_menu());
        assert!(desktop.toggle_sound().is_none());
        assert!(desktop.toggle_theme().is_none());
        assert!(!desktop.show_help());
        desktop.submit("help");
        desktop.handle_key(Key::Char('x'));
        assert_eq!(desktop.surface().calls.len(), calls);
        assert!(desktop.interpreter().log().is_empty());
    }

    #[test]
    fn clear_effect_reaches_surface() {
        let mut desktop = booted();
        desktop.submit("pwd");
        desktop.submit("clear");
        assert!(desktop.interpreter().log().is_empty());
        assert!(desktop.surface().calls.contains(&SurfaceCall::ClearOutput));
    }

    #[test]
    fn uptime_follows_scheduler_time() {
        let mut desktop = booted();
        desktop.pump(61_000);
        assert_eq!(desktop.uptime(), Duration::from_secs(61));
        let last_clock = desktop.surface().calls.iter().rev().find_map(|call| match call {
            SurfaceCall::Clock(face) => Some(face.clone()),
            _ => None,
        });
        assert_eq!(last_clock.unwrap().uptime, "0d 0h 1m");
    }
}
