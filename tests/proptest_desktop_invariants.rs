//! Property-based invariant tests for the desktop model.
//!
//! 1. Dragging keeps every window inside the allowed band for any delta sequence.
//! 2. Tap classification matches the duration and distance bounds exactly.
//! 3. Every shutdown step size reports each status message once, in order.
//! 4. Progress is monotonic and capped at 100.
//! 5. Letter case and surrounding whitespace never change a command's result.

use portfolio_desk::app::interpreter::{CommandContext, CommandInterpreter};
use portfolio_desk::app::window_manager::{BOTTOM_MARGIN, MIN_TOP, SIDE_MARGIN};
use portfolio_desk::app::{UiState, WindowManager};
use portfolio_desk::config::Profile;
use portfolio_desk::domain::command::Command;
use portfolio_desk::domain::core::{Point, Viewport};
use portfolio_desk::domain::gesture::{GestureSession, TapPolicy};
use portfolio_desk::domain::shutdown::{MESSAGES, ShutdownSequencer};
use portfolio_desk::domain::window::WindowId;
use proptest::prelude::*;

use chrono::{FixedOffset, TimeZone};
use std::time::Duration;

// ── Helpers ─────────────────────────────────────────────────────────────

fn delta() -> impl Strategy<Value = i32> {
    prop_oneof![
        4 => -3_000i32..=3_000,
        1 => any::<i32>(),
        1 => Just(i32::MIN),
        1 => Just(i32::MAX),
    ]
}

fn deltas(max_len: usize) -> impl Strategy<Value = Vec<(i32, i32)>> {
    proptest::collection::vec((delta(), delta()), 1..=max_len)
}

fn random_case(text: &str, mask: &[bool]) -> String {
    text.chars()
        .zip(mask.iter().cycle())
        .map(|(ch, upper)| if *upper { ch.to_ascii_uppercase() } else { ch })
        .collect()
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Drag clamping
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn drag_stays_in_band(
        width in 320i32..=2_560,
        height in 240i32..=1_600,
        window_w in 100i32..=3_000,
        window_h in 100i32..=2_000,
        moves in deltas(40),
    ) {
        let viewport = Viewport::new(width, height);
        let mut state = UiState::new(viewport);
        let mut wm = WindowManager::new(viewport, window_w, window_h);
        wm.open(&mut state, WindowId::Projects);
        let start_width = wm.get(WindowId::Projects).unwrap().geometry.w;

        for (dx, dy) in moves {
            let rect = wm.apply_drag(&mut state, WindowId::Projects, dx, dy).unwrap();
            prop_assert!(rect.y >= MIN_TOP, "top {} above band", rect.y);
            prop_assert!(rect.x >= SIDE_MARGIN, "left {} past margin", rect.x);
            if height - BOTTOM_MARGIN >= MIN_TOP {
                prop_assert!(rect.y <= height - BOTTOM_MARGIN);
            }
            if width - rect.w - SIDE_MARGIN >= SIDE_MARGIN {
                prop_assert!(rect.x <= width - rect.w - SIDE_MARGIN);
            }
            prop_assert_eq!(rect.w, start_width);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Tap classification
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn tap_iff_short_and_still(
        start in 0u64..=1_000_000,
        duration in 0u64..=1_000,
        dx in -30i32..=30,
        dy in -30i32..=30,
    ) {
        let origin = Point::new(500, 500);
        let session = GestureSession::new(WindowId::Terminal, origin, start);
        let release = Point::new(origin.x + dx, origin.y + dy);
        let expected = duration < 300 && dx * dx + dy * dy < 100;
        prop_assert_eq!(
            session.was_tap(release, start + duration, &TapPolicy::default()),
            expected
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3-4. Shutdown progress
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn every_step_emits_all_messages(step in 1u8..=100) {
        let mut sequencer = ShutdownSequencer::new(step);
        sequencer.start();

        let mut messages: Vec<&str> = Vec::new();
        let mut last = 0;
        for _ in 0..=100 {
            let outcome = sequencer.tick();
            prop_assert!(outcome.progress_percent >= last);
            prop_assert!(outcome.progress_percent <= 100);
            last = outcome.progress_percent;
            messages.extend(outcome.messages);
            if outcome.completed {
                break;
            }
        }
        prop_assert_eq!(last, 100);
        prop_assert_eq!(messages, MESSAGES.to_vec());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Case-insensitive commands
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn case_and_padding_are_ignored(
        index in 0usize..Command::ALL.len(),
        mask in proptest::collection::vec(any::<bool>(), 1..8),
        left in 0usize..4,
        right in 0usize..4,
    ) {
        let profile = Profile::default();
        let ctx = CommandContext {
            profile: &profile,
            now: FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            uptime: Duration::from_secs(42),
        };
        let token = Command::ALL[index].token();
        let raw = format!("{}{}{}", " ".repeat(left), random_case(token, &mask), " ".repeat(right));

        let plain = CommandInterpreter::new().interpret(token, &ctx);
        let noisy = CommandInterpreter::new().interpret(&raw, &ctx);
        prop_assert_eq!(plain, noisy);
    }
}
