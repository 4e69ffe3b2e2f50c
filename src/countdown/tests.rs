//! Tests for the countdown widget: key routing, ticks, completion and view.

#[cfg(test)]
mod countdown_tests {
    use crate::clock::ManualClock;
    use crate::config::{Config, DEFAULT_TICK_INTERVAL};
    use crate::countdown::{CompletionMsg, Model, State, TickMsg};
    use crate::duration::MICROS_PER_SECOND;
    use crate::entry::Entry;
    use crate::Component;
    use bubbletea_rs::{KeyMsg, Msg, WindowSizeMsg};
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::sync::Arc;
    use std::time::Duration;

    const START: u64 = 5 * MICROS_PER_SECOND;

    fn key(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn type_digits(model: &mut Model, digits: &str) {
        for c in digits.chars() {
            assert!(model.update(key(KeyCode::Char(c))).is_none());
        }
    }

    fn manual(config: Config) -> (Model, ManualClock) {
        let clock = ManualClock::new(START);
        let model = Model::with_clock(config, Arc::new(clock.clone()));
        (model, clock)
    }

    fn tick_for(model: &Model) -> Msg {
        Box::new(TickMsg {
            id: model.id(),
            tag: model.tag,
        })
    }

    fn plain(s: &str) -> String {
        strip_ansi_escapes::strip_str(s)
    }

    #[test]
    fn test_new_defaults() {
        let (model, _) = manual(Config::default());
        assert_eq!(model.state(), State::Input);
        assert_eq!(model.frame_text(), "__:__:__");
        assert!(model.focused());
        assert!(model.remaining().is_none());
        assert!(!model.key_map.cancel.enabled());
    }

    #[test]
    fn test_unique_ids() {
        let (a, _) = manual(Config::default());
        let (b, _) = manual(Config::default());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_typing_updates_frame() {
        let (mut model, _) = manual(Config::default());
        type_digits(&mut model, "0130");
        assert_eq!(model.frame_text(), "01:30:__");

        model.update(key(KeyCode::Backspace));
        assert_eq!(model.frame_text(), "01:3_:__");
        assert_eq!(model.entry().position(), 3);
    }

    #[test]
    fn test_other_keys_ignored() {
        let (mut model, _) = manual(Config::default());
        for code in [KeyCode::Char('a'), KeyCode::Left, KeyCode::Tab, KeyCode::Esc] {
            assert!(model.update(key(code)).is_none());
        }
        assert_eq!(model.frame_text(), "__:__:__");
    }

    #[test]
    fn test_blurred_ignores_keys() {
        let (mut model, _) = manual(Config::default());
        model.blur();
        type_digits(&mut model, "12");
        assert_eq!(model.frame_text(), "__:__:__");

        assert!(model.focus().is_none());
        type_digits(&mut model, "12");
        assert_eq!(model.frame_text(), "12:__:__");
    }

    #[test]
    fn test_enter_starts_countdown() {
        let (mut model, _) = manual(Config::default());
        type_digits(&mut model, "000005");

        let cmd = model.update(key(KeyCode::Enter));
        assert!(cmd.is_some());
        assert_eq!(model.state(), State::Timing);
        assert_eq!(model.frame_text(), "00:00:05");
        assert_eq!(model.remaining(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_tick_advances_display() {
        let (mut model, clock) = manual(Config::default());
        type_digits(&mut model, "000005");
        model.update(key(KeyCode::Enter));

        clock.advance(Duration::from_secs(3));
        let cmd = model.update(tick_for(&model));
        assert!(cmd.is_some());
        assert_eq!(model.frame_text(), "00:00:02");
        assert_eq!(model.state(), State::Timing);
    }

    #[test]
    fn test_stale_ticks_dropped() {
        let (mut model, clock) = manual(Config::default());
        type_digits(&mut model, "000005");
        model.update(key(KeyCode::Enter));
        clock.advance(Duration::from_secs(1));

        let wrong_id = Box::new(TickMsg {
            id: model.id() + 999,
            tag: model.tag,
        });
        assert!(model.update(wrong_id).is_none());

        let wrong_tag = Box::new(TickMsg {
            id: model.id(),
            tag: model.tag + 1,
        });
        assert!(model.update(wrong_tag).is_none());

        // Neither stale tick refreshed the display.
        assert_eq!(model.frame_text(), "00:00:05");
    }

    #[test]
    fn test_ticks_ignored_outside_timing() {
        let (mut model, _) = manual(Config::default());
        assert!(model.update(tick_for(&model)).is_none());
        assert_eq!(model.state(), State::Input);
    }

    #[test]
    fn test_completion_then_acknowledge() {
        let (mut model, clock) = manual(Config::default());
        type_digits(&mut model, "000005");
        model.update(key(KeyCode::Enter));

        clock.advance(Duration::from_secs(6));
        let cmd = model.update(tick_for(&model));
        assert!(cmd.is_some());
        assert_eq!(model.state(), State::Done);
        assert_eq!(model.frame_text(), "__:__:__");

        // Another tick in flight does not complete twice.
        assert!(model.update(tick_for(&model)).is_none());

        model.update(Box::new(CompletionMsg { id: model.id() }));
        assert_eq!(model.frame_text(), "Time's up!");

        // Only enter acts once finished.
        type_digits(&mut model, "1");
        assert_eq!(model.state(), State::Done);

        assert!(model.update(key(KeyCode::Enter)).is_none());
        assert_eq!(model.state(), State::Input);
        assert_eq!(model.frame_text(), "__:__:__");
        assert_eq!(model.entry(), &Entry::new());
    }

    #[tokio::test]
    async fn test_completion_command_sends_message() {
        let (mut model, clock) = manual(Config::default());
        type_digits(&mut model, "000001");
        model.update(key(KeyCode::Enter));
        clock.advance(Duration::from_secs(1));

        let cmd = model.update(tick_for(&model)).expect("completion command");
        let msg = cmd.await.expect("completion message");
        let done = msg
            .downcast_ref::<CompletionMsg>()
            .expect("message is a CompletionMsg");
        assert_eq!(done.id, model.id());
    }

    #[tokio::test]
    async fn test_tick_command_carries_tag() {
        let config = Config::default().with_tick_interval(Duration::from_millis(1));
        let (mut model, _) = manual(config);
        type_digits(&mut model, "000009");

        let cmd = model.update(key(KeyCode::Enter)).expect("tick command");
        let msg = cmd.await.expect("tick message");
        let tick = msg.downcast_ref::<TickMsg>().expect("message is a TickMsg");
        assert_eq!(tick.id, model.id());
        assert_eq!(tick.tag, model.tag);
    }

    #[test]
    fn test_empty_entry_completes_on_enter() {
        let (mut model, _) = manual(Config::default());
        let cmd = model.update(key(KeyCode::Enter));
        assert!(cmd.is_some());
        assert_eq!(model.state(), State::Done);
    }

    #[test]
    fn test_keys_ignored_while_timing() {
        let (mut model, _) = manual(Config::default());
        type_digits(&mut model, "000030");
        model.update(key(KeyCode::Enter));

        for code in [KeyCode::Char('1'), KeyCode::Backspace, KeyCode::Enter, KeyCode::Esc] {
            assert!(model.update(key(code)).is_none());
        }
        assert_eq!(model.state(), State::Timing);
    }

    #[test]
    fn test_cancel_when_allowed() {
        let (mut model, clock) = manual(Config::default().with_allow_cancel(true));
        type_digits(&mut model, "000030");
        model.update(key(KeyCode::Enter));
        let first_tag = model.tag;

        clock.advance(Duration::from_secs(2));
        assert!(model.update(key(KeyCode::Esc)).is_none());
        assert_eq!(model.state(), State::Input);
        assert_eq!(model.frame_text(), "00:00:30");

        // Restarting orphans ticks from the cancelled run.
        model.update(key(KeyCode::Enter));
        assert_ne!(model.tag, first_tag);
        let old = Box::new(TickMsg {
            id: model.id(),
            tag: first_tag,
        });
        assert!(model.update(old).is_none());
    }

    #[test]
    fn test_start_from_prefill() {
        let (model, _) = manual(Config::default());
        let mut model = model.with_entry(Entry::parse("00:01:00").unwrap());
        assert_eq!(model.frame_text(), "00:01:00");

        assert!(model.start().is_some());
        assert_eq!(model.state(), State::Timing);
        assert!(model.start().is_none());
    }

    #[test]
    fn test_prefill_ignored_once_timing() {
        let (model, clock) = manual(Config::default());
        let mut model = model.with_entry(Entry::parse("00:00:02").unwrap());
        assert!(model.start().is_some());
        clock.advance(Duration::from_secs(3));

        let mut model = model.with_entry(Entry::parse("00:00:09").unwrap());
        assert_eq!(model.state(), State::Timing);
        assert_eq!(model.entry().to_string(), "00:00:02");
        assert_eq!(model.frame_text(), "00:00:02");

        // The overdue countdown still completes, once, on its next tick.
        assert!(model.update(tick_for(&model)).is_some());
        assert_eq!(model.state(), State::Done);
        assert!(model.update(tick_for(&model)).is_none());

        model.update(Box::new(CompletionMsg { id: model.id() }));
        assert_eq!(model.frame_text(), "Time's up!");
    }

    #[test]
    fn test_next_interval_lands_on_second_boundary() {
        let config = Config::default().with_tick_interval(Duration::from_secs(1));
        let (mut model, clock) = manual(config);
        type_digits(&mut model, "000005");
        model.update(key(KeyCode::Enter));

        clock.advance(Duration::from_millis(2_500));
        assert_eq!(model.next_interval(), Duration::from_millis(500));

        clock.advance(Duration::from_millis(500));
        assert_eq!(model.next_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_next_interval_uses_configured_rate() {
        let (mut model, _) = manual(Config::default());
        type_digits(&mut model, "000005");
        model.update(key(KeyCode::Enter));
        assert_eq!(model.next_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_out_of_range_interval_falls_back_to_default() {
        for interval in [Duration::ZERO, Duration::from_secs(5)] {
            let (mut model, _) = manual(Config::default().with_tick_interval(interval));
            assert_eq!(model.config().tick_interval, DEFAULT_TICK_INTERVAL);

            type_digits(&mut model, "000005");
            model.update(key(KeyCode::Enter));
            assert_eq!(model.next_interval(), DEFAULT_TICK_INTERVAL);
        }
    }

    #[test]
    fn test_view_input() {
        let (mut model, _) = manual(Config::default());
        type_digits(&mut model, "12");
        assert_eq!(
            plain(&model.view()),
            "12:__:__\n\n0-9 type • backspace delete • enter start"
        );
        assert_eq!(plain(&model.display_view()), "12:__:__");
    }

    #[test]
    fn test_view_timing_without_cancel_has_no_help() {
        let (mut model, _) = manual(Config::default());
        type_digits(&mut model, "000010");
        model.update(key(KeyCode::Enter));
        assert_eq!(plain(&model.view()), "00:00:10");
    }

    #[test]
    fn test_view_timing_with_cancel() {
        let (mut model, _) = manual(Config::default().with_allow_cancel(true));
        type_digits(&mut model, "000010");
        model.update(key(KeyCode::Enter));
        assert_eq!(plain(&model.view()), "00:00:10\n\nesc cancel");
    }

    #[test]
    fn test_view_done() {
        let (mut model, clock) = manual(Config::default().with_done_text("Ding!"));
        model.update(key(KeyCode::Enter));
        clock.advance(Duration::from_micros(1));
        model.update(Box::new(CompletionMsg { id: model.id() }));
        assert_eq!(plain(&model.view()), "Ding!\n\nenter reset");
    }

    #[test]
    fn test_view_centers_in_window() {
        let (mut model, _) = manual(Config::default());
        model.update(Box::new(WindowSizeMsg {
            width: 20,
            height: 10,
        }));

        let view = plain(&model.view());
        let lines: Vec<&str> = view.lines().collect();
        // 55% of 10 rows, minus one, leaves four blank rows above the display.
        assert_eq!(lines.len(), 7);
        assert!(lines[..4].iter().all(|l| l.is_empty()));
        assert_eq!(lines[4], "      __:__:__");
    }

    #[test]
    fn test_view_tiny_window_does_not_overflow() {
        let (mut model, _) = manual(Config::default());
        model.update(Box::new(WindowSizeMsg {
            width: 4,
            height: 2,
        }));
        let view = plain(&model.view());
        assert!(view.lines().next().unwrap_or_default().starts_with("__:__:__"));
    }
}
