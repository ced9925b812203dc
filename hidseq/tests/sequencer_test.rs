pub mod common;

use embassy_futures::block_on;
use embassy_time::Duration;
use hidseq::{Action, KeyCode, Macro, Sequencer, SequencerError, SequencerState, run};

use crate::common::{Call, Failure, INJECTED, RecordingDelay, RecordingKeyboard, new_trace, tap, typed, wait_ms};

const CHORD_THEN_EXIT: Macro = Macro::new(
    "chord_then_exit",
    &[&[
        Action::PressKey(KeyCode::LEFT_CTRL),
        Action::PressKey(KeyCode::LEFT_ALT),
        Action::press_char('t'),
        Action::ReleaseAll,
        Action::wait_ms(1000),
        Action::TypeText("exit"),
    ]],
);

#[test]
fn test_chord_then_exit() {
    let trace = new_trace();
    let mut sequencer = Sequencer::new(RecordingKeyboard::new(trace.clone()), RecordingDelay::new(trace.clone()));

    block_on(sequencer.run(&CHORD_THEN_EXIT)).unwrap();

    let mut expected = vec![
        Call::Init,
        Call::Press(KeyCode::LEFT_CTRL),
        Call::Press(KeyCode::LEFT_ALT),
        Call::Press(KeyCode::Char('t')),
        Call::ReleaseAll,
        wait_ms(1000),
    ];
    expected.extend(typed("exit"));
    expected.push(Call::Shutdown);

    assert_eq!(*trace.borrow(), expected);
    assert_eq!(sequencer.state(), SequencerState::Completed);
    assert!(sequencer.held_keys().is_empty());
}

#[test]
fn test_type_text_fails_on_third_press() {
    const EXIT: Macro = Macro::new("exit", &[&[Action::TypeText("exit"), Action::wait_ms(50)]]);

    let trace = new_trace();
    let keyboard = RecordingKeyboard::failing(trace.clone(), Failure::Press(3));
    let mut sequencer = Sequencer::new(keyboard, RecordingDelay::new(trace.clone()));

    let result = block_on(sequencer.run(&EXIT));
    assert_eq!(result, Err(SequencerError::DeviceIo(INJECTED)));

    let mut expected = vec![Call::Init];
    expected.extend(tap(KeyCode::Char('e')));
    expected.extend(tap(KeyCode::Char('x')));
    // The failed press leaves 'i' in the key state, it is released by the safety net
    expected.extend([Call::Press(KeyCode::Char('i')), Call::ReleaseAll, Call::Shutdown]);

    assert_eq!(*trace.borrow(), expected);
    assert_eq!(sequencer.state(), SequencerState::Aborted);
    assert!(sequencer.held_keys().is_empty());
}

#[test]
fn test_type_text_taps_every_char() {
    const LS: Macro = Macro::new("ls", &[&[Action::TypeText("ls -la ~/"), Action::TypeText("")]]);

    let trace = new_trace();
    block_on(run(&LS, RecordingKeyboard::new(trace.clone()), RecordingDelay::new(trace.clone()))).unwrap();

    let mut expected = vec![Call::Init];
    expected.extend(typed("ls -la ~/"));
    expected.extend(tap(KeyCode::RETURN));
    expected.push(Call::Shutdown);
    assert_eq!(*trace.borrow(), expected);

    let presses = trace.borrow().iter().filter(|c| matches!(c, Call::Press(_))).count();
    assert_eq!(presses, "ls -la ~/".len() + 2);
}

#[test]
fn test_repeated_chars_are_typed() {
    const BOOK: Macro = Macro::new("book", &[&[Action::TypeText("book")]]);

    let trace = new_trace();
    block_on(run(&BOOK, RecordingKeyboard::new(trace.clone()), RecordingDelay::new(trace.clone()))).unwrap();

    let o_presses = trace
        .borrow()
        .iter()
        .filter(|c| **c == Call::Press(KeyCode::Char('o')))
        .count();
    assert_eq!(o_presses, 2);
}

#[test]
fn test_forgotten_release_is_released() {
    const FORGETFUL: Macro = Macro::new(
        "forgetful",
        &[&[Action::PressKey(KeyCode::LEFT_CTRL), Action::press_char('c'), Action::wait_ms(10)]],
    );

    let trace = new_trace();
    let mut sequencer = Sequencer::new(RecordingKeyboard::new(trace.clone()), RecordingDelay::new(trace.clone()));
    block_on(sequencer.run(&FORGETFUL)).unwrap();

    assert_eq!(
        *trace.borrow(),
        vec![
            Call::Init,
            Call::Press(KeyCode::LEFT_CTRL),
            Call::Press(KeyCode::Char('c')),
            wait_ms(10),
            Call::ReleaseAll,
            Call::Shutdown,
        ]
    );
    assert_eq!(sequencer.state(), SequencerState::Completed);
    assert!(sequencer.held_keys().is_empty());
}

#[test]
fn test_no_release_when_nothing_held() {
    const WAIT: Macro = Macro::new("wait", &[&[Action::wait_ms(0), Action::wait_ms(5)]]);

    let trace = new_trace();
    block_on(run(&WAIT, RecordingKeyboard::new(trace.clone()), RecordingDelay::new(trace.clone()))).unwrap();

    assert_eq!(*trace.borrow(), vec![Call::Init, wait_ms(0), wait_ms(5), Call::Shutdown]);
}

#[test]
fn test_held_key_is_pressed_again() {
    const TWICE: Macro = Macro::new(
        "twice",
        &[&[
            Action::PressKey(KeyCode::LEFT_SHIFT),
            Action::PressKey(KeyCode::LEFT_SHIFT),
            Action::ReleaseAll,
        ]],
    );

    let trace = new_trace();
    let mut sequencer = Sequencer::new(RecordingKeyboard::new(trace.clone()), RecordingDelay::new(trace.clone()));
    block_on(sequencer.run(&TWICE)).unwrap();

    assert_eq!(
        *trace.borrow(),
        vec![
            Call::Init,
            Call::Press(KeyCode::LEFT_SHIFT),
            Call::Press(KeyCode::LEFT_SHIFT),
            Call::ReleaseAll,
            Call::Shutdown,
        ]
    );
    assert!(sequencer.held_keys().is_empty());
}

#[test]
fn test_type_text_while_key_held() {
    const HELD_T: Macro = Macro::new(
        "held_t",
        &[&[Action::press_char('t'), Action::TypeText("t"), Action::ReleaseAll]],
    );

    let trace = new_trace();
    block_on(run(&HELD_T, RecordingKeyboard::new(trace.clone()), RecordingDelay::new(trace.clone()))).unwrap();

    let mut expected = vec![Call::Init, Call::Press(KeyCode::Char('t'))];
    expected.extend(typed("t"));
    expected.extend([Call::ReleaseAll, Call::Shutdown]);
    assert_eq!(*trace.borrow(), expected);

    let t_presses = trace
        .borrow()
        .iter()
        .filter(|c| **c == Call::Press(KeyCode::Char('t')))
        .count();
    assert_eq!(t_presses, 2);
}

#[test]
fn test_wait_keeps_sub_millisecond_part() {
    const SHORT: Macro = Macro::new("short", &[&[Action::Wait(Duration::from_micros(1500))]]);

    let trace = new_trace();
    block_on(run(&SHORT, RecordingKeyboard::new(trace.clone()), RecordingDelay::new(trace.clone()))).unwrap();

    assert_eq!(
        *trace.borrow(),
        vec![Call::Init, Call::Wait(Duration::from_micros(1500)), Call::Shutdown]
    );
}

#[test]
fn test_init_failure_runs_nothing() {
    let trace = new_trace();
    let keyboard = RecordingKeyboard::failing(trace.clone(), Failure::Init);
    let mut sequencer = Sequencer::new(keyboard, RecordingDelay::new(trace.clone()));

    let result = block_on(sequencer.run(&CHORD_THEN_EXIT));
    assert_eq!(result, Err(SequencerError::DeviceInit(INJECTED)));
    assert_eq!(*trace.borrow(), vec![Call::Init]);
    assert_eq!(sequencer.state(), SequencerState::Aborted);
}

#[test]
fn test_failed_release_all_is_retried_once() {
    const CHORD: Macro = Macro::new(
        "chord",
        &[&[Action::PressKey(KeyCode::LEFT_GUI), Action::ReleaseAll, Action::wait_ms(100)]],
    );

    let trace = new_trace();
    let keyboard = RecordingKeyboard::failing(trace.clone(), Failure::ReleaseAll(1));
    let mut sequencer = Sequencer::new(keyboard, RecordingDelay::new(trace.clone()));

    let result = block_on(sequencer.run(&CHORD));
    assert_eq!(result, Err(SequencerError::DeviceIo(INJECTED)));
    // The wait is never reached
    assert_eq!(
        *trace.borrow(),
        vec![
            Call::Init,
            Call::Press(KeyCode::LEFT_GUI),
            Call::ReleaseAll,
            Call::ReleaseAll,
            Call::Shutdown,
        ]
    );
    assert!(sequencer.held_keys().is_empty());
}

#[test]
fn test_failed_safety_net_still_clears_keys() {
    const HOLD: Macro = Macro::new("hold", &[&[Action::PressKey(KeyCode::LEFT_ALT)]]);

    let trace = new_trace();
    let keyboard = RecordingKeyboard::failing(trace.clone(), Failure::ReleaseAll(1));
    let mut sequencer = Sequencer::new(keyboard, RecordingDelay::new(trace.clone()));

    let result = block_on(sequencer.run(&HOLD));
    assert_eq!(result, Err(SequencerError::DeviceIo(INJECTED)));
    assert_eq!(
        *trace.borrow(),
        vec![Call::Init, Call::Press(KeyCode::LEFT_ALT), Call::ReleaseAll, Call::Shutdown]
    );
    assert_eq!(sequencer.state(), SequencerState::Aborted);
    assert!(sequencer.held_keys().is_empty());
}

#[test]
fn test_shutdown_failure_is_reported() {
    let trace = new_trace();
    let keyboard = RecordingKeyboard::failing(trace.clone(), Failure::Shutdown);
    let mut sequencer = Sequencer::new(keyboard, RecordingDelay::new(trace.clone()));

    let result = block_on(sequencer.run(&CHORD_THEN_EXIT));
    assert_eq!(result, Err(SequencerError::DeviceIo(INJECTED)));
    assert_eq!(trace.borrow().last(), Some(&Call::Shutdown));
    assert_eq!(sequencer.state(), SequencerState::Aborted);
}

#[test]
fn test_abort_stops_at_failing_action() {
    // Call #3 is the press of 'b'
    const ABC: Macro = Macro::new(
        "abc",
        &[&[
            Action::press_char('a'),
            Action::press_char('b'),
            Action::press_char('c'),
            Action::ReleaseAll,
        ]],
    );

    let trace = new_trace();
    let keyboard = RecordingKeyboard::failing(trace.clone(), Failure::Call(3));
    let result = block_on(run(&ABC, keyboard, RecordingDelay::new(trace.clone())));

    assert_eq!(result, Err(SequencerError::DeviceIo(INJECTED)));
    assert_eq!(
        *trace.borrow(),
        vec![
            Call::Init,
            Call::Press(KeyCode::Char('a')),
            Call::Press(KeyCode::Char('b')),
            Call::ReleaseAll,
            Call::Shutdown,
        ]
    );
    let release_alls = trace.borrow().iter().filter(|c| **c == Call::ReleaseAll).count();
    assert_eq!(release_alls, 1);
}

#[test]
fn test_key_state_overflow() {
    const CHARS: [char; 17] = [
        'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q',
    ];
    let actions: Vec<Action> = CHARS.iter().map(|c| Action::press_char(*c)).collect();
    let steps: [&[Action]; 1] = [&actions];
    let overflow = Macro::new("overflow", &steps);

    let trace = new_trace();
    let mut sequencer = Sequencer::new(RecordingKeyboard::new(trace.clone()), RecordingDelay::new(trace.clone()));

    let result = block_on(sequencer.run(&overflow));
    assert_eq!(result, Err(SequencerError::KeyStateOverflow));

    let presses = trace.borrow().iter().filter(|c| matches!(c, Call::Press(_))).count();
    assert_eq!(presses, hidseq::key_state::MAX_HELD_KEYS);
    assert!(!trace.borrow().contains(&Call::Press(KeyCode::Char('q'))));
    assert_eq!(&trace.borrow()[trace.borrow().len() - 2..], &[Call::ReleaseAll, Call::Shutdown]);
    assert!(sequencer.held_keys().is_empty());
}

#[test]
fn test_sequencer_runs_once() {
    let trace = new_trace();
    let mut sequencer = Sequencer::new(RecordingKeyboard::new(trace.clone()), RecordingDelay::new(trace.clone()));

    block_on(sequencer.run(&CHORD_THEN_EXIT)).unwrap();
    let calls = trace.borrow().len();

    assert_eq!(block_on(sequencer.run(&CHORD_THEN_EXIT)), Err(SequencerError::AlreadyFinished));
    assert_eq!(trace.borrow().len(), calls);
    assert_eq!(sequencer.state(), SequencerState::Completed);
}

#[test]
fn test_run_borrows_device() {
    const ENTER: Macro = Macro::new("enter", &[&[Action::PressKey(KeyCode::RETURN), Action::ReleaseAll]]);

    let trace = new_trace();
    let mut keyboard = RecordingKeyboard::new(trace.clone());

    block_on(run(&ENTER, &mut keyboard, RecordingDelay::new(trace.clone()))).unwrap();
    block_on(run(&ENTER, &mut keyboard, RecordingDelay::new(trace.clone()))).unwrap();

    let inits = trace.borrow().iter().filter(|c| **c == Call::Init).count();
    assert_eq!(inits, 2);
}

#[test]
fn test_into_inner() {
    let trace = new_trace();
    let sequencer = Sequencer::new(RecordingKeyboard::new(trace.clone()), RecordingDelay::new(trace.clone()));
    assert_eq!(sequencer.state(), SequencerState::Idle);

    let (_keyboard, _delay) = sequencer.into_inner();
    assert!(trace.borrow().is_empty());
}
