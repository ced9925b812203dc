use std::cell::RefCell;
use std::rc::Rc;

use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;
use hidseq::{HidError, KeyCode, KeyboardDevice};

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

/// One call seen by the mocks, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Init,
    Shutdown,
    Press(KeyCode),
    Release(KeyCode),
    ReleaseAll,
    Wait(Duration),
}

/// Call trace shared by a [`RecordingKeyboard`] and a [`RecordingDelay`]
pub type Trace = Rc<RefCell<Vec<Call>>>;

pub fn new_trace() -> Trace {
    Rc::new(RefCell::new(Vec::new()))
}

/// Where the keyboard fails. Counts are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Init,
    Shutdown,
    /// The n-th press
    Press(usize),
    /// The n-th release_all
    ReleaseAll(usize),
    /// The n-th device call of any kind
    Call(usize),
}

/// Error returned by injected failures
pub const INJECTED: HidError = HidError::Rollover;

pub struct RecordingKeyboard {
    trace: Trace,
    failure: Option<Failure>,
    calls: usize,
    presses: usize,
    release_alls: usize,
}

impl RecordingKeyboard {
    pub fn new(trace: Trace) -> Self {
        Self {
            trace,
            failure: None,
            calls: 0,
            presses: 0,
            release_alls: 0,
        }
    }

    pub fn failing(trace: Trace, failure: Failure) -> Self {
        Self {
            failure: Some(failure),
            ..Self::new(trace)
        }
    }

    /// Record the call, then decide whether it fails
    fn record(&mut self, call: Call) -> Result<(), HidError> {
        self.trace.borrow_mut().push(call);
        self.calls += 1;
        match call {
            Call::Press(_) => self.presses += 1,
            Call::ReleaseAll => self.release_alls += 1,
            _ => {}
        }
        let fail = match (self.failure, call) {
            (Some(Failure::Init), Call::Init) => true,
            (Some(Failure::Shutdown), Call::Shutdown) => true,
            (Some(Failure::Press(n)), Call::Press(_)) => self.presses == n,
            (Some(Failure::ReleaseAll(n)), Call::ReleaseAll) => self.release_alls == n,
            (Some(Failure::Call(n)), _) => self.calls == n,
            _ => false,
        };
        if fail { Err(INJECTED) } else { Ok(()) }
    }
}

impl KeyboardDevice for RecordingKeyboard {
    async fn init(&mut self) -> Result<(), HidError> {
        self.record(Call::Init)
    }

    async fn shutdown(&mut self) -> Result<(), HidError> {
        self.record(Call::Shutdown)
    }

    async fn press(&mut self, key: KeyCode) -> Result<(), HidError> {
        self.record(Call::Press(key))
    }

    async fn release(&mut self, key: KeyCode) -> Result<(), HidError> {
        self.record(Call::Release(key))
    }

    async fn release_all(&mut self) -> Result<(), HidError> {
        self.record(Call::ReleaseAll)
    }
}

/// Delay that returns immediately and records the requested milliseconds
pub struct RecordingDelay {
    trace: Trace,
}

impl RecordingDelay {
    pub fn new(trace: Trace) -> Self {
        Self { trace }
    }
}

impl DelayNs for RecordingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.trace.borrow_mut().push(Call::Wait(Duration::from_nanos(ns as u64)));
    }

    async fn delay_us(&mut self, us: u32) {
        self.trace.borrow_mut().push(Call::Wait(Duration::from_micros(us as u64)));
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.trace.borrow_mut().push(Call::Wait(Duration::from_millis(ms as u64)));
    }
}

/// A recorded wait of `ms` milliseconds
pub fn wait_ms(ms: u64) -> Call {
    Call::Wait(Duration::from_millis(ms))
}

/// Press and release of one key
pub fn tap(key: KeyCode) -> [Call; 2] {
    [Call::Press(key), Call::Release(key)]
}

/// The calls `TypeText(text)` is expected to produce
pub fn typed(text: &str) -> Vec<Call> {
    text.chars()
        .map(KeyCode::Char)
        .chain(core::iter::once(KeyCode::RETURN))
        .flat_map(tap)
        .collect()
}
