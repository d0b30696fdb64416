//! Shared test infrastructure for usbc-matrix-control integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use palette::Srgb;
use usbc_matrix_control::detector::VOLTS_PER_COUNT;
use usbc_matrix_control::{
    BrightnessPolicy, CcDetector, CcSense, Console, MatrixController, PixelSink, PowerPins,
    PowerSequencer, TouchSense,
};

// ============================================================================
// Ordered Event Log
// ============================================================================

/// One externally visible action. Pin writes, delays, frames and console
/// lines all land in the same log so tests can assert their interleaving.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    DataHold(bool),
    Stage1(bool),
    Stage2(bool),
    Indicators(bool, bool),
    DelayMs(u32),
    Fill {
        color: Srgb<u8>,
        brightness: u8,
        count: u16,
    },
    Line(String),
}

pub type EventLog = Rc<RefCell<Vec<Event>>>;

pub fn new_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// Snapshot of the log contents.
pub fn events(log: &EventLog) -> Vec<Event> {
    log.borrow().clone()
}

/// Number of log entries matching `wanted`.
pub fn count(log: &EventLog, wanted: &Event) -> usize {
    log.borrow().iter().filter(|event| *event == wanted).count()
}

/// Index of the first log entry matching `wanted`. Panics when absent.
pub fn position(log: &EventLog, wanted: &Event) -> usize {
    log.borrow()
        .iter()
        .position(|event| event == wanted)
        .unwrap_or_else(|| panic!("event {:?} not found in {:?}", wanted, log.borrow()))
}

// ============================================================================
// Scripted CC Sensor
// ============================================================================

/// CC-line mock fed a script of (cc1, cc2) count pairs, one pair per
/// detector sample. The last pair repeats once the script runs out.
pub struct ScriptedCc {
    readings: Vec<(u16, u16)>,
    cursor: usize,
}

impl ScriptedCc {
    pub fn new(readings: &[(u16, u16)]) -> Self {
        assert!(!readings.is_empty());
        Self {
            readings: readings.to_vec(),
            cursor: 0,
        }
    }

    fn current(&self) -> (u16, u16) {
        self.readings[self.cursor.min(self.readings.len() - 1)]
    }
}

impl CcSense for ScriptedCc {
    fn read_cc1(&mut self) -> u16 {
        self.current().0
    }

    // sample() reads cc1 then cc2, so the pair advances on the cc2 read.
    fn read_cc2(&mut self) -> u16 {
        let value = self.current().1;
        self.cursor += 1;
        value
    }
}

/// Counts that read back as (close to) `volts` on CC1, with CC2 grounded.
pub fn cc_pair(volts: f32) -> (u16, u16) {
    ((volts / VOLTS_PER_COUNT) as u16, 0)
}

// ============================================================================
// Scripted Touch Sensor
// ============================================================================

/// Touch mock with one raw-count script per channel. Each channel advances
/// independently and holds its last value once exhausted.
pub struct ScriptedTouch {
    scripts: [Vec<u16>; 3],
    cursors: [usize; 3],
}

impl ScriptedTouch {
    pub fn new(scripts: [Vec<u16>; 3]) -> Self {
        for script in &scripts {
            assert!(!script.is_empty());
        }
        Self {
            scripts,
            cursors: [0; 3],
        }
    }

    /// All three channels pinned to fixed levels.
    pub fn steady(levels: [u16; 3]) -> Self {
        Self::new(levels.map(|level| vec![level]))
    }
}

impl TouchSense for ScriptedTouch {
    fn read(&mut self, channel: u8) -> u16 {
        let channel = usize::from(channel);
        let script = &self.scripts[channel];
        let value = script[self.cursors[channel].min(script.len() - 1)];
        self.cursors[channel] += 1;
        value
    }
}

// ============================================================================
// Recording Hardware Mocks
// ============================================================================

pub struct LogPins(pub EventLog);

impl PowerPins for LogPins {
    fn set_data_hold(&mut self, hold: bool) {
        self.0.borrow_mut().push(Event::DataHold(hold));
    }

    fn set_stage1(&mut self, enabled: bool) {
        self.0.borrow_mut().push(Event::Stage1(enabled));
    }

    fn set_stage2(&mut self, enabled: bool) {
        self.0.borrow_mut().push(Event::Stage2(enabled));
    }

    fn set_indicators(&mut self, low: bool, high: bool) {
        self.0.borrow_mut().push(Event::Indicators(low, high));
    }
}

pub struct LogDelay(pub EventLog);

impl DelayNs for LogDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().push(Event::DelayMs(ns / 1_000_000));
    }

    // The library only ever waits in whole milliseconds; record those
    // directly instead of relying on the default ns decomposition.
    fn delay_ms(&mut self, ms: u32) {
        self.0.borrow_mut().push(Event::DelayMs(ms));
    }
}

pub struct LogSink(pub EventLog);

impl PixelSink for LogSink {
    fn fill(&mut self, color: Srgb<u8>, brightness: u8, count: u16) {
        self.0.borrow_mut().push(Event::Fill {
            color,
            brightness,
            count,
        });
    }
}

pub struct LogConsole(pub EventLog);

impl Console for LogConsole {
    fn line(&mut self, text: &str) {
        self.0.borrow_mut().push(Event::Line(text.to_string()));
    }
}

// ============================================================================
// Controller Assembly
// ============================================================================

pub type TestController =
    MatrixController<ScriptedCc, LogPins, ScriptedTouch, LogSink, LogConsole, LogDelay>;

/// Builds a controller over the given scripts with a default policy. The
/// construction-time safe-state pin writes are cleared from the log so
/// tests start from the first poll (construction itself is covered by the
/// power sequencing tests).
pub fn build_controller(cc: ScriptedCc, touch: ScriptedTouch, log: &EventLog) -> TestController {
    let detector = CcDetector::new(cc);
    let sequencer = PowerSequencer::new(LogPins(log.clone()));
    let controller = MatrixController::new(
        detector,
        sequencer,
        BrightnessPolicy::default(),
        touch,
        LogSink(log.clone()),
        LogConsole(log.clone()),
        LogDelay(log.clone()),
    );
    log.borrow_mut().clear();
    controller
}
