use super::{KeyBindings, Keypad, Screen};
use crate::lang::ast::{Shade, Surface};
use crate::mach::{Device, Draw};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::time::Duration;

/// ## Recording device
///
/// Nothing here touches the terminal. Output, debug records, pauses and
/// DispGraph frames are kept for inspection. Random numbers come from a
/// seeded generator, so a run is repeatable.

#[derive(Debug, Clone)]
pub struct Headless {
    screen: Screen,
    keypad: Keypad,
    trace: Option<VecDeque<bool>>,
    rng: StdRng,
    output: Vec<String>,
    records: Vec<String>,
    pauses: Vec<Duration>,
    frames: Vec<String>,
}

impl Default for Headless {
    fn default() -> Self {
        Headless::new()
    }
}

impl Headless {
    pub fn new() -> Headless {
        Headless::with_seed(0)
    }

    pub fn with_seed(seed: u64) -> Headless {
        Headless {
            screen: Screen::new(),
            keypad: Keypad::new(KeyBindings::standard()),
            trace: None,
            rng: StdRng::seed_from_u64(seed),
            output: vec![],
            records: vec![],
            pauses: vec![],
            frames: vec![],
        }
    }

    pub fn with_bindings(mut self, bindings: KeyBindings) -> Headless {
        self.keypad = Keypad::new(bindings);
        self
    }

    /// Answers successive key queries from `trace` instead of the keypad.
    /// Once the trace runs out every key reads as released.
    pub fn with_keys<I: IntoIterator<Item = bool>>(mut self, trace: I) -> Headless {
        self.trace = Some(trace.into_iter().collect());
        self
    }

    pub fn keypad_mut(&mut self) -> &mut Keypad {
        &mut self.keypad
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn records(&self) -> &[String] {
        &self.records
    }

    pub fn pauses(&self) -> &[Duration] {
        &self.pauses
    }

    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }

    pub fn take_records(&mut self) -> Vec<String> {
        std::mem::take(&mut self.records)
    }
}

impl Device for Headless {
    fn display(&mut self, text: &str) {
        self.output.push(text.to_string());
    }

    fn draw(&mut self, surface: Surface, draw: Draw) {
        self.screen.apply(surface, draw);
    }

    fn pixel(&mut self, surface: Surface, x: i64, y: i64) -> bool {
        self.screen.get(surface, x, y)
    }

    fn show(&mut self, shade: Shade) {
        self.frames.push(self.screen.render(shade));
    }

    fn key_pressed(&mut self, code: u8) -> bool {
        match &mut self.trace {
            Some(trace) => trace.pop_front().unwrap_or(false),
            None => self.keypad.is_pressed(code),
        }
    }

    fn random(&mut self) -> u16 {
        self.rng.gen()
    }

    fn pause(&mut self, duration: Duration) {
        self.pauses.push(duration);
    }

    fn log(&mut self, record: &str) {
        self.records.push(record.to_string());
    }
}
