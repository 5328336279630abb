extern crate mortal;

use super::Attach;
use ansi_term::Style;
use axe::dev::{KeyBindings, Keypad, Screen};
use axe::lang::ast::{Shade, Surface};
use axe::mach::{Device, Draw};
use mortal::{Event, Key, PrepareConfig, PrepareState, Signal, Terminal};
use rand::rngs::ThreadRng;
use rand::Rng;
use std::collections::HashMap;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Terminals report presses but never releases. A key counts as held
/// until this long after its last press or autorepeat.
const KEY_HOLD: Duration = Duration::from_millis(250);

/// Longest sleep between key polls while paused.
const PAUSE_SLICE: Duration = Duration::from_millis(20);

/// The interactive device. Output goes to stdout and keys are polled
/// from the terminal while a program runs.
pub struct Console {
    screen: Screen,
    keypad: Keypad,
    terminal: Option<(Terminal, PrepareState)>,
    held: HashMap<String, Instant>,
    interrupted: Arc<AtomicBool>,
    rng: ThreadRng,
}

impl Console {
    pub fn new(bindings: KeyBindings, interrupted: Arc<AtomicBool>) -> Console {
        Console {
            screen: Screen::new(),
            keypad: Keypad::new(bindings),
            terminal: None,
            held: HashMap::new(),
            interrupted,
            rng: rand::thread_rng(),
        }
    }

    fn eol(&self) -> &'static str {
        if self.terminal.is_some() {
            "\r\n"
        } else {
            "\n"
        }
    }

    fn write(&self, text: &str) {
        let text = text.replace('\n', self.eol());
        let stdout = std::io::stdout();
        let mut stdout = stdout.lock();
        let _ = stdout.write_all(text.as_bytes());
        let _ = stdout.flush();
    }

    fn poll(&mut self) {
        let now = Instant::now();
        if let Some((terminal, _)) = &self.terminal {
            while let Ok(Some(event)) = terminal.read_event(Some(Duration::from_millis(0))) {
                match event {
                    Event::Key(Key::Ctrl('c')) | Event::Signal(Signal::Interrupt) => {
                        self.interrupted.store(true, Ordering::SeqCst);
                    }
                    Event::Key(key) => {
                        if let Some(name) = key_name(key) {
                            self.held.insert(name, now);
                        }
                    }
                    _ => {}
                }
            }
        }
        self.held
            .retain(|_, pressed| now.duration_since(*pressed) < KEY_HOLD);
        self.keypad.release_all();
        for name in self.held.keys() {
            self.keypad.press(name);
        }
    }
}

impl Attach for Console {
    fn attach(&mut self) {
        if self.terminal.is_some() {
            return;
        }
        if let Ok(terminal) = Terminal::new() {
            if let Ok(state) = terminal.prepare(PrepareConfig::default()) {
                self.terminal = Some((terminal, state));
            }
        }
    }

    fn detach(&mut self) {
        if let Some((terminal, state)) = self.terminal.take() {
            let _ = terminal.restore(state);
        }
        self.held.clear();
        self.keypad.release_all();
    }
}

impl Drop for Console {
    fn drop(&mut self) {
        self.detach();
    }
}

impl Device for Console {
    fn display(&mut self, text: &str) {
        self.write(&format!("{}\n", text));
    }

    fn draw(&mut self, surface: Surface, draw: Draw) {
        self.screen.apply(surface, draw);
    }

    fn pixel(&mut self, surface: Surface, x: i64, y: i64) -> bool {
        self.screen.get(surface, x, y)
    }

    fn show(&mut self, shade: Shade) {
        self.write(&self.screen.render(shade));
    }

    fn key_pressed(&mut self, code: u8) -> bool {
        self.poll();
        self.keypad.is_pressed(code)
    }

    fn random(&mut self) -> u16 {
        self.rng.gen()
    }

    fn pause(&mut self, duration: Duration) {
        let end = Instant::now() + duration;
        loop {
            self.poll();
            let now = Instant::now();
            if now >= end || self.interrupted.load(Ordering::SeqCst) {
                break;
            }
            std::thread::sleep(PAUSE_SLICE.min(end - now));
        }
    }

    fn log(&mut self, record: &str) {
        let eol = self.eol();
        eprint!("{}{}", Style::new().dimmed().paint(record), eol);
    }
}

fn key_name(key: Key) -> Option<String> {
    let name = match key {
        Key::Backspace => "K_BACKSPACE",
        Key::Enter => "K_RETURN",
        Key::Escape => "K_ESCAPE",
        Key::Tab => "K_TAB",
        Key::Up => "K_UP",
        Key::Down => "K_DOWN",
        Key::Left => "K_LEFT",
        Key::Right => "K_RIGHT",
        Key::Delete => "K_DELETE",
        Key::Insert => "K_INSERT",
        Key::Home => "K_HOME",
        Key::End => "K_END",
        Key::PageUp => "K_PAGEUP",
        Key::PageDown => "K_PAGEDOWN",
        Key::F(n) => return Some(format!("K_F{}", n)),
        Key::Char(c) if c.is_ascii_alphanumeric() => {
            return Some(format!("K_{}", c.to_ascii_lowercase()))
        }
        Key::Char(' ') => "K_SPACE",
        Key::Char('.') => "K_PERIOD",
        Key::Char(',') => "K_COMMA",
        Key::Char('+') => "K_PLUS",
        Key::Char('-') => "K_MINUS",
        Key::Char('*') => "K_ASTERISK",
        Key::Char('/') => "K_SLASH",
        Key::Char('^') => "K_CARET",
        Key::Char('(') => "K_LEFTPAREN",
        Key::Char(')') => "K_RIGHTPAREN",
        _ => return None,
    };
    Some(name.to_string())
}

