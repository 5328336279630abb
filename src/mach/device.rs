use crate::error;
use crate::lang::ast::{Graphic, Shade, Surface};
use crate::lang::Error;
use std::time::Duration;

type Result<T> = std::result::Result<T, Error>;

/// ## Host capabilities
///
/// The runtime owns no screen, keyboard or clock. Everything outside the
/// address space is reached through this trait, which the host implements
/// and lends to the runtime for each call to `execute`.
///
/// Queries must return promptly. `key_pressed` reports the state of the
/// keys at the moment it is called and never waits for a key.

pub trait Device {
    /// Show a line of text.
    fn display(&mut self, text: &str);
    /// Render a drawing command into one of the two buffers.
    fn draw(&mut self, surface: Surface, draw: Draw);
    /// Read back a pixel. Off screen pixels are off.
    fn pixel(&mut self, surface: Surface, x: i64, y: i64) -> bool;
    /// Copy the buffers to the visible screen.
    fn show(&mut self, shade: Shade);
    /// Is a key bound to this code held right now? Code 0 asks for any key.
    fn key_pressed(&mut self, code: u8) -> bool;
    fn random(&mut self) -> u16;
    fn pause(&mut self, duration: Duration);
    /// Diagnostic records produced while `@DEBUG` is on.
    fn log(&mut self, record: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Draw {
    PxlOn { x: i64, y: i64 },
    PxlOff { x: i64, y: i64 },
    PxlChange { x: i64, y: i64 },
    Line { x1: i64, y1: i64, x2: i64, y2: i64 },
    Rect { x: i64, y: i64, width: i64, height: i64 },
    RectI { x: i64, y: i64, width: i64, height: i64 },
    Circle { x: i64, y: i64, radius: i64 },
    Clear,
    Shift { dx: i64, dy: i64 },
}

impl Draw {
    /// Builds a command from arguments in source order.
    pub fn new(graphic: Graphic, args: &[i64]) -> Result<Draw> {
        if args.len() != graphic.arity() {
            return Err(error!(InternalError; "DRAW ARGUMENTS"));
        }
        Ok(match graphic {
            Graphic::PxlOn => Draw::PxlOn { x: args[0], y: args[1] },
            Graphic::PxlOff => Draw::PxlOff { x: args[0], y: args[1] },
            Graphic::PxlChange => Draw::PxlChange { x: args[0], y: args[1] },
            Graphic::Line => Draw::Line {
                x1: args[0],
                y1: args[1],
                x2: args[2],
                y2: args[3],
            },
            Graphic::Rect => Draw::Rect {
                x: args[0],
                y: args[1],
                width: args[2],
                height: args[3],
            },
            Graphic::RectI => Draw::RectI {
                x: args[0],
                y: args[1],
                width: args[2],
                height: args[3],
            },
            Graphic::Circle => Draw::Circle {
                x: args[0],
                y: args[1],
                radius: args[2],
            },
            Graphic::ClrDraw => Draw::Clear,
            Graphic::ShiftLeft => Draw::Shift { dx: -1, dy: 0 },
            Graphic::ShiftRight => Draw::Shift { dx: 1, dy: 0 },
            Graphic::ShiftUp => Draw::Shift { dx: 0, dy: -1 },
            Graphic::ShiftDown => Draw::Shift { dx: 0, dy: 1 },
        })
    }
}
