use crate::lang::ast::{Shade, Surface};
use crate::mach::Draw;

pub const WIDTH: usize = 96;
pub const HEIGHT: usize = 64;

/// ## Monochrome LCD
///
/// Two 96x64 buffers. Drawing clips at the edges. Coordinates are taken
/// as signed 16 bit values, so `-1` and `65535` name the same column.

#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    main: Vec<bool>,
    back: Vec<bool>,
}

impl Default for Screen {
    fn default() -> Self {
        Screen::new()
    }
}

fn coord(val: i64) -> i64 {
    val as u16 as i16 as i64
}

fn index(x: i64, y: i64) -> Option<usize> {
    if x >= 0 && y >= 0 && (x as usize) < WIDTH && (y as usize) < HEIGHT {
        Some(y as usize * WIDTH + x as usize)
    } else {
        None
    }
}

impl Screen {
    pub fn new() -> Screen {
        Screen {
            main: vec![false; WIDTH * HEIGHT],
            back: vec![false; WIDTH * HEIGHT],
        }
    }

    fn buffer(&self, surface: Surface) -> &[bool] {
        match surface {
            Surface::Main => &self.main,
            Surface::Back => &self.back,
        }
    }

    fn buffer_mut(&mut self, surface: Surface) -> &mut Vec<bool> {
        match surface {
            Surface::Main => &mut self.main,
            Surface::Back => &mut self.back,
        }
    }

    pub fn get(&self, surface: Surface, x: i64, y: i64) -> bool {
        match index(coord(x), coord(y)) {
            Some(i) => self.buffer(surface)[i],
            None => false,
        }
    }

    pub fn set(&mut self, surface: Surface, x: i64, y: i64, on: bool) {
        if let Some(i) = index(x, y) {
            self.buffer_mut(surface)[i] = on;
        }
    }

    fn flip(&mut self, surface: Surface, x: i64, y: i64) {
        if let Some(i) = index(x, y) {
            let buffer = self.buffer_mut(surface);
            buffer[i] = !buffer[i];
        }
    }

    pub fn clear(&mut self, surface: Surface) {
        for pixel in self.buffer_mut(surface).iter_mut() {
            *pixel = false;
        }
    }

    /// Number of lit pixels.
    pub fn count(&self, surface: Surface) -> usize {
        self.buffer(surface).iter().filter(|p| **p).count()
    }

    pub fn apply(&mut self, surface: Surface, draw: Draw) {
        match draw {
            Draw::PxlOn { x, y } => self.set(surface, coord(x), coord(y), true),
            Draw::PxlOff { x, y } => self.set(surface, coord(x), coord(y), false),
            Draw::PxlChange { x, y } => self.flip(surface, coord(x), coord(y)),
            Draw::Line { x1, y1, x2, y2 } => {
                self.line(surface, coord(x1), coord(y1), coord(x2), coord(y2))
            }
            Draw::Rect {
                x,
                y,
                width,
                height,
            } => self.rect(surface, coord(x), coord(y), coord(width), coord(height), false),
            Draw::RectI {
                x,
                y,
                width,
                height,
            } => self.rect(surface, coord(x), coord(y), coord(width), coord(height), true),
            Draw::Circle { x, y, radius } => self.circle(surface, coord(x), coord(y), coord(radius)),
            Draw::Clear => self.clear(surface),
            Draw::Shift { dx, dy } => self.shift(surface, dx, dy),
        }
    }

    /// Bresenham.
    fn line(&mut self, surface: Surface, mut x0: i64, mut y0: i64, x1: i64, y1: i64) {
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx - dy;
        loop {
            self.set(surface, x0, y0, true);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x0 += sx;
            }
            if e2 < dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn rect(&mut self, surface: Surface, x: i64, y: i64, width: i64, height: i64, invert: bool) {
        let left = x.max(0);
        let top = y.max(0);
        let right = (x + width).min(WIDTH as i64);
        let bottom = (y + height).min(HEIGHT as i64);
        for py in top..bottom {
            for px in left..right {
                if invert {
                    self.flip(surface, px, py);
                } else {
                    self.set(surface, px, py, true);
                }
            }
        }
    }

    /// Midpoint circle. A radius of zero draws nothing.
    fn circle(&mut self, surface: Surface, cx: i64, cy: i64, radius: i64) {
        if radius <= 0 {
            return;
        }
        let mut x = 0;
        let mut y = radius;
        let mut err = 3 - 2 * radius;
        while y >= x {
            for (px, py) in &[
                (cx - x, cy - y),
                (cx - y, cy - x),
                (cx + y, cy - x),
                (cx + x, cy - y),
                (cx - x, cy + y),
                (cx - y, cy + x),
                (cx + y, cy + x),
                (cx + x, cy + y),
            ] {
                self.set(surface, *px, *py, true);
            }
            if err < 0 {
                err += 4 * x + 6;
            } else {
                err += 4 * (x - y) + 10;
                y -= 1;
            }
            x += 1;
        }
    }

    /// Moves the whole buffer. Pixels shifted in from the edge are off.
    fn shift(&mut self, surface: Surface, dx: i64, dy: i64) {
        let old = self.buffer(surface).to_vec();
        let buffer = self.buffer_mut(surface);
        for y in 0..HEIGHT as i64 {
            for x in 0..WIDTH as i64 {
                if let Some(i) = index(x, y) {
                    buffer[i] = match index(x - dx, y - dy) {
                        Some(from) => old[from],
                        None => false,
                    };
                }
            }
        }
    }

    /// Text picture of the screen, one character per pixel.
    pub fn render(&self, shade: Shade) -> String {
        let mut s = String::with_capacity((WIDTH + 1) * HEIGHT * 3);
        for row in 0..HEIGHT {
            for col in 0..WIDTH {
                let i = row * WIDTH + col;
                s.push(match (shade, self.main[i], self.back[i]) {
                    (Shade::Mono, true, _) => '█',
                    (Shade::Mono, false, _) => ' ',
                    (_, true, true) => '█',
                    (_, false, false) => ' ',
                    (Shade::Gray3, _, _) => '▒',
                    (Shade::Gray4, true, false) => '▓',
                    (Shade::Gray4, false, true) => '░',
                });
            }
            s.push('\n');
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixels_clip() {
        let mut screen = Screen::new();
        screen.apply(Surface::Main, Draw::PxlOn { x: 95, y: 63 });
        screen.apply(Surface::Main, Draw::PxlOn { x: 96, y: 0 });
        screen.apply(Surface::Main, Draw::PxlOn { x: -1, y: 0 });
        assert_eq!(screen.count(Surface::Main), 1);
        assert!(screen.get(Surface::Main, 95, 63));
        assert!(!screen.get(Surface::Back, 95, 63));
    }

    #[test]
    fn test_negative_wraps_as_16_bit() {
        let mut screen = Screen::new();
        screen.apply(Surface::Main, Draw::PxlOn { x: 65535 + 11, y: 3 });
        assert!(screen.get(Surface::Main, 10, 3));
    }

    #[test]
    fn test_line_endpoints() {
        let mut screen = Screen::new();
        screen.apply(
            Surface::Main,
            Draw::Line {
                x1: 0,
                y1: 0,
                x2: 9,
                y2: 4,
            },
        );
        assert!(screen.get(Surface::Main, 0, 0));
        assert!(screen.get(Surface::Main, 9, 4));
        assert_eq!(screen.count(Surface::Main), 10);
    }

    #[test]
    fn test_rect_and_invert() {
        let mut screen = Screen::new();
        let rect = Draw::Rect {
            x: 90,
            y: 60,
            width: 10,
            height: 10,
        };
        screen.apply(Surface::Main, rect);
        assert_eq!(screen.count(Surface::Main), 24);
        screen.apply(
            Surface::Main,
            Draw::RectI {
                x: 90,
                y: 60,
                width: 3,
                height: 1,
            },
        );
        assert_eq!(screen.count(Surface::Main), 21);
    }

    #[test]
    fn test_circle_is_symmetric() {
        let mut screen = Screen::new();
        screen.apply(
            Surface::Back,
            Draw::Circle {
                x: 40,
                y: 30,
                radius: 5,
            },
        );
        assert!(screen.get(Surface::Back, 45, 30));
        assert!(screen.get(Surface::Back, 35, 30));
        assert!(screen.get(Surface::Back, 40, 25));
        assert!(screen.get(Surface::Back, 40, 35));
        assert!(!screen.get(Surface::Back, 40, 30));
    }

    #[test]
    fn test_shift_drops_edge() {
        let mut screen = Screen::new();
        screen.apply(Surface::Main, Draw::PxlOn { x: 0, y: 0 });
        screen.apply(Surface::Main, Draw::PxlOn { x: 95, y: 1 });
        screen.apply(Surface::Main, Draw::Shift { dx: 1, dy: 0 });
        assert!(screen.get(Surface::Main, 1, 0));
        assert_eq!(screen.count(Surface::Main), 1);
        screen.apply(Surface::Main, Draw::Shift { dx: 0, dy: -1 });
        assert_eq!(screen.count(Surface::Main), 0);
    }

    #[test]
    fn test_render_shades() {
        let mut screen = Screen::new();
        screen.set(Surface::Main, 0, 0, true);
        screen.set(Surface::Back, 1, 0, true);
        let mono = screen.render(Shade::Mono);
        assert!(mono.starts_with("█ "));
        let gray = screen.render(Shade::Gray4);
        assert!(gray.starts_with("▓░ "));
        assert_eq!(gray.lines().count(), HEIGHT);
    }
}
