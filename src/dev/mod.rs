/*!
## Rust Device Module

Host side implementations of the machine's device interface: the LCD
model, key bindings, and a recording device for tests and batch runs.

*/

mod headless;
mod keys;
mod screen;

pub use headless::Headless;
pub use keys::KeyBindings;
pub use keys::Keypad;
pub use screen::Screen;
pub use screen::{HEIGHT, WIDTH};
