use crate::error;
use crate::lang::Error;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

type Result<T> = std::result::Result<T, Error>;

/// ## Key bindings
///
/// Maps host key names to calculator key codes. The file format is one
/// `NAME : code` row per line with `#` comments. A code of 0 leaves the
/// key unassigned.

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyBindings {
    codes: BTreeMap<String, u8>,
}

impl KeyBindings {
    /// The table shipped in `keybindings.config`.
    pub fn standard() -> KeyBindings {
        KeyBindings::parse(include_str!("../../keybindings.config")).unwrap_or_default()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<KeyBindings> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => KeyBindings::parse(&text),
            Err(error) => {
                let msg = format!("{}: {}", path.display(), error);
                match error.kind() {
                    std::io::ErrorKind::NotFound => Err(error!(FileNotFound; &msg)),
                    _ => Err(error!(InternalError; &msg)),
                }
            }
        }
    }

    pub fn parse(text: &str) -> Result<KeyBindings> {
        let mut codes = BTreeMap::new();
        for (index, line) in text.lines().enumerate() {
            let line = match line.find('#') {
                Some(pos) => &line[..pos],
                None => line,
            };
            if line.trim().is_empty() {
                continue;
            }
            let malformed = || error!(SyntaxError; "EXPECTED NAME : CODE").in_line_number(index + 1);
            let mut parts = line.splitn(2, ':');
            let name = parts.next().map(str::trim).unwrap_or("");
            let code = match parts.next() {
                Some(code) => code.trim(),
                None => return Err(malformed()),
            };
            if name.is_empty() || name.contains(char::is_whitespace) {
                return Err(malformed());
            }
            let code = match code.parse::<u8>() {
                Ok(code) => code,
                Err(_) => return Err(malformed()),
            };
            codes.insert(name.to_string(), code);
        }
        Ok(KeyBindings { codes })
    }

    pub fn code(&self, name: &str) -> Option<u8> {
        self.codes.get(name).copied()
    }

    /// Every key name bound to `code`, in name order.
    pub fn names(&self, code: u8) -> Vec<&str> {
        self.codes
            .iter()
            .filter(|(_, c)| **c == code)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// Key bindings plus the set of host keys currently held.
#[derive(Debug, Clone, Default)]
pub struct Keypad {
    bindings: KeyBindings,
    held: HashSet<String>,
}

impl Keypad {
    pub fn new(bindings: KeyBindings) -> Keypad {
        Keypad {
            bindings,
            held: HashSet::new(),
        }
    }

    pub fn press(&mut self, name: &str) {
        self.held.insert(name.to_string());
    }

    pub fn release(&mut self, name: &str) {
        self.held.remove(name);
    }

    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Code 0 is true while any assigned key is held.
    pub fn is_pressed(&self, code: u8) -> bool {
        self.held
            .iter()
            .filter_map(|name| self.bindings.code(name))
            .any(|c| c != 0 && (code == 0 || c == code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_comments_and_blanks() {
        let keys = KeyBindings::parse(
            "# arrows\n\
             K_DOWN : 1\n\
             \n\
             K_UP:4   # trailing\n\
             K_CAPSLOCK : 0\n",
        )
        .unwrap();
        assert_eq!(keys.len(), 3);
        assert_eq!(keys.code("K_UP"), Some(4));
        assert_eq!(keys.code("K_LEFT"), None);
        assert_eq!(keys.names(1), vec!["K_DOWN"]);
    }

    #[test]
    fn test_malformed_row_names_line() {
        let e = KeyBindings::parse("K_DOWN : 1\nK_UP 4\n").unwrap_err();
        assert_eq!(e.line_number(), Some(2));
        let e = KeyBindings::parse("K_DOWN : 300\n").unwrap_err();
        assert_eq!(e.to_string(), "SYNTAX ERROR IN 1; EXPECTED NAME : CODE");
    }

    #[test]
    fn test_standard_table() {
        let keys = KeyBindings::standard();
        assert!(!keys.is_empty());
        assert_eq!(keys.code("K_BACKSPACE"), Some(15));
        assert_eq!(keys.code("K_RETURN"), Some(9));
    }

    #[test]
    fn test_keypad() {
        let keys = KeyBindings::parse("K_BACKSPACE:15\nK_DELETE:15\nK_CAPSLOCK:0").unwrap();
        let mut pad = Keypad::new(keys);
        assert!(!pad.is_pressed(0));
        pad.press("K_CAPSLOCK");
        assert!(!pad.is_pressed(0));
        pad.press("K_DELETE");
        assert!(pad.is_pressed(15));
        assert!(pad.is_pressed(0));
        assert!(!pad.is_pressed(9));
        pad.release_all();
        assert!(!pad.is_pressed(15));
    }
}
