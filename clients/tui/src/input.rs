//! Incremental entry of the user's count guess.
//!
//! Keystrokes arrive one at a time from the front end's event queue. The
//! buffer admits digits and a minus sign up to [`INPUT_LIMIT`] characters and
//! resolves to an integer when the user confirms.

/// Two digits plus an optional sign.
pub const INPUT_LIMIT: usize = 3;

/// Result of confirming a buffer that holds no number (empty, a lone `-`,
/// and so on). No running count can reach this value, so the guess is always
/// judged incorrect.
pub const UNPARSABLE_GUESS: i32 = i32::MIN;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keystroke {
    Digit(u8),
    Minus,
    Backspace,
    Confirm,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    Accumulating,
    Confirmed(i32),
}

#[derive(Debug, Default)]
pub struct InputCapture {
    buffer: String,
}

impl InputCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new entry session.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    #[cfg(test)]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn feed(&mut self, key: Keystroke) -> Capture {
        match key {
            Keystroke::Digit(digit) if digit < 10 => self.push(char::from(b'0' + digit)),
            Keystroke::Minus => self.push('-'),
            Keystroke::Backspace => {
                self.buffer.pop();
            }
            Keystroke::Confirm => {
                return match parse_guess(&self.buffer) {
                    Some(value) => {
                        self.buffer.clear();
                        Capture::Confirmed(value)
                    }
                    None => Capture::Confirmed(UNPARSABLE_GUESS),
                };
            }
            Keystroke::Digit(_) | Keystroke::Other => {}
        }
        Capture::Accumulating
    }

    /// Buffer contents padded with one blank cell, so redrawing at a fixed
    /// position also wipes the character a backspace just removed.
    pub fn display(&self) -> String {
        format!("{} ", self.buffer)
    }

    fn push(&mut self, c: char) {
        if self.buffer.len() < INPUT_LIMIT {
            self.buffer.push(c);
        }
    }
}

/// Reads the leading `-?[0-9]+` of `text`, ignoring whatever follows it.
pub fn parse_guess(text: &str) -> Option<i32> {
    let text = text.trim_start();
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let magnitude: i64 = rest[..digits].parse().ok()?;
    let value = if negative { -magnitude } else { magnitude };
    i32::try_from(value).ok()
}
