//! Newline framing for the serial command stream.
//!
//! Bytes are fed one at a time as they arrive from the UART. A line is
//! complete when `\n` is seen; a trailing `\r` is dropped so CRLF senders
//! work too. Partial lines stay buffered for as long as it takes the
//! terminator to arrive. A line of exactly [`MAX_LINE_LEN`] bytes is
//! accepted with either terminator.
//!
//! If a line grows past [`MAX_LINE_LEN`] the partial line is thrown away
//! and everything up to the next `\n` is skipped, so the parser resyncs on
//! the following command instead of seeing a truncated one.

use heapless::{String, Vec};

/// Maximum line length in bytes, excluding the terminator
pub const MAX_LINE_LEN: usize = 64;

/// A complete line, terminator stripped
pub type Line = String<MAX_LINE_LEN>;

/// Errors that can occur while framing lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeded [`MAX_LINE_LEN`] and was dropped
    Overflow,
    /// Line was not valid UTF-8
    InvalidUtf8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadState {
    /// Accumulating bytes of the current line
    Collecting,
    /// Buffer is full and a `\r` arrived; only `\n` completes the line
    CarriageReturn,
    /// Skipping the rest of an oversized line
    Discarding,
}

/// Accumulates UART bytes into lines
#[derive(Debug, Clone)]
pub struct LineBuffer {
    state: ReadState,
    buffer: Vec<u8, MAX_LINE_LEN>,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineBuffer {
    /// Create an empty line buffer
    pub fn new() -> Self {
        Self {
            state: ReadState::Collecting,
            buffer: Vec::new(),
        }
    }

    /// Drop any partial line
    pub fn reset(&mut self) {
        self.state = ReadState::Collecting;
        self.buffer.clear();
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(line))` when `byte` terminates a line, `Ok(None)`
    /// when more bytes are needed, or `Err` when the current line had to be
    /// dropped.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Line>, LineError> {
        match self.state {
            ReadState::Discarding => {
                if byte == b'\n' {
                    self.state = ReadState::Collecting;
                }
                Ok(None)
            }
            ReadState::CarriageReturn => {
                self.state = ReadState::Collecting;
                if byte == b'\n' {
                    return self.take_line().map(Some);
                }
                self.overflow()
            }
            ReadState::Collecting => {
                if byte == b'\n' {
                    return self.take_line().map(Some);
                }

                if self.buffer.push(byte).is_err() {
                    if byte == b'\r' {
                        self.state = ReadState::CarriageReturn;
                        return Ok(None);
                    }
                    return self.overflow();
                }
                Ok(None)
            }
        }
    }

    fn overflow(&mut self) -> Result<Option<Line>, LineError> {
        self.buffer.clear();
        self.state = ReadState::Discarding;
        Err(LineError::Overflow)
    }

    fn take_line(&mut self) -> Result<Line, LineError> {
        let mut bytes = core::mem::take(&mut self.buffer);
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
        String::from_utf8(bytes).map_err(|_| LineError::InvalidUtf8)
    }
}
