//! Delta command encoding and decoding.
//!
//! A command line has three colon-separated fields:
//! - pan delta (degrees, decimal)
//! - tilt delta (degrees, decimal)
//! - laser flag (integer, nonzero = on)
//!
//! Only the first two colons are structural. Anything after the second
//! colon belongs to the laser field, which is read up to its first
//! non-digit. Numeric fields are parsed permissively: an unreadable field
//! is zero, not an error. The one rejected shape is a line without two
//! colons, or with nothing before the first one.

use core::fmt::Write;
use core::str::FromStr;

use heapless::String;

use crate::line::MAX_LINE_LEN;
use crate::numeric::{parse_float_prefix, parse_int_prefix};

/// Field separator
pub const SEPARATOR: char = ':';

/// Errors from command encoding and decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Missing or misplaced colon delimiters
    Malformed,
    /// Encoded command does not fit in a line
    BufferTooSmall,
}

/// One decoded command line
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command {
    /// Pan change in degrees
    pub pan_delta: f32,
    /// Tilt change in degrees
    pub tilt_delta: f32,
    /// Laser state for this command
    pub laser_on: bool,
}

impl Command {
    /// Create a command
    pub fn new(pan_delta: f32, tilt_delta: f32, laser_on: bool) -> Self {
        Self {
            pan_delta,
            tilt_delta,
            laser_on,
        }
    }

    /// A command that only sets the laser, leaving the aim where it is
    pub fn hold(laser_on: bool) -> Self {
        Self::new(0.0, 0.0, laser_on)
    }

    /// Encode as a protocol line, terminator included
    ///
    /// Deltas are written with an explicit sign and one decimal, the way
    /// the host tracker sends them (`+2.5:-3.5:0\n`).
    pub fn encode(&self) -> Result<String<MAX_LINE_LEN>, CommandError> {
        let mut line = String::new();
        write!(
            line,
            "{:+.1}{sep}{:+.1}{sep}{}\n",
            self.pan_delta,
            self.tilt_delta,
            u8::from(self.laser_on),
            sep = SEPARATOR
        )
        .map_err(|_| CommandError::BufferTooSmall)?;
        Ok(line)
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_command(s)
    }
}

/// Decode one line (without its terminator) into a [`Command`]
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let first = match line.find(SEPARATOR) {
        Some(i) if i > 0 => i,
        _ => return Err(CommandError::Malformed),
    };

    let second = line[first + 1..]
        .find(SEPARATOR)
        .map(|i| first + 1 + i)
        .ok_or(CommandError::Malformed)?;

    Ok(Command {
        pan_delta: parse_float_prefix(&line[..first]),
        tilt_delta: parse_float_prefix(&line[first + 1..second]),
        laser_on: parse_int_prefix(&line[second + 1..]) != 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_host_example() {
        let cmd = parse_command("+2.5:-3.5:0").unwrap();
        assert_eq!(cmd.pan_delta, 2.5);
        assert_eq!(cmd.tilt_delta, -3.5);
        assert!(!cmd.laser_on);
    }

    #[test]
    fn test_parse_laser_flag() {
        assert!(parse_command("0:0:1").unwrap().laser_on);
        assert!(!parse_command("0:0:0").unwrap().laser_on);
        assert!(parse_command("0:0:-1").unwrap().laser_on);
        assert!(parse_command("0:0:42").unwrap().laser_on);
        assert!(!parse_command("0:0:").unwrap().laser_on);
    }

    #[test]
    fn test_malformed_lines() {
        assert_eq!(parse_command(""), Err(CommandError::Malformed));
        assert_eq!(parse_command("hello"), Err(CommandError::Malformed));
        assert_eq!(parse_command("1.0"), Err(CommandError::Malformed));
        assert_eq!(parse_command("1.0:2.0"), Err(CommandError::Malformed));
        // Colon at index 0 is rejected even with three fields
        assert_eq!(parse_command(":1:0"), Err(CommandError::Malformed));
        assert_eq!(parse_command("::"), Err(CommandError::Malformed));
    }

    #[test]
    fn test_extra_colons_go_to_laser_field() {
        let cmd = parse_command("1:2:3:4").unwrap();
        assert_eq!(cmd.pan_delta, 1.0);
        assert_eq!(cmd.tilt_delta, 2.0);
        assert!(cmd.laser_on);

        let cmd = parse_command("1:2:0:1").unwrap();
        assert!(!cmd.laser_on);
    }

    #[test]
    fn test_permissive_fields_read_as_zero() {
        let cmd = parse_command("abc:xyz:on").unwrap();
        assert_eq!(cmd, Command::new(0.0, 0.0, false));

        let cmd = parse_command("5::1").unwrap();
        assert_eq!(cmd, Command::new(5.0, 0.0, true));

        let cmd = parse_command(" :1.5:1").unwrap();
        assert_eq!(cmd, Command::new(0.0, 1.5, true));
    }

    #[test]
    fn test_from_str() {
        let cmd: Command = "-1.0:+0.5:1".parse().unwrap();
        assert_eq!(cmd, Command::new(-1.0, 0.5, true));
        assert!("nope".parse::<Command>().is_err());
    }

    #[test]
    fn test_encode_matches_host_format() {
        let line = Command::new(2.5, -3.5, false).encode().unwrap();
        assert_eq!(line.as_str(), "+2.5:-3.5:0\n");

        let line = Command::hold(true).encode().unwrap();
        assert_eq!(line.as_str(), "+0.0:+0.0:1\n");

        let line = Command::new(1.26, -0.04, true).encode().unwrap();
        assert_eq!(line.as_str(), "+1.3:-0.0:1\n");
    }

    #[test]
    fn test_encoded_line_parses_back() {
        let line = Command::new(-12.3, 4.5, true).encode().unwrap();
        let cmd = parse_command(line.trim_end()).unwrap();
        assert_eq!(cmd, Command::new(-12.3, 4.5, true));
    }

    #[test]
    fn test_encode_too_long() {
        let cmd = Command::new(1.0e30, -1.0e30, true);
        assert_eq!(cmd.encode(), Err(CommandError::BufferTooSmall));
    }
}
