//! Pin specifications
//!
//! Pins are written in the firmware's config syntax: `port.pin` followed by
//! optional modifier characters, for example `0.24`, `1.30!` or `2.5o^`.
//! The literal `nc` marks an unused pin.
//!
//! | modifier | meaning       |
//! |----------|---------------|
//! | `!`      | inverted      |
//! | `o`      | open drain    |
//! | `^`      | pull-up       |
//! | `v`      | pull-down     |
//! | `-`      | no pull       |

use core::fmt;
use core::str::FromStr;

/// Literal used in config for an unused pin
pub const NOT_CONNECTED: &str = "nc";

/// Input bias requested for a pin
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    /// Leave the hardware default in place
    #[default]
    Default,
    Up,
    Down,
    None,
}

/// A parsed, connected pin
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinSpec {
    pub port: u8,
    pub pin: u8,
    pub inverted: bool,
    pub open_drain: bool,
    pub pull: Pull,
}

impl PinSpec {
    /// Plain, non-inverted pin
    pub const fn new(port: u8, pin: u8) -> Self {
        Self {
            port,
            pin,
            inverted: false,
            open_drain: false,
            pull: Pull::Default,
        }
    }

    pub const fn inverted(mut self) -> Self {
        self.inverted = !self.inverted;
        self
    }

    /// Parse a pin that may be `nc`
    ///
    /// Returns `Ok(None)` for the not-connected literal.
    pub fn parse_optional(s: &str) -> Result<Option<Self>, PinParseError> {
        if s.trim().eq_ignore_ascii_case(NOT_CONNECTED) {
            Ok(None)
        } else {
            s.parse().map(Some)
        }
    }

    /// Electrical level that puts the pin in the requested logical state
    pub const fn level(&self, active: bool) -> bool {
        active != self.inverted
    }

    /// True when both specs name the same physical pin, ignoring modifiers
    pub const fn same_line(&self, other: &PinSpec) -> bool {
        self.port == other.port && self.pin == other.pin
    }
}

impl FromStr for PinSpec {
    type Err = PinParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PinParseError::Empty);
        }
        if s.eq_ignore_ascii_case(NOT_CONNECTED) {
            return Err(PinParseError::NotConnected);
        }

        let (port, rest) = s.split_once('.').ok_or(PinParseError::MissingSeparator)?;
        let port = port.parse().map_err(|_| PinParseError::InvalidPort)?;

        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        let (pin, modifiers) = rest.split_at(digits);
        let pin = pin.parse().map_err(|_| PinParseError::InvalidPin)?;

        let mut spec = PinSpec::new(port, pin);
        for modifier in modifiers.chars() {
            match modifier {
                '!' => spec.inverted = true,
                'o' => spec.open_drain = true,
                '^' => spec.pull = Pull::Up,
                'v' => spec.pull = Pull::Down,
                '-' => spec.pull = Pull::None,
                other => return Err(PinParseError::UnknownModifier(other)),
            }
        }

        Ok(spec)
    }
}

impl fmt::Display for PinSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.port, self.pin)?;
        if self.inverted {
            f.write_str("!")?;
        }
        if self.open_drain {
            f.write_str("o")?;
        }
        match self.pull {
            Pull::Default => Ok(()),
            Pull::Up => f.write_str("^"),
            Pull::Down => f.write_str("v"),
            Pull::None => f.write_str("-"),
        }
    }
}

/// Error type for pin specification parsing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinParseError {
    /// Empty string
    Empty,
    /// `nc` given where a real pin is required
    NotConnected,
    /// No `.` between port and pin
    MissingSeparator,
    /// Port is not a number in `0..=255`
    InvalidPort,
    /// Pin is not a number in `0..=255`
    InvalidPin,
    /// Trailing character that is not a known modifier
    UnknownModifier(char),
}

impl fmt::Display for PinParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty pin specification"),
            Self::NotConnected => f.write_str("pin is not connected"),
            Self::MissingSeparator => f.write_str("expected `port.pin`"),
            Self::InvalidPort => f.write_str("invalid port number"),
            Self::InvalidPin => f.write_str("invalid pin number"),
            Self::UnknownModifier(c) => write!(f, "unknown pin modifier `{}`", c),
        }
    }
}

impl core::error::Error for PinParseError {}
