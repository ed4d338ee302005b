//! Configuration port - abstraction over the firmware's config registry
//!
//! Values are looked up by `(module, instance, key)`, for example
//! `("temperature_control", "hotend", "thermistor_pin")`. Every value is
//! stored as text; `ConfigValue` layers the required/default handling and
//! the numeric conversions on top.

use core::fmt;

use crate::domain::PinParseError;

/// Port for reading configuration values
pub trait ConfigSource {
    /// Raw text stored for a key, if any
    fn lookup(&self, module: &str, instance: &str, key: &str) -> Option<&str>;

    /// Look up a key and wrap it for required/default handling
    fn value(&self, module: &str, instance: &str, key: &'static str) -> ConfigValue<'_> {
        ConfigValue::new(key, self.lookup(module, instance, key))
    }
}

impl<T: ConfigSource + ?Sized> ConfigSource for &T {
    fn lookup(&self, module: &str, instance: &str, key: &str) -> Option<&str> {
        T::lookup(self, module, instance, key)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Raw<'a> {
    Configured(&'a str),
    DefaultText(&'a str),
    DefaultNumber(f32),
    Missing,
}

/// A looked-up configuration value
///
/// ```ignore
/// let pin = source.value(module, instance, "thermistor_pin").required()?.as_str()?;
/// let slope = source.value(module, instance, "slope").by_default_number(0.0257).as_number()?;
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfigValue<'a> {
    key: &'static str,
    raw: Raw<'a>,
}

impl<'a> ConfigValue<'a> {
    pub fn new(key: &'static str, text: Option<&'a str>) -> Self {
        let raw = match text {
            Some(text) => Raw::Configured(text),
            None => Raw::Missing,
        };
        Self { key, raw }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// True when the key was present in the source
    pub fn is_set(&self) -> bool {
        matches!(self.raw, Raw::Configured(_))
    }

    /// Fail with `MissingRequired` unless the key was present
    pub fn required(self) -> Result<Self, ConfigError> {
        match self.raw {
            Raw::Configured(_) => Ok(self),
            _ => Err(ConfigError::MissingRequired(self.key)),
        }
    }

    /// Fall back to `text` when the key is absent
    pub fn by_default(mut self, text: &'a str) -> Self {
        if self.raw == Raw::Missing {
            self.raw = Raw::DefaultText(text);
        }
        self
    }

    /// Fall back to `number` when the key is absent
    pub fn by_default_number(mut self, number: f32) -> Self {
        if self.raw == Raw::Missing {
            self.raw = Raw::DefaultNumber(number);
        }
        self
    }

    pub fn as_str(&self) -> Result<&'a str, ConfigError> {
        match self.raw {
            Raw::Configured(text) | Raw::DefaultText(text) => Ok(text.trim()),
            Raw::DefaultNumber(_) => Err(ConfigError::NotText(self.key)),
            Raw::Missing => Err(ConfigError::MissingRequired(self.key)),
        }
    }

    pub fn as_number(&self) -> Result<f32, ConfigError> {
        match self.raw {
            Raw::Configured(text) | Raw::DefaultText(text) => text
                .trim()
                .parse()
                .map_err(|_| ConfigError::NotANumber(self.key)),
            Raw::DefaultNumber(number) => Ok(number),
            Raw::Missing => Err(ConfigError::MissingRequired(self.key)),
        }
    }

    /// Numeric flag: positive numbers and `true` are set, zero, negatives and `false` are not
    pub fn as_bool(&self) -> Result<bool, ConfigError> {
        if let Raw::Configured(text) | Raw::DefaultText(text) = self.raw {
            let text = text.trim();
            if text.eq_ignore_ascii_case("true") {
                return Ok(true);
            }
            if text.eq_ignore_ascii_case("false") {
                return Ok(false);
            }
        }
        self.as_number().map(|n| n > 0.0)
    }
}

/// Error type for configuration loading
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A required key is absent
    MissingRequired(&'static str),
    /// A required pin is set to `nc`
    NotConnected(&'static str),
    /// A pin key holds an unparseable specification
    InvalidPin {
        key: &'static str,
        error: PinParseError,
    },
    /// A numeric key holds text that is not a number
    NotANumber(&'static str),
    /// A text key only has a numeric default
    NotText(&'static str),
    /// A calibration coefficient is NaN or infinite
    NotFinite(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRequired(key) => write!(f, "required key `{}` is missing", key),
            Self::NotConnected(key) => write!(f, "`{}` must name a connected pin", key),
            Self::InvalidPin { key, error } => write!(f, "`{}`: {}", key, error),
            Self::NotANumber(key) => write!(f, "`{}` is not a number", key),
            Self::NotText(key) => write!(f, "`{}` is not text", key),
            Self::NotFinite(key) => write!(f, "`{}` is not a finite number", key),
        }
    }
}

impl core::error::Error for ConfigError {}
