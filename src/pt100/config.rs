//! PT100 configuration
//!
//! Settings live under the sensor's `(module, instance)` pair:
//!
//! ```text
//! thermistor_pin   0.24      # required, ADC input
//! ampmod1_pin      1.20      # optional, drives the RTD amplifier (UP! boards)
//! ampmod2_pin      nc        # optional
//! pt100linear      1         # 1: slope/yintercept, 0: pt100_a/b/c
//! slope            0.0257604875
//! yintercept       -18.54
//! pt100_a          0.000000174674754
//! pt100_b          0.022383
//! pt100_c          -4.00648
//! ```

use crate::domain::{Calibration, PinSpec, NOT_CONNECTED};
use crate::ports::config::{ConfigError, ConfigSource, ConfigValue};

/// Config keys read by the PT100 sensor
pub mod keys {
    pub const THERMISTOR_PIN: &str = "thermistor_pin";
    pub const AMPMOD1_PIN: &str = "ampmod1_pin";
    pub const AMPMOD2_PIN: &str = "ampmod2_pin";
    pub const LINEAR: &str = "pt100linear";
    pub const SLOPE: &str = "slope";
    pub const Y_INTERCEPT: &str = "yintercept";
    pub const A: &str = "pt100_a";
    pub const B: &str = "pt100_b";
    pub const C: &str = "pt100_c";
}

/// Pin wiring of one PT100 channel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pt100Pins {
    /// ADC input the RTD divider is wired to
    pub input: PinSpec,
    /// First amplifier modulation pin, `None` when `nc`
    pub ampmod1: Option<PinSpec>,
    /// Second amplifier modulation pin, `None` when `nc`
    pub ampmod2: Option<PinSpec>,
}

impl Pt100Pins {
    /// Sensor on `input` with no amplifier modulation
    pub const fn new(input: PinSpec) -> Self {
        Self {
            input,
            ampmod1: None,
            ampmod2: None,
        }
    }

    pub const fn with_ampmod(mut self, ampmod1: Option<PinSpec>, ampmod2: Option<PinSpec>) -> Self {
        self.ampmod1 = ampmod1;
        self.ampmod2 = ampmod2;
        self
    }

    /// Read the pin settings; every failure here is fatal to sensor setup
    pub fn load<C: ConfigSource + ?Sized>(
        source: &C,
        module: &str,
        instance: &str,
    ) -> Result<Self, ConfigError> {
        let input = source
            .value(module, instance, keys::THERMISTOR_PIN)
            .required()?;
        let input = required_pin(&input)?;

        let ampmod1 = optional_pin(&source.value(module, instance, keys::AMPMOD1_PIN))?;
        let ampmod2 = optional_pin(&source.value(module, instance, keys::AMPMOD2_PIN))?;

        Ok(Self {
            input,
            ampmod1,
            ampmod2,
        })
    }
}

/// Read the calibration settings
///
/// Linear mode is the default. Only the keys of the selected mode are read,
/// so stray keys of the other mode are ignored.
pub fn load_calibration<C: ConfigSource + ?Sized>(
    source: &C,
    module: &str,
    instance: &str,
) -> Result<Calibration, ConfigError> {
    let number = |key: &'static str, default: f32| -> Result<f32, ConfigError> {
        let value = source
            .value(module, instance, key)
            .by_default_number(default)
            .as_number()?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ConfigError::NotFinite(key))
        }
    };

    let linear = source
        .value(module, instance, keys::LINEAR)
        .by_default_number(1.0)
        .as_bool()?;

    if linear {
        Ok(Calibration::linear(
            number(keys::SLOPE, Calibration::DEFAULT_SLOPE)?,
            number(keys::Y_INTERCEPT, Calibration::DEFAULT_INTERCEPT)?,
        ))
    } else {
        Ok(Calibration::quadratic(
            number(keys::A, Calibration::DEFAULT_A)?,
            number(keys::B, Calibration::DEFAULT_B)?,
            number(keys::C, Calibration::DEFAULT_C)?,
        ))
    }
}

/// Complete PT100 channel configuration
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pt100Config {
    pub pins: Pt100Pins,
    pub calibration: Calibration,
}

impl Pt100Config {
    /// Channel on `input` with the linear factory calibration
    pub const fn new(input: PinSpec) -> Self {
        Self {
            pins: Pt100Pins::new(input),
            calibration: Calibration::LINEAR_DEFAULT,
        }
    }

    pub const fn with_calibration(mut self, calibration: Calibration) -> Self {
        self.calibration = calibration;
        self
    }

    /// Strict load: any bad value, pin or calibration, is an error
    pub fn load<C: ConfigSource + ?Sized>(
        source: &C,
        module: &str,
        instance: &str,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            pins: Pt100Pins::load(source, module, instance)?,
            calibration: load_calibration(source, module, instance)?,
        })
    }
}

fn required_pin(value: &ConfigValue<'_>) -> Result<PinSpec, ConfigError> {
    match PinSpec::parse_optional(value.as_str()?) {
        Ok(Some(pin)) => Ok(pin),
        Ok(None) => Err(ConfigError::NotConnected(value.key())),
        Err(error) => Err(ConfigError::InvalidPin {
            key: value.key(),
            error,
        }),
    }
}

fn optional_pin(value: &ConfigValue<'_>) -> Result<Option<PinSpec>, ConfigError> {
    let text = value.by_default(NOT_CONNECTED).as_str()?;
    PinSpec::parse_optional(text).map_err(|error| ConfigError::InvalidPin {
        key: value.key(),
        error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::static_config::{ConfigEntry, StaticConfig};

    const MODULE: &str = "temperature_control";
    const HOTEND: &str = "hotend";

    fn entry(key: &'static str, value: &'static str) -> ConfigEntry<'static> {
        ConfigEntry::new(MODULE, HOTEND, key, value)
    }

    #[test]
    fn test_defaults() {
        let entries = [entry(keys::THERMISTOR_PIN, "0.24")];
        let config = Pt100Config::load(&StaticConfig::new(&entries), MODULE, HOTEND).unwrap();

        assert_eq!(config.pins, Pt100Pins::new(PinSpec::new(0, 24)));
        assert_eq!(config.calibration, Calibration::LINEAR_DEFAULT);
    }

    #[test]
    fn test_missing_input_pin_is_fatal() {
        let entries = [entry(keys::SLOPE, "0.03")];
        let result = Pt100Config::load(&StaticConfig::new(&entries), MODULE, HOTEND);
        assert_eq!(result, Err(ConfigError::MissingRequired(keys::THERMISTOR_PIN)));
    }

    #[test]
    fn test_input_pin_cannot_be_nc() {
        let entries = [entry(keys::THERMISTOR_PIN, "nc")];
        let result = Pt100Pins::load(&StaticConfig::new(&entries), MODULE, HOTEND);
        assert_eq!(result, Err(ConfigError::NotConnected(keys::THERMISTOR_PIN)));
    }

    #[test]
    fn test_bad_ampmod_pin() {
        let entries = [
            entry(keys::THERMISTOR_PIN, "0.24"),
            entry(keys::AMPMOD2_PIN, "1.20x"),
        ];
        let result = Pt100Pins::load(&StaticConfig::new(&entries), MODULE, HOTEND);
        assert_eq!(
            result,
            Err(ConfigError::InvalidPin {
                key: keys::AMPMOD2_PIN,
                error: crate::domain::PinParseError::UnknownModifier('x'),
            })
        );
    }

    #[test]
    fn test_ampmod_pins() {
        let entries = [
            entry(keys::THERMISTOR_PIN, "0.24"),
            entry(keys::AMPMOD1_PIN, "1.20!"),
            entry(keys::AMPMOD2_PIN, "nc"),
        ];
        let pins = Pt100Pins::load(&StaticConfig::new(&entries), MODULE, HOTEND).unwrap();
        assert_eq!(pins.ampmod1, Some(PinSpec::new(1, 20).inverted()));
        assert_eq!(pins.ampmod2, None);
    }

    #[test]
    fn test_linear_overrides() {
        let entries = [
            entry(keys::THERMISTOR_PIN, "0.24"),
            entry(keys::SLOPE, "0.03"),
            entry(keys::Y_INTERCEPT, "-20"),
            entry(keys::A, "5"),
        ];
        let calibration = load_calibration(&StaticConfig::new(&entries), MODULE, HOTEND).unwrap();
        assert_eq!(calibration, Calibration::linear(0.03, -20.0));
    }

    #[test]
    fn test_quadratic_mode() {
        let entries = [
            entry(keys::THERMISTOR_PIN, "0.24"),
            entry(keys::LINEAR, "0"),
            entry(keys::B, "0.02"),
        ];
        let calibration = load_calibration(&StaticConfig::new(&entries), MODULE, HOTEND).unwrap();
        assert_eq!(
            calibration,
            Calibration::quadratic(Calibration::DEFAULT_A, 0.02, Calibration::DEFAULT_C)
        );
    }

    #[test]
    fn test_calibration_errors() {
        let entries = [entry(keys::SLOPE, "steep")];
        assert_eq!(
            load_calibration(&StaticConfig::new(&entries), MODULE, HOTEND),
            Err(ConfigError::NotANumber(keys::SLOPE))
        );

        let entries = [entry(keys::Y_INTERCEPT, "inf")];
        assert_eq!(
            load_calibration(&StaticConfig::new(&entries), MODULE, HOTEND),
            Err(ConfigError::NotFinite(keys::Y_INTERCEPT))
        );
    }

    #[test]
    fn test_other_instances_are_ignored() {
        let entries = [
            entry(keys::THERMISTOR_PIN, "0.24"),
            ConfigEntry::new(MODULE, "bed", keys::SLOPE, "1.0"),
        ];
        let config = Pt100Config::load(&StaticConfig::new(&entries), MODULE, HOTEND).unwrap();
        assert_eq!(config.calibration, Calibration::LINEAR_DEFAULT);
    }
}
