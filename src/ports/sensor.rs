//! Temperature sensor port - the surface a temperature manager polls
//!
//! This trait lets a temperature-control loop drive any sensor model
//! (PT100, thermistor, thermocouple amplifier) without knowing which one
//! is wired up.

use crate::domain::Temperature;
use crate::ports::config::{ConfigError, ConfigSource};

/// Port for a polled temperature sensor
///
/// # Example
///
/// ```ignore
/// sensor.update_config(&config, "temperature_control", "hotend")?;
///
/// loop {
///     match sensor.get_temperature() {
///         Temperature::Celsius(t) => heater.update(t),
///         Temperature::Invalid => faults.record_invalid_reading(),
///     }
///     ticker.next().await;
/// }
/// ```
pub trait TemperatureSensor {
    /// Load settings for `(module, instance)` and set up the hardware
    ///
    /// Called once at startup. A missing required setting aborts setup.
    fn update_config<C: ConfigSource + ?Sized>(
        &mut self,
        source: &C,
        module: &str,
        instance: &str,
    ) -> Result<(), ConfigError>;

    /// Take a reading and convert it
    fn get_temperature(&mut self) -> Temperature;

    /// Write the raw code and converted value to the diagnostic sink
    fn get_raw(&mut self);

    /// `(min, max)` of readings since the last reset, if any
    fn extremes(&self) -> Option<(f32, f32)>;
}
