//! Ports (interfaces) defining the boundaries of the driver
//!
//! Ports are traits that define how the sensor interacts with the rest of
//! the firmware. They replace global kernel access with explicit handles
//! that are injected at construction.
//!
//! - **AdcPort**: how raw codes are sampled (RP2350 ADC, mock)
//! - **GpioPort**: how amp-mod outputs are driven (embedded-hal pins, mock)
//! - **ConfigSource**: where settings come from (static table, config file)
//! - **TemperatureSensor**: what a temperature manager polls

pub mod adc;
pub mod config;
pub mod gpio;
pub mod sensor;

pub use adc::AdcPort;
pub use config::{ConfigError, ConfigSource, ConfigValue};
pub use gpio::{GpioError, GpioPort};
pub use sensor::TemperatureSensor;
