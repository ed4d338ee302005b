//! PT100 RTD Temperature Sensor Driver
//!
//! This library reads platinum RTD probes through an ADC and converts the raw
//! codes to Celsius with a linear or quadratic calibration, using a hexagonal
//! architecture so the driver runs unchanged on hardware and in tests.
//!
//! # Layout
//!
//! ```text
//!   StaticConfig ──ConfigSource──┐
//!                                ▼
//!   Rp2350Adc ─────AdcPort────► Pt100 ──TemperatureSensor──► control loop
//!                                ▲  │
//!   OutputBank ────GpioPort──────┘  └── core::fmt::Write ──► console
//!
//!   domain:  Calibration · Temperature · Extremes · PinSpec
//! ```
//!
//! `domain` holds pure value types, `ports` the traits the sensor is
//! generic over, and `adapters` the stock implementations of those traits.
//!
//! [`Pt100`] ties the layers together: it loads its settings from a
//! [`ConfigSource`], samples through an [`AdcPort`] and toggles amp-mod pins
//! through a [`GpioPort`].

#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

/// Domain layer - pure sensor logic
pub mod domain;

/// Ports - traits defining boundaries
pub mod ports;

/// Adapters - concrete implementations
pub mod adapters;

pub mod pt100;
pub mod status;

// Re-export key domain types
pub use domain::{Calibration, CalibrationError, Extremes, PinSpec, Temperature};

// Re-export key port traits
pub use ports::{AdcPort, ConfigError, ConfigSource, GpioError, GpioPort, TemperatureSensor};

// Re-export adapters
pub use adapters::{ConfigEntry, OutputBank, StaticConfig};
#[cfg(feature = "rp2350")]
pub use adapters::{Rp2350Adc, RP2350_ADC_MAX};

pub use pt100::{Pt100, Pt100Config, Pt100Pins};
pub use status::{SensorStatus, StatusError};
