//! Domain layer - pure sensor logic independent of hardware
//!
//! This module contains the value types the PT100 driver works with:
//! calibration curves, temperature results and pin specifications.

pub mod calibration;
pub mod pin;
pub mod temperature;

pub use calibration::{Calibration, CalibrationError};
pub use pin::{PinParseError, PinSpec, Pull, NOT_CONNECTED};
pub use temperature::{Extremes, Temperature};
