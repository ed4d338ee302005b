//! GPIO port - abstraction for digital output pins
//!
//! Levels passed to this port are electrical levels. Pin inversion (`!`)
//! is resolved by the caller via `PinSpec::level`.

use core::fmt;

use crate::domain::PinSpec;

/// Error type for GPIO operations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioError {
    /// No pin with this port/pin number is available
    UnknownPin,
    /// Pin has not been configured as an output
    NotOutput,
    /// No room left to register another pin
    BankFull,
    /// The pin driver reported an error
    HardwareError,
}

impl fmt::Display for GpioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPin => f.write_str("unknown pin"),
            Self::NotOutput => f.write_str("pin is not an output"),
            Self::BankFull => f.write_str("pin bank is full"),
            Self::HardwareError => f.write_str("pin driver error"),
        }
    }
}

impl core::error::Error for GpioError {}

/// Port for driving digital outputs
pub trait GpioPort {
    /// Configure `pin` as a push-pull (or open-drain, per the pin modifiers) output
    fn as_output(&mut self, pin: PinSpec) -> Result<(), GpioError>;

    /// Drive `pin` to the electrical level `high`
    fn set(&mut self, pin: PinSpec, high: bool) -> Result<(), GpioError>;
}

impl<T: GpioPort + ?Sized> GpioPort for &mut T {
    fn as_output(&mut self, pin: PinSpec) -> Result<(), GpioError> {
        T::as_output(self, pin)
    }

    fn set(&mut self, pin: PinSpec, high: bool) -> Result<(), GpioError> {
        T::set(self, pin, high)
    }
}
