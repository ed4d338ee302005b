//! ADC port - abstraction over the shared analog-to-digital converter
//!
//! The ADC subsystem owns sampling and noise filtering. Sensors only
//! register their input pin once and then ask for filtered codes.

use crate::domain::PinSpec;

/// Port for reading analog inputs
///
/// # Example Implementation
///
/// ```ignore
/// impl AdcPort for FixedAdc {
///     fn enable_pin(&mut self, _pin: PinSpec) {}
///
///     fn read(&mut self, _pin: PinSpec) -> u32 {
///         self.code
///     }
///
///     fn max_value(&self) -> u32 {
///         1 << 12
///     }
/// }
/// ```
pub trait AdcPort {
    /// Register `pin` as an analog input so it gets sampled
    fn enable_pin(&mut self, pin: PinSpec);

    /// Latest filtered code for `pin`
    ///
    /// Hardware failures are not reported as errors. Implementations
    /// return `0` (or any code at or above `max_value()`), which the
    /// sensor treats as an invalid reading.
    fn read(&mut self, pin: PinSpec) -> u32;

    /// Exclusive upper bound of valid codes
    fn max_value(&self) -> u32;
}

impl<T: AdcPort + ?Sized> AdcPort for &mut T {
    fn enable_pin(&mut self, pin: PinSpec) {
        T::enable_pin(self, pin)
    }

    fn read(&mut self, pin: PinSpec) -> u32 {
        T::read(self, pin)
    }

    fn max_value(&self) -> u32 {
        T::max_value(self)
    }
}
