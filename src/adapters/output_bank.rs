//! Output bank adapter
//!
//! Implements `GpioPort` over a fixed set of `embedded-hal` output pins,
//! each registered under the `PinSpec` that config files use to name it.

use embedded_hal::digital::{OutputPin, PinState};
use heapless::Vec;

use crate::domain::PinSpec;
use crate::ports::gpio::{GpioError, GpioPort};

struct Slot<P> {
    spec: PinSpec,
    pin: P,
    output: bool,
}

/// Bank of up to `N` output pins
///
/// Pins are matched by port and pin number; modifiers such as `!` are the
/// caller's concern and are ignored here.
pub struct OutputBank<P, const N: usize> {
    slots: Vec<Slot<P>, N>,
}

impl<P: OutputPin, const N: usize> OutputBank<P, N> {
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Register `pin` under `spec`
    ///
    /// Registering the same line twice replaces the earlier pin.
    pub fn add(&mut self, spec: PinSpec, pin: P) -> Result<(), GpioError> {
        let slot = Slot {
            spec,
            pin,
            output: false,
        };
        match self.slots.iter().position(|s| s.spec.same_line(&spec)) {
            Some(index) => {
                self.slots[index] = slot;
                Ok(())
            }
            None => self.slots.push(slot).map_err(|_| GpioError::BankFull),
        }
    }

    /// Builder form of [`add`](Self::add)
    pub fn with_pin(mut self, spec: PinSpec, pin: P) -> Result<Self, GpioError> {
        self.add(spec, pin)?;
        Ok(self)
    }

    /// True once `spec` has been configured as an output
    pub fn is_output(&self, spec: PinSpec) -> bool {
        self.slots
            .iter()
            .any(|s| s.spec.same_line(&spec) && s.output)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn slot_mut(&mut self, spec: PinSpec) -> Result<&mut Slot<P>, GpioError> {
        self.slots
            .iter_mut()
            .find(|s| s.spec.same_line(&spec))
            .ok_or(GpioError::UnknownPin)
    }
}

impl<P: OutputPin, const N: usize> Default for OutputBank<P, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: OutputPin, const N: usize> GpioPort for OutputBank<P, N> {
    fn as_output(&mut self, pin: PinSpec) -> Result<(), GpioError> {
        self.slot_mut(pin)?.output = true;
        Ok(())
    }

    fn set(&mut self, pin: PinSpec, high: bool) -> Result<(), GpioError> {
        let slot = self.slot_mut(pin)?;
        if !slot.output {
            return Err(GpioError::NotOutput);
        }
        slot.pin
            .set_state(PinState::from(high))
            .map_err(|_| GpioError::HardwareError)
    }
}
