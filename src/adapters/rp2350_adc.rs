//! RP2350 ADC adapter
//!
//! This adapter implements the AdcPort trait for the RP2350's SAR ADC,
//! read in blocking mode. Each RTD input is registered with the
//! `embassy_rp` channel wired to it.

use embassy_rp::adc::{Adc, Blocking, Channel as AdcChannel};
use heapless::Vec;

use crate::domain::PinSpec;
use crate::ports::adc::AdcPort;

/// Exclusive upper bound of the 12-bit conversion result
pub const RP2350_ADC_MAX: u32 = 1 << 12;

struct Input<'a> {
    pin: PinSpec,
    channel: AdcChannel<'a>,
    enabled: bool,
}

/// RP2350 ADC adapter serving up to `N` analog inputs
///
/// # Example
///
/// ```ignore
/// let adc = Adc::new_blocking(p.ADC, embassy_rp::adc::Config::default());
/// let hotend = AdcChannel::new_pin(p.PIN_26, Pull::None);
/// let adc = Rp2350Adc::<2>::new(adc).with_channel("0.26".parse()?, hotend)?;
/// ```
pub struct Rp2350Adc<'a, const N: usize> {
    /// ADC peripheral (blocking mode to avoid DMA conflicts with flash)
    adc: Adc<'a, Blocking>,
    inputs: Vec<Input<'a>, N>,
}

impl<'a, const N: usize> Rp2350Adc<'a, N> {
    pub fn new(adc: Adc<'a, Blocking>) -> Self {
        Self {
            adc,
            inputs: Vec::new(),
        }
    }

    /// Attach `channel` as the input named `pin`
    ///
    /// Hands the channel back if the table is full.
    pub fn add_channel(&mut self, pin: PinSpec, channel: AdcChannel<'a>) -> Result<(), AdcChannel<'a>> {
        self.inputs
            .push(Input {
                pin,
                channel,
                enabled: false,
            })
            .map_err(|input| input.channel)
    }

    /// Builder form of [`add_channel`](Self::add_channel)
    pub fn with_channel(mut self, pin: PinSpec, channel: AdcChannel<'a>) -> Result<Self, AdcChannel<'a>> {
        self.add_channel(pin, channel)?;
        Ok(self)
    }
}

impl<'a, const N: usize> AdcPort for Rp2350Adc<'a, N> {
    fn enable_pin(&mut self, pin: PinSpec) {
        match self.inputs.iter_mut().find(|i| i.pin.same_line(&pin)) {
            Some(input) => input.enabled = true,
            None => warn!("no ADC channel attached to pin {}.{}", pin.port, pin.pin),
        }
    }

    fn read(&mut self, pin: PinSpec) -> u32 {
        let Some(input) = self
            .inputs
            .iter_mut()
            .find(|i| i.enabled && i.pin.same_line(&pin))
        else {
            return 0;
        };

        // A failed conversion reads as 0, which the sensor rejects
        match self.adc.blocking_read(&mut input.channel) {
            Ok(code) => code as u32,
            Err(_) => {
                warn!("ADC read failed on pin {}.{}", pin.port, pin.pin);
                0
            }
        }
    }

    fn max_value(&self) -> u32 {
        RP2350_ADC_MAX
    }
}
