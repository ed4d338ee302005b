//! Adapters - the hardware and config backends behind the ports
//!
//! The sensor never names a peripheral. Firmware picks one adapter per
//! port at startup; host tests swap in fakes instead.
//!
//! # Available Adapters
//!
//! - **static_config**: config table compiled into the firmware
//! - **output_bank**: `embedded-hal` output pins for amp-mod lines
//! - **rp2350_adc**: RP2350 SAR ADC via `embassy-rp` (feature `rp2350`)

pub mod output_bank;
#[cfg(feature = "rp2350")]
pub mod rp2350_adc;
pub mod static_config;

pub use output_bank::OutputBank;
#[cfg(feature = "rp2350")]
pub use rp2350_adc::{Rp2350Adc, RP2350_ADC_MAX};
pub use static_config::{ConfigEntry, StaticConfig};
