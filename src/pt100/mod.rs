//! PT100 RTD temperature sensor
//!
//! Reads an RTD through the shared ADC and converts the code with a
//! configurable linear or quadratic calibration. Some boards (the UP!
//! printer, for one) energize the RTD amplifier through one or two GPIOs;
//! those "amp-mod" pins are driven active around every sample.
//!
//! All hardware is reached through injected ports, so the sensor runs the
//! same against real peripherals and against test doubles.

pub mod config;

use core::fmt::Write;

use crate::domain::{Calibration, CalibrationError, Extremes, PinSpec, Temperature};
use crate::ports::adc::AdcPort;
use crate::ports::config::{ConfigError, ConfigSource};
use crate::ports::gpio::GpioPort;
use crate::ports::sensor::TemperatureSensor;
use crate::status::SensorStatus;

pub use config::{keys, load_calibration, Pt100Config, Pt100Pins};

/// PT100 sensor bound to its ADC, GPIO and diagnostic output
///
/// `W` receives the console lines written by [`get_raw`](Self::get_raw).
/// Writes are best effort and errors are dropped.
pub struct Pt100<A, G, W> {
    adc: A,
    gpio: G,
    out: W,
    calibration: Calibration,
    /// ADC input; `None` until configured
    input: Option<PinSpec>,
    /// Amp-mod pins in use; only connected pins that accepted output mode
    ampmod: [Option<PinSpec>; 2],
    config_valid: bool,
    extremes: Extremes,
    last_raw: u32,
}

impl<A, G, W> Pt100<A, G, W>
where
    A: AdcPort,
    G: GpioPort,
    W: Write,
{
    /// Create an unconfigured sensor
    ///
    /// Readings are invalid until [`update_config`](Self::update_config)
    /// or [`apply_config`](Self::apply_config) succeeds.
    pub fn new(adc: A, gpio: G, out: W) -> Self {
        Self {
            adc,
            gpio,
            out,
            calibration: Calibration::LINEAR_DEFAULT,
            input: None,
            ampmod: [None, None],
            config_valid: true,
            extremes: Extremes::new(),
            last_raw: 0,
        }
    }

    /// Load settings for `(module, instance)` and set up the hardware
    ///
    /// A missing or unusable pin is fatal and leaves the sensor untouched.
    /// A bad calibration value is not: the sensor comes up in the degraded
    /// state where every reading is invalid.
    pub fn update_config<C: ConfigSource + ?Sized>(
        &mut self,
        source: &C,
        module: &str,
        instance: &str,
    ) -> Result<(), ConfigError> {
        let pins = Pt100Pins::load(source, module, instance)?;

        let calibration = match load_calibration(source, module, instance) {
            Ok(calibration) => calibration,
            Err(e) => {
                warn!("pt100 {}: {}, sensor disabled", instance, e);
                self.config_valid = false;
                self.calibration
            }
        };

        self.apply_config(Pt100Config { pins, calibration });
        info!(
            "pt100 {}: input {}.{}, {} calibration",
            instance,
            pins.input.port,
            pins.input.pin,
            if calibration.is_linear() { "linear" } else { "quadratic" }
        );
        Ok(())
    }

    /// Apply an already loaded configuration
    ///
    /// Enables the ADC input, then configures each connected amp-mod pin
    /// as an output and drives it active.
    pub fn apply_config(&mut self, config: Pt100Config) {
        if !config.calibration.is_finite() {
            warn!("pt100: calibration is not finite, sensor disabled");
            self.config_valid = false;
        } else {
            self.calibration = config.calibration;
        }

        self.adc.enable_pin(config.pins.input);
        self.input = Some(config.pins.input);

        let ampmod1 = config.pins.ampmod1.and_then(|pin| self.energize(pin));
        let ampmod2 = config.pins.ampmod2.and_then(|pin| self.energize(pin));
        self.ampmod = [ampmod1, ampmod2];
    }

    /// Take a reading and convert it
    ///
    /// Valid readings widen the tracked min/max. A sensor with a bad
    /// configuration returns `Invalid` without touching the hardware.
    pub fn get_temperature(&mut self) -> Temperature {
        if !self.config_valid {
            return Temperature::Invalid;
        }

        let adc_value = self.new_thermistor_reading();
        let temperature = self.adc_value_to_temperature(adc_value);
        if let Temperature::Celsius(t) = temperature {
            self.extremes.observe(t);
        }
        temperature
    }

    /// Write the raw code and converted value to the diagnostic output
    ///
    /// Collapses the tracked min/max onto this one measurement; an invalid
    /// measurement clears them.
    pub fn get_raw(&mut self) {
        if !self.config_valid {
            let _ = writeln!(self.out, "WARNING: The config is bad for this temperature sensor");
        }

        let adc_value = self.new_thermistor_reading();
        let temperature = self.adc_value_to_temperature(adc_value);
        let _ = writeln!(self.out, "PT100: adc= {}, temp= {}", adc_value, temperature);

        match temperature {
            Temperature::Celsius(t) => self.extremes.reset_to(t),
            Temperature::Invalid => self.extremes.clear(),
        }
    }

    /// Sample the RTD
    ///
    /// Amp-mod pins in use are driven active for the duration of the ADC
    /// read and released afterwards. An unconfigured sensor reads 0.
    pub fn new_thermistor_reading(&mut self) -> u32 {
        let Some(input) = self.input else {
            return 0;
        };

        self.drive_ampmod(true);
        // Filtering is done by the ADC
        let code = self.adc.read(input);
        self.drive_ampmod(false);

        trace!("pt100: adc {}", code);
        self.last_raw = code;
        code
    }

    /// Convert a raw code with the active calibration
    ///
    /// Codes of 0 or at/above the ADC's maximum mean an open or shorted
    /// probe and are invalid. Calibration results that are not finite are
    /// reported as invalid too.
    pub fn adc_value_to_temperature(&self, adc_value: u32) -> Temperature {
        if adc_value == 0 || adc_value >= self.adc.max_value() {
            return Temperature::Invalid;
        }
        Temperature::from_celsius(self.calibration.apply(adc_value))
    }

    /// Put an amp-mod pin in output mode and drive it active
    fn energize(&mut self, pin: PinSpec) -> Option<PinSpec> {
        let ready = self
            .gpio
            .as_output(pin)
            .and_then(|()| self.gpio.set(pin, pin.level(true)));
        match ready {
            Ok(()) => Some(pin),
            Err(e) => {
                warn!("pt100: amp-mod pin {}.{} unusable: {}", pin.port, pin.pin, e);
                None
            }
        }
    }

    fn drive_ampmod(&mut self, active: bool) {
        for pin in self.ampmod.into_iter().flatten() {
            if let Err(e) = self.gpio.set(pin, pin.level(active)) {
                warn!("pt100: amp-mod pin {}.{} set failed: {}", pin.port, pin.pin, e);
            }
        }
    }
}

impl<A, G, W> Pt100<A, G, W> {
    pub fn calibration(&self) -> Calibration {
        self.calibration
    }

    /// Replace the calibration at runtime
    ///
    /// Coefficients that are not finite are rejected and the current
    /// calibration stays in place.
    pub fn set_calibration(&mut self, calibration: Calibration) -> Result<(), CalibrationError> {
        if !calibration.is_finite() {
            return Err(CalibrationError::NotFinite);
        }
        self.calibration = calibration;
        Ok(())
    }

    pub fn is_config_valid(&self) -> bool {
        self.config_valid
    }

    /// Lowest valid temperature since the last reset
    pub fn min_temperature(&self) -> Option<f32> {
        self.extremes.min()
    }

    /// Highest valid temperature since the last reset
    pub fn max_temperature(&self) -> Option<f32> {
        self.extremes.max()
    }

    pub fn extremes(&self) -> Option<(f32, f32)> {
        self.extremes.range()
    }

    /// Last code returned by the ADC
    pub fn last_raw(&self) -> u32 {
        self.last_raw
    }

    pub fn input_pin(&self) -> Option<PinSpec> {
        self.input
    }

    /// Snapshot for status reporting
    pub fn status(&self) -> SensorStatus {
        SensorStatus {
            calibration: self.calibration,
            min_c: self.extremes.min(),
            max_c: self.extremes.max(),
            last_raw: self.last_raw,
            config_valid: self.config_valid,
        }
    }

    /// Diagnostic output
    pub fn output(&self) -> &W {
        &self.out
    }

    /// Give back the ports
    pub fn release(self) -> (A, G, W) {
        (self.adc, self.gpio, self.out)
    }
}

impl<A, G, W> TemperatureSensor for Pt100<A, G, W>
where
    A: AdcPort,
    G: GpioPort,
    W: Write,
{
    fn update_config<C: ConfigSource + ?Sized>(
        &mut self,
        source: &C,
        module: &str,
        instance: &str,
    ) -> Result<(), ConfigError> {
        Pt100::update_config(self, source, module, instance)
    }

    fn get_temperature(&mut self) -> Temperature {
        Pt100::get_temperature(self)
    }

    fn get_raw(&mut self) {
        Pt100::get_raw(self)
    }

    fn extremes(&self) -> Option<(f32, f32)> {
        Pt100::extremes(self)
    }
}
