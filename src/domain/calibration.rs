//! RTD calibration domain service
//!
//! Converts raw ADC codes to temperature in Celsius using either a linear
//! or a quadratic polynomial. Over the 150-350C span a 3D printer hotend
//! works in, any platinum RTD is close to linear, so the linear curve with
//! a tuned slope and y-intercept is usually enough. The quadratic curve
//! covers wider spans.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Calibration curve mapping an ADC code to degrees Celsius
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Calibration {
    /// `temperature = slope * adc + intercept`
    Linear { slope: f32, intercept: f32 },
    /// `temperature = a * adc^2 + b * adc + c`
    Quadratic { a: f32, b: f32, c: f32 },
}

impl Calibration {
    pub const DEFAULT_SLOPE: f32 = 0.025_760_487_5;
    pub const DEFAULT_INTERCEPT: f32 = -18.54;
    pub const DEFAULT_A: f32 = 0.000_000_174_674_754;
    pub const DEFAULT_B: f32 = 0.022_383;
    pub const DEFAULT_C: f32 = -4.006_48;

    /// Linear factory default, tuned for the PT100 in the UP! hotend
    pub const LINEAR_DEFAULT: Self = Self::linear(Self::DEFAULT_SLOPE, Self::DEFAULT_INTERCEPT);

    /// Quadratic factory default, fitted for the Cetus Mk3
    pub const QUADRATIC_DEFAULT: Self =
        Self::quadratic(Self::DEFAULT_A, Self::DEFAULT_B, Self::DEFAULT_C);

    /// Create a linear calibration
    pub const fn linear(slope: f32, intercept: f32) -> Self {
        Self::Linear { slope, intercept }
    }

    /// Create a quadratic calibration
    pub const fn quadratic(a: f32, b: f32, c: f32) -> Self {
        Self::Quadratic { a, b, c }
    }

    pub const fn is_linear(&self) -> bool {
        matches!(self, Self::Linear { .. })
    }

    /// True when every coefficient is a finite number
    pub fn is_finite(&self) -> bool {
        match *self {
            Self::Linear { slope, intercept } => slope.is_finite() && intercept.is_finite(),
            Self::Quadratic { a, b, c } => a.is_finite() && b.is_finite() && c.is_finite(),
        }
    }

    /// Evaluate the curve at `adc_value`
    ///
    /// No range check happens here; rejecting open or shorted readings is
    /// the sensor's job.
    #[inline]
    pub fn apply(&self, adc_value: u32) -> f32 {
        let x = adc_value as f32;
        match *self {
            Self::Linear { slope, intercept } => x * slope + intercept,
            Self::Quadratic { a, b, c } => a * x * x + b * x + c,
        }
    }

    /// Fit a linear calibration through two `(adc, temperature)` points
    pub fn from_two_points(p1: (u32, f32), p2: (u32, f32)) -> Result<Self, CalibrationError> {
        if p1.0 == p2.0 {
            return Err(CalibrationError::DegenerateInput);
        }

        let (x1, t1) = (p1.0 as f64, p1.1 as f64);
        let (x2, t2) = (p2.0 as f64, p2.1 as f64);

        let slope = (t2 - t1) / (x2 - x1);
        let intercept = t1 - slope * x1;

        Self::checked(Self::linear(slope as f32, intercept as f32))
    }

    /// Fit the quadratic passing exactly through three `(adc, temperature)` points
    ///
    /// The usual procedure is to swap the RTD for three precision resistors,
    /// note the raw code each one reads (`get_raw`), and look up the matching
    /// temperature in the RTD's resistance table. Work is done in `f64`: the
    /// squared codes exceed `f32`'s exact integer range.
    pub fn from_three_points(
        p1: (u32, f32),
        p2: (u32, f32),
        p3: (u32, f32),
    ) -> Result<Self, CalibrationError> {
        if p1.0 == p2.0 || p1.0 == p3.0 || p2.0 == p3.0 {
            return Err(CalibrationError::DegenerateInput);
        }

        // Rows of [x, t, x^2]
        let row = |(x, t): (u32, f32)| {
            let x = x as f64;
            [x, t as f64, x * x]
        };
        let r1 = row(p1);
        let mut r2 = row(p2);
        let mut r3 = row(p3);
        let last = r3;

        for i in 0..3 {
            r2[i] -= r1[i];
            r3[i] -= r1[i];
        }
        let reduced = r3;

        // Cancel the linear term between the two reduced rows
        let multiplier = r3[0] / r2[0];
        r2[1] *= multiplier;
        r2[2] *= multiplier;
        r3[1] -= r2[1];
        r3[2] -= r2[2];

        if r3[2] == 0.0 {
            return Err(CalibrationError::DegenerateInput);
        }

        let a = r3[1] / r3[2];
        let b = (reduced[1] - reduced[2] * a) / reduced[0];
        let c = last[1] - (last[2] * a + last[0] * b);

        Self::checked(Self::quadratic(a as f32, b as f32, c as f32))
    }

    fn checked(calibration: Self) -> Result<Self, CalibrationError> {
        if calibration.is_finite() {
            Ok(calibration)
        } else {
            Err(CalibrationError::NotFinite)
        }
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::LINEAR_DEFAULT
    }
}

/// Error returned when a calibration cannot be fitted or applied
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationError {
    /// Reference points share an ADC code, so the curve is underdetermined
    DegenerateInput,
    /// A coefficient came out as NaN or infinite
    NotFinite,
}

impl fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateInput => f.write_str("calibration points must have distinct ADC codes"),
            Self::NotFinite => f.write_str("calibration coefficient is not finite"),
        }
    }
}

impl core::error::Error for CalibrationError {}
