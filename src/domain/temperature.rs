//! Temperature value and running extremes
//!
//! A reading is either a Celsius value or `Invalid`. Invalid readings come
//! from open or shorted probes and from sensors with a bad configuration;
//! keeping them out of band stops them from leaking into arithmetic.

use core::fmt;

/// Result of one temperature conversion
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Temperature {
    /// Converted temperature in degrees Celsius
    Celsius(f32),
    /// No usable temperature
    Invalid,
}

impl Temperature {
    /// Wrap a computed value, mapping NaN and infinities to `Invalid`
    pub fn from_celsius(value: f32) -> Self {
        if value.is_finite() {
            Self::Celsius(value)
        } else {
            Self::Invalid
        }
    }

    pub const fn celsius(self) -> Option<f32> {
        match self {
            Self::Celsius(t) => Some(t),
            Self::Invalid => None,
        }
    }

    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Celsius(_))
    }
}

/// Console representation; invalid readings print as `inf`
impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Celsius(t) => write!(f, "{:.6}", t),
            Self::Invalid => f.write_str("inf"),
        }
    }
}

/// Running minimum and maximum of observed temperatures
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Extremes {
    min: f32,
    max: f32,
}

impl Extremes {
    /// Empty tracker; the first observation sets both ends
    pub const fn new() -> Self {
        Self {
            min: f32::INFINITY,
            max: f32::NEG_INFINITY,
        }
    }

    /// Widen the range to include `value`
    pub fn observe(&mut self, value: f32) {
        if value > self.max {
            self.max = value;
        }
        if value < self.min {
            self.min = value;
        }
    }

    /// Collapse the range onto a single value
    pub fn reset_to(&mut self, value: f32) {
        self.min = value;
        self.max = value;
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// `(min, max)`, or `None` if nothing has been observed since the last reset
    pub fn range(&self) -> Option<(f32, f32)> {
        if self.min <= self.max {
            Some((self.min, self.max))
        } else {
            None
        }
    }

    pub fn min(&self) -> Option<f32> {
        self.range().map(|(min, _)| min)
    }

    pub fn max(&self) -> Option<f32> {
        self.range().map(|(_, max)| max)
    }
}

impl Default for Extremes {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_celsius_rejects_non_finite() {
        assert_eq!(Temperature::from_celsius(21.5), Temperature::Celsius(21.5));
        assert_eq!(Temperature::from_celsius(f32::INFINITY), Temperature::Invalid);
        assert_eq!(Temperature::from_celsius(f32::NAN), Temperature::Invalid);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Temperature::Celsius(210.5)), "210.500000");
        assert_eq!(format!("{}", Temperature::Invalid), "inf");
    }

    #[test]
    fn test_first_observation_sets_both_ends() {
        let mut extremes = Extremes::new();
        assert_eq!(extremes.range(), None);

        extremes.observe(42.0);
        assert_eq!(extremes.range(), Some((42.0, 42.0)));
    }

    #[test]
    fn test_min_never_exceeds_max() {
        let mut extremes = Extremes::new();
        for t in [200.0, 180.5, 215.25, -3.0, 199.0] {
            extremes.observe(t);
            let (min, max) = extremes.range().unwrap();
            assert!(min <= max);
        }
        assert_eq!(extremes.range(), Some((-3.0, 215.25)));
    }

    #[test]
    fn test_reset_and_clear() {
        let mut extremes = Extremes::new();
        extremes.observe(10.0);
        extremes.observe(90.0);

        extremes.reset_to(55.0);
        assert_eq!(extremes.min(), Some(55.0));
        assert_eq!(extremes.max(), Some(55.0));

        extremes.clear();
        assert_eq!(extremes.range(), None);
    }
}
