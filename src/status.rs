//! Sensor status snapshot
//!
//! A compact summary of one sensor that the firmware can ship to a host
//! over a serial link. Frames are serialized using `postcard` with COBS
//! encoding, so a `0x00` byte terminates every frame.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::Calibration;

/// Upper bound on an encoded [`SensorStatus`] frame, COBS overhead and
/// terminator included
pub const MAX_STATUS_FRAME: usize = 40;

/// Point-in-time state of a PT100 sensor
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorStatus {
    /// Active calibration curve
    pub calibration: Calibration,
    /// Lowest valid reading since the last reset
    pub min_c: Option<f32>,
    /// Highest valid reading since the last reset
    pub max_c: Option<f32>,
    /// Last code returned by the ADC
    pub last_raw: u32,
    /// False once a bad configuration disabled the sensor
    pub config_valid: bool,
}

impl SensorStatus {
    /// Encode into `buf` as one COBS frame, returning the used part
    pub fn encode<'b>(&self, buf: &'b mut [u8]) -> Result<&'b mut [u8], StatusError> {
        postcard::to_slice_cobs(self, buf).map_err(|e| match e {
            postcard::Error::SerializeBufferFull => StatusError::BufferTooSmall,
            _ => StatusError::InvalidFrame,
        })
    }

    /// Decode one COBS frame; the frame is decoded in place
    pub fn decode(frame: &mut [u8]) -> Result<Self, StatusError> {
        postcard::from_bytes_cobs(frame).map_err(|_| StatusError::InvalidFrame)
    }
}

/// Error type for status framing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusError {
    /// Output buffer cannot hold the encoded frame
    BufferTooSmall,
    /// Frame is not valid COBS or does not decode to a status
    InvalidFrame,
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferTooSmall => f.write_str("status buffer too small"),
            Self::InvalidFrame => f.write_str("invalid status frame"),
        }
    }
}

impl core::error::Error for StatusError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn status() -> SensorStatus {
        SensorStatus {
            calibration: Calibration::QUADRATIC_DEFAULT,
            min_c: Some(21.5),
            max_c: Some(240.25),
            last_raw: 65_535,
            config_valid: true,
        }
    }

    #[test]
    fn test_frame_is_terminated_and_decodes() {
        let mut buf = [0u8; MAX_STATUS_FRAME];
        let frame = status().encode(&mut buf).unwrap();

        assert_eq!(frame.last(), Some(&0));
        assert!(!frame[..frame.len() - 1].contains(&0));
        assert_eq!(SensorStatus::decode(frame), Ok(status()));
    }

    #[test]
    fn test_buffer_too_small() {
        let mut buf = [0u8; 4];
        assert_eq!(status().encode(&mut buf), Err(StatusError::BufferTooSmall));
    }

    #[test]
    fn test_garbage_frame() {
        let mut frame = [0x01, 0x00];
        assert_eq!(SensorStatus::decode(&mut frame), Err(StatusError::InvalidFrame));
    }
}
