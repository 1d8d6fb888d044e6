use core::fmt;

use crate::pulse::Payload;

/// Fieldless error classification with stable numeric codes.
///
/// `Ok` is included so the last outcome of a read can be stored and
/// reported uniformly.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorKind {
    /// Successful decode.
    #[default]
    Ok = 0,
    /// The capture mechanism failed to initialize or start.
    Driver = 1,
    /// No capture result within the wait bound.
    Timeout = 2,
    /// Acknowledgment pulse duration out of range.
    Nack = 3,
    /// One or more payload pulses outside the valid timing range.
    BadData = 4,
    /// Payload integrity byte mismatch.
    Checksum = 5,
    /// Fewer pulses captured than the protocol requires.
    Underflow = 6,
    /// More pulses captured than the protocol allows.
    Overflow = 7,
}

impl ErrorKind {
    /// Looks up a kind by its numeric code.
    pub const fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0 => Self::Ok,
            1 => Self::Driver,
            2 => Self::Timeout,
            3 => Self::Nack,
            4 => Self::BadData,
            5 => Self::Checksum,
            6 => Self::Underflow,
            7 => Self::Overflow,
            _ => return None,
        })
    }

    /// Numeric code of this kind.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Fixed human-readable description.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Driver => "RMT driver error",
            Self::Timeout => "Sensor timeout",
            Self::Nack => "Invalid ACK",
            Self::BadData => "Bad data pulse",
            Self::Checksum => "Checksum error",
            Self::Underflow => "Too few bits",
            Self::Overflow => "Too many bits",
        }
    }

    /// Describes a raw error code, including codes this crate never produces.
    pub const fn describe(code: u8) -> &'static str {
        match Self::from_code(code) {
            Some(kind) => kind.as_str(),
            None => "Unknown error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures detected while decoding a captured pulse train.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// The acknowledgment pulse was malformed or absent.
    Nack,
    /// Too few pulses were captured.
    Underflow,
    /// Too many pulses were captured.
    Overflow,
    /// At least one payload pulse had an invalid duration.
    BadData {
        /// Payload as decoded from the remaining valid pulses.
        raw: Payload,
    },
    /// Checksum did not match the received data.
    Checksum {
        /// Payload as received.
        raw: Payload,
    },
}

impl DecodeError {
    /// Classification of this failure.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Nack => ErrorKind::Nack,
            Self::Underflow => ErrorKind::Underflow,
            Self::Overflow => ErrorKind::Overflow,
            Self::BadData { .. } => ErrorKind::BadData,
            Self::Checksum { .. } => ErrorKind::Checksum,
        }
    }

    /// The payload decoded before the failure, if decoding got that far.
    pub const fn raw(&self) -> Option<Payload> {
        match self {
            Self::BadData { raw } | Self::Checksum { raw } => Some(*raw),
            _ => None,
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind().as_str())
    }
}

impl core::error::Error for DecodeError {}

/// Possible errors from a DHT22 read.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, PartialEq, Eq)]
pub enum DhtError<E> {
    /// Error from the pulse capture mechanism.
    Driver(E),
    /// Timed out waiting for the sensor to respond.
    Timeout,
    /// The captured pulse train could not be decoded.
    Decode(DecodeError),
}

impl<E> DhtError<E> {
    /// Classification of this failure.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Driver(_) => ErrorKind::Driver,
            Self::Timeout => ErrorKind::Timeout,
            Self::Decode(err) => err.kind(),
        }
    }

    /// The payload decoded before the failure, if any.
    pub const fn raw(&self) -> Option<Payload> {
        match self {
            Self::Decode(err) => err.raw(),
            _ => None,
        }
    }
}

impl<E> From<DecodeError> for DhtError<E> {
    fn from(value: DecodeError) -> Self {
        Self::Decode(value)
    }
}

impl<E> fmt::Display for DhtError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind().as_str())
    }
}

impl<E: fmt::Debug> core::error::Error for DhtError<E> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip_through_lookup() {
        for code in 0..=7 {
            let kind = ErrorKind::from_code(code).unwrap();
            assert_eq!(kind.code(), code);
        }
        assert_eq!(ErrorKind::from_code(8), None);
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(ErrorKind::Ok.as_str(), "OK");
        assert_eq!(ErrorKind::Driver.as_str(), "RMT driver error");
        assert_eq!(ErrorKind::Timeout.as_str(), "Sensor timeout");
        assert_eq!(ErrorKind::Nack.as_str(), "Invalid ACK");
        assert_eq!(ErrorKind::BadData.as_str(), "Bad data pulse");
        assert_eq!(ErrorKind::Checksum.as_str(), "Checksum error");
        assert_eq!(ErrorKind::Underflow.as_str(), "Too few bits");
        assert_eq!(ErrorKind::Overflow.as_str(), "Too many bits");
        assert_eq!(ErrorKind::describe(200), "Unknown error");
        assert_eq!(ErrorKind::describe(5), "Checksum error");
    }

    #[test]
    fn test_dht_error_carries_payload() {
        let raw = Payload::new([1, 2, 3, 4, 0]);
        let err: DhtError<()> = DecodeError::Checksum { raw }.into();

        assert_eq!(err.kind(), ErrorKind::Checksum);
        assert_eq!(err.raw(), Some(raw));
        assert_eq!(DhtError::<()>::Timeout.raw(), None);
        assert_eq!(DhtError::Driver(()).kind(), ErrorKind::Driver);
    }

    #[test]
    fn test_display_uses_description() {
        let err: DhtError<()> = DecodeError::Nack.into();
        assert_eq!(format!("{err}"), "Invalid ACK");
    }
}
