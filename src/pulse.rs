//! Pulse train validation and payload decoding.
//!
//! A transaction captured from the data line is a sequence of [`Pulse`]s,
//! each a low segment followed by a high segment. The first pulse is the
//! sensor's acknowledgment (~80 µs low + ~80 µs high), the next 40 carry
//! one payload bit each (~50 µs low + ~26 µs high for `0`, ~70 µs high for
//! `1`), and a trailing line-release pulse may follow.

use crate::error::DecodeError;

/// Number of payload bits in one transaction.
pub const PAYLOAD_BITS: usize = 40;

/// Fewest pulses a complete transaction produces (ack + 40 bits).
pub const MIN_PULSES: usize = PAYLOAD_BITS + 1;

/// Most pulses a complete transaction produces (ack + 40 bits + release).
pub const MAX_PULSES: usize = PAYLOAD_BITS + 2;

/// Accepted combined duration of the acknowledgment pulse, in µs (inclusive).
pub const ACK_RANGE_US: (u32, u32) = (130, 180);

/// Accepted combined duration of a payload pulse, in µs (exclusive).
pub const BIT_RANGE_US: (u32, u32) = (55, 145);

/// Payload pulses longer than this, in µs, encode a `1`.
pub const BIT_ONE_THRESHOLD_US: u32 = 110;

/// One low-then-high segment of the waveform, in microseconds.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pulse {
    /// Time the line was held low.
    pub low: u16,
    /// Time the line was high afterwards.
    pub high: u16,
}

impl Pulse {
    pub const fn new(low: u16, high: u16) -> Self {
        Pulse { low, high }
    }

    /// Combined low + high duration.
    pub const fn duration(&self) -> u32 {
        self.low as u32 + self.high as u32
    }
}

/// The 5-byte payload of a transaction.
///
/// Bytes 0-1 are humidity, bytes 2-3 temperature (both big-endian) and
/// byte 4 the checksum.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Payload([u8; 5]);

impl Payload {
    pub const fn new(bytes: [u8; 5]) -> Self {
        Payload(bytes)
    }

    pub const fn bytes(&self) -> [u8; 5] {
        self.0
    }

    pub const fn humidity_raw(&self) -> u16 {
        u16::from_be_bytes([self.0[0], self.0[1]])
    }

    pub const fn temperature_raw(&self) -> u16 {
        u16::from_be_bytes([self.0[2], self.0[3]])
    }

    /// The checksum byte as transmitted.
    pub const fn checksum(&self) -> u8 {
        self.0[4]
    }

    /// Sum of the four data bytes, modulo 256.
    pub fn expected_checksum(&self) -> u8 {
        self.0[..4].iter().fold(0u8, |sum, v| sum.wrapping_add(*v))
    }

    /// Relative humidity in percent. Always unsigned.
    pub fn humidity(&self) -> f32 {
        self.humidity_raw() as f32 / 10.0
    }
}

/// Checks the pulse count and acknowledgment pulse.
///
/// Returns the 40 payload pulses; a trailing release pulse is dropped.
pub fn validate(train: &[Pulse]) -> Result<&[Pulse], DecodeError> {
    if train.len() < MIN_PULSES {
        return Err(DecodeError::Underflow);
    }
    if train.len() > MAX_PULSES {
        return Err(DecodeError::Overflow);
    }

    let ack = train[0].duration();
    if !(ACK_RANGE_US.0..=ACK_RANGE_US.1).contains(&ack) {
        return Err(DecodeError::Nack);
    }

    Ok(&train[1..=PAYLOAD_BITS])
}

/// Packs payload pulses MSB-first into bytes.
///
/// Every pulse is visited even after an invalid one is found, so the
/// returned payload is always complete. An invalid pulse contributes no
/// bit to its byte, and the returned flag stays `true` once set.
pub fn decode_bits(pulses: &[Pulse]) -> (Payload, bool) {
    let (bytes, bad) = pulses.iter().take(PAYLOAD_BITS).enumerate().fold(
        ([0u8; 5], false),
        |(mut bytes, bad), (i, pulse)| {
            let duration = pulse.duration();
            if duration > BIT_RANGE_US.0 && duration < BIT_RANGE_US.1 {
                let byte = &mut bytes[i / 8];
                *byte = (*byte << 1) | u8::from(duration > BIT_ONE_THRESHOLD_US);
                (bytes, bad)
            } else {
                (bytes, true)
            }
        },
    );

    (Payload(bytes), bad)
}

/// Fails with [`DecodeError::Checksum`] unless byte 4 is the sum of bytes 0-3.
pub fn verify(payload: Payload) -> Result<Payload, DecodeError> {
    if payload.checksum() != payload.expected_checksum() {
        Err(DecodeError::Checksum { raw: payload })
    } else {
        Ok(payload)
    }
}

/// Runs validation, bit decoding and checksum verification over a train.
pub fn decode_payload(train: &[Pulse]) -> Result<Payload, DecodeError> {
    let pulses = validate(train)?;

    let (payload, bad) = decode_bits(pulses);
    if bad {
        return Err(DecodeError::BadData { raw: payload });
    }

    verify(payload)
}
