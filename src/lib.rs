//! DHT22 Pulse Decoder for Embedded Rust
//!
//! This crate decodes the single-wire protocol of the DHT22 (AM2302)
//! temperature and humidity sensor from captured pulse durations, and
//! copes with the two incompatible ways sensors in the family encode
//! negative temperatures.
//!
//! # Features
//! - Pure, deterministic decoding of captured pulse trains
//! - Sign-magnitude (original), two's-complement (clone) and auto-detected
//!   temperature encodings via [`SensorVariant`]
//! - Pluggable capture through the [`PulseCapture`] trait, with a polled
//!   GPIO implementation built on `embedded-hal`
//! - Caller-owned [`SensorState`] holding the last good reading
//! - Designed for `no_std` environments
//! - Optional logging support via `defmt`
//!
//! # Example
//!
//! ```ignore
//! let capture = PolledCapture::new(pin, delay);
//! let mut dht = Dht22::new(capture, SensorVariant::Auto);
//! let mut state = SensorState::new();
//!
//! match dht.read_with(&mut state) {
//!     Ok(reading) => { /* use reading.temperature, reading.relative_humidity */ }
//!     Err(err) => { /* err.kind().as_str(), err.raw() */ }
//! }
//! ```
//!
//! # Optional Features
//! - `defmt`: Implements `defmt::Format` for logging support and logs reads
//!
//! [`PulseCapture`]: capture::PulseCapture

#![cfg_attr(not(test), no_std)]

pub mod capture;
pub mod dht22;
pub mod error;
pub mod pulse;
pub mod state;
pub mod temperature;

pub use capture::{PolledCapture, PulseCapture};
pub use dht22::{Dht22, Reading};
pub use error::{DecodeError, DhtError, ErrorKind};
pub use pulse::{Payload, Pulse};
pub use state::SensorState;
pub use temperature::SensorVariant;
