use crate::{dht22::Reading, error::DhtError, error::ErrorKind};

/// Outcome of the most recent reads, kept by the caller.
///
/// The temperature, humidity and last reading always come from the same
/// successful read (or are all unset). The last error follows every read
/// that is recorded, so a failed read leaves the previous good values in
/// place while reporting why it failed.
///
/// A single `SensorState` must not be updated from several reads at once;
/// wrap it in a mutex if reads run concurrently.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SensorState {
    last_error: ErrorKind,
    last_reading: Option<Reading>,
}

impl SensorState {
    pub const fn new() -> Self {
        SensorState {
            last_error: ErrorKind::Ok,
            last_reading: None,
        }
    }

    /// Updates the state from the result of a read.
    pub fn record<E>(&mut self, result: &Result<Reading, DhtError<E>>) {
        match result {
            Ok(reading) => {
                self.last_error = ErrorKind::Ok;
                self.last_reading = Some(*reading);
            }
            Err(err) => self.last_error = err.kind(),
        }
    }

    /// Outcome of the most recently recorded read.
    pub const fn last_error(&self) -> ErrorKind {
        self.last_error
    }

    /// Most recent successful reading.
    pub const fn last_reading(&self) -> Option<Reading> {
        self.last_reading
    }

    /// Temperature of the most recent successful reading, or `0.0`.
    pub fn temperature(&self) -> f32 {
        self.last_reading.map_or(0.0, |r| r.temperature)
    }

    /// Humidity of the most recent successful reading, or `0.0`.
    pub fn relative_humidity(&self) -> f32 {
        self.last_reading.map_or(0.0, |r| r.relative_humidity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use crate::pulse::Payload;

    fn reading() -> Reading {
        Reading {
            temperature: 24.6,
            relative_humidity: 40.0,
            raw: Payload::new([0x01, 0x90, 0x00, 0xF6, 0x87]),
        }
    }

    #[test]
    fn test_initial_state() {
        let state = SensorState::new();

        assert_eq!(state, SensorState::default());
        assert_eq!(state.last_error(), ErrorKind::Ok);
        assert_eq!(state.last_reading(), None);
        assert_eq!(state.temperature(), 0.0);
        assert_eq!(state.relative_humidity(), 0.0);
    }

    #[test]
    fn test_failure_keeps_last_good_values() {
        let mut state = SensorState::new();

        state.record::<()>(&Ok(reading()));
        assert_eq!(state.temperature(), 24.6);
        assert_eq!(state.relative_humidity(), 40.0);

        state.record::<()>(&Err(DhtError::Timeout));
        assert_eq!(state.last_error(), ErrorKind::Timeout);
        assert_eq!(state.last_reading(), Some(reading()));

        let raw = Payload::new([0; 5]);
        state.record::<()>(&Err(DecodeError::BadData { raw }.into()));
        assert_eq!(state.last_error(), ErrorKind::BadData);
        assert_eq!(state.temperature(), 24.6);

        state.record::<()>(&Ok(reading()));
        assert_eq!(state.last_error(), ErrorKind::Ok);
    }
}
