use crate::{
    capture::PulseCapture,
    error::{DecodeError, DhtError, ErrorKind},
    pulse::{self, Payload, Pulse},
    state::SensorState,
    temperature::SensorVariant,
};

/// Pulses the driver reserves for one capture.
///
/// Larger than a complete transaction so that overlong captures are
/// reported as overflows rather than truncated.
pub const CAPTURE_CAPACITY: usize = 64;

/// Driver for DHT22 sensors and their clones.
pub struct Dht22<C> {
    capture: C,
    variant: SensorVariant,
}

/// Reading returned by the DHT22 sensor.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reading {
    /// Temperature in degrees Celsius.
    pub temperature: f32,
    /// Relative humidity in percent.
    pub relative_humidity: f32,
    /// Payload the values were decoded from.
    pub raw: Payload,
}

impl Reading {
    /// Assembles a reading from a verified payload.
    pub fn from_payload(payload: Payload, variant: SensorVariant) -> Self {
        Reading {
            temperature: variant.interpret(payload.temperature_raw()),
            relative_humidity: payload.humidity(),
            raw: payload,
        }
    }

    /// Always [`ErrorKind::Ok`]; failed reads are reported through [`DhtError`].
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::Ok
    }
}

impl<C> Dht22<C>
where
    C: PulseCapture,
{
    /// Creates a new instance of the DHT22 driver.
    ///
    /// # Arguments
    ///
    /// * `capture` - Source of pulse trains from the sensor's data line.
    /// * `variant` - How the sensor encodes negative temperatures. Use
    ///   [`SensorVariant::Auto`] when unknown.
    pub fn new(capture: C, variant: SensorVariant) -> Self {
        Dht22 { capture, variant }
    }

    pub fn variant(&self) -> SensorVariant {
        self.variant
    }

    /// Returns the capture source.
    pub fn release(self) -> C {
        self.capture
    }

    /// Reads a temperature and humidity measurement from the sensor.
    ///
    /// Captures one transaction and decodes it. Nothing is retried; call
    /// again after the sensor's ~2 s cooldown on failure.
    ///
    /// # Returns
    ///
    /// * `Ok(Reading)` if the read is successful and the checksum is valid.
    /// * `Err(DhtError)` on the first failure encountered.
    pub fn read(&mut self) -> Result<Reading, DhtError<C::Error>> {
        let result = self.acquire();

        #[cfg(feature = "defmt")]
        match &result {
            Ok(reading) => defmt::debug!("DHT22 read: {}", reading),
            Err(err) => defmt::warn!("DHT22 read failed: {}", err.kind()),
        }

        result
    }

    /// Like [`read`](Self::read), also recording the outcome in `state`.
    pub fn read_with(&mut self, state: &mut SensorState) -> Result<Reading, DhtError<C::Error>> {
        let result = self.read();
        state.record(&result);
        result
    }

    fn acquire(&mut self) -> Result<Reading, DhtError<C::Error>> {
        let mut buffer = [Pulse::default(); CAPTURE_CAPACITY];

        let len = self
            .capture
            .capture(&mut buffer)
            .map_err(DhtError::Driver)?
            .ok_or(DhtError::Timeout)?;

        Ok(self.decode(&buffer[..len.min(CAPTURE_CAPACITY)])?)
    }

    /// Decodes a captured pulse train without touching the sensor.
    pub fn decode(&self, train: &[Pulse]) -> Result<Reading, DecodeError> {
        let payload = pulse::decode_payload(train)?;
        Ok(Reading::from_payload(payload, self.variant))
    }
}
