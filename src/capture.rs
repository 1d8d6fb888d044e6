use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
};

use crate::pulse::Pulse;

/// Maximum time to wait (in microseconds) for the sensor to answer the start signal.
pub const RESPONSE_TIMEOUT_US: u32 = 100;

/// A level held longer than this (in microseconds) means the line went idle.
pub const IDLE_THRESHOLD_US: u32 = 150;

/// Duration (in milliseconds) the start signal holds the line low.
pub const START_SIGNAL_MS: u32 = 2;

/// Source of captured pulse trains.
///
/// Implementations send the start signal, record the sensor's response and
/// must bound their own wait so that a silent sensor cannot block forever.
pub trait PulseCapture {
    /// Error raised when the capture mechanism itself fails.
    type Error;

    /// Runs one transaction, writing the captured pulses into `buffer`.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(n))` when `n` pulses were captured
    /// * `Ok(None)` when the sensor did not respond in time
    /// * `Err(_)` when the capture mechanism failed
    fn capture(&mut self, buffer: &mut [Pulse]) -> Result<Option<usize>, Self::Error>;
}

impl<T: PulseCapture + ?Sized> PulseCapture for &mut T {
    type Error = T::Error;

    fn capture(&mut self, buffer: &mut [Pulse]) -> Result<Option<usize>, Self::Error> {
        T::capture(self, buffer)
    }
}

/// Bit-banged capture that times the data line by polling a GPIO pin.
///
/// Intended for targets without a pulse-capture peripheral. Durations are
/// counted in 1 µs delay steps, so they undershoot on slow cores.
pub struct PolledCapture<PIN, D> {
    pin: PIN,
    delay: D,
}

impl<PIN, DELAY, E> PolledCapture<PIN, DELAY>
where
    PIN: InputPin<Error = E> + OutputPin<Error = E>,
    DELAY: DelayNs,
{
    /// Creates a new polled capture.
    ///
    /// # Arguments
    ///
    /// * `pin` - The open-drain GPIO pin connected to the DHT22 data line.
    /// * `delay` - A delay provider implementing the `DelayNs` trait.
    pub fn new(pin: PIN, delay: DELAY) -> Self {
        PolledCapture { pin, delay }
    }

    /// Returns the pin and delay provider.
    pub fn release(self) -> (PIN, DELAY) {
        (self.pin, self.delay)
    }

    /// Pulls the line low for [`START_SIGNAL_MS`], then releases it.
    fn start(&mut self) -> Result<(), E> {
        self.pin.set_low()?;
        self.delay.delay_ms(START_SIGNAL_MS);
        self.pin.set_high()?;
        Ok(())
    }

    /// Counts how long the line stays at `high`.
    ///
    /// Returns `None` if the level outlasts `limit_us`.
    fn measure(&mut self, high: bool, limit_us: u32) -> Result<Option<u16>, E> {
        let mut elapsed: u32 = 0;
        while self.pin.is_high()? == high {
            if elapsed >= limit_us {
                return Ok(None);
            }
            self.delay.delay_us(1);
            elapsed += 1;
        }
        Ok(Some(elapsed as u16))
    }
}

impl<PIN, DELAY, E> PulseCapture for PolledCapture<PIN, DELAY>
where
    PIN: InputPin<Error = E> + OutputPin<Error = E>,
    DELAY: DelayNs,
{
    type Error = E;

    fn capture(&mut self, buffer: &mut [Pulse]) -> Result<Option<usize>, E> {
        self.start()?;

        // Sensor pulls the line low 20-40us after release
        if self.measure(true, RESPONSE_TIMEOUT_US)?.is_none() {
            return Ok(None);
        }

        let mut count = 0;
        while count < buffer.len() {
            let Some(low) = self.measure(false, IDLE_THRESHOLD_US)? else {
                break;
            };
            let high = self.measure(true, IDLE_THRESHOLD_US)?;

            buffer[count] = Pulse::new(low, high.unwrap_or(0));
            count += 1;

            if high.is_none() {
                break;
            }
        }

        Ok(Some(count))
    }
}
