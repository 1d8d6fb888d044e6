//! Interpretation of the 16-bit temperature field.
//!
//! Original AM2302 parts transmit negative temperatures in sign-magnitude
//! form (bit 15 set, bits 14-0 the magnitude). Many clones transmit them
//! as two's complement instead. Positive readings look the same either way.

/// Coldest temperature the sensor can report, in °C.
pub const MIN_TEMPERATURE: f32 = -40.0;

/// How the sensor encodes negative temperatures.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SensorVariant {
    /// Two's-complement signed 16-bit value.
    Clone,
    /// Bit 15 is the sign, bits 14-0 the magnitude.
    Original,
    /// Unknown; each reading is resolved by plausibility.
    #[default]
    Auto,
}

impl SensorVariant {
    /// Converts the raw big-endian temperature field into °C.
    pub fn interpret(self, raw: u16) -> f32 {
        match self {
            SensorVariant::Clone => twos_complement(raw),
            SensorVariant::Original => sign_magnitude(raw),
            SensorVariant::Auto => auto_detect(raw),
        }
    }
}

fn twos_complement(raw: u16) -> f32 {
    raw as i16 as f32 / 10.0
}

fn sign_magnitude(raw: u16) -> f32 {
    let magnitude = (raw & 0x7FFF) as f32 / 10.0;
    if raw & 0x8000 != 0 { -magnitude } else { magnitude }
}

fn auto_detect(raw: u16) -> f32 {
    let [hi, _] = raw.to_be_bytes();

    // 0xFF.. in sign-magnitude would be below -3276 °C, so it can only be
    // a clone encoding a small negative value.
    if hi == 0xFF {
        return twos_complement(raw);
    }

    if raw & 0x8000 != 0 {
        let temperature = sign_magnitude(raw);
        if temperature >= MIN_TEMPERATURE {
            return temperature;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "sign-magnitude {=u16:#x} out of range, using two's complement",
            raw
        );
        return twos_complement(raw);
    }

    raw as f32 / 10.0
}
