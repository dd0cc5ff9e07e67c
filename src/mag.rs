//! Magnetometer Sample Types
//!
//! The magnetometer measures the magnetic field at a point in space along
//! three axes. Readings come off the bus as raw signed 12-bit counts packed
//! into 16-bit registers; [`MagSample`] pairs those counts with the
//! physically scaled values produced by the acquisition pipeline.

use crate::conversion::ConversionMode;

/// Smallest raw axis value the sensor can meaningfully report.
pub const MIN_VALID_READING: i16 = -2048; // 0xF800
/// Largest raw axis value the sensor can meaningfully report.
pub const MAX_VALID_READING: i16 = 2047; // 0x07FF

/// Raw magnetic field readings vector, one signed count per axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "postcard-experimental", derive(postcard::experimental::max_size::MaxSize))]
pub struct Mag {
    pub(crate) x: i16,
    pub(crate) y: i16,
    pub(crate) z: i16,
}

impl Mag {
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    pub const fn x(&self) -> i16 {
        self.x
    }

    pub const fn y(&self) -> i16 {
        self.y
    }

    pub const fn z(&self) -> i16 {
        self.z
    }

    /// Whether every axis lies inside the sensor's output range
    /// [-2048, 2047]. Values outside that window indicate a corrupt
    /// transfer or a saturated sensor, never a real field.
    pub const fn is_in_range(&self) -> bool {
        self.x >= MIN_VALID_READING
            && self.x <= MAX_VALID_READING
            && self.y >= MIN_VALID_READING
            && self.y <= MAX_VALID_READING
            && self.z >= MIN_VALID_READING
            && self.z <= MAX_VALID_READING
    }
}

/// One conditioned acquisition: the raw counts plus their converted
/// physical values and a derived validity flag.
///
/// Samples are produced only by the acquisition pipeline; the validity
/// flag is always computed from the raw counts, never set by a caller.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MagSample {
    raw: Mag,
    x: f32,
    y: f32,
    z: f32,
    mode: ConversionMode,
    valid: bool,
}

impl MagSample {
    /// Convert and validate a conditioned raw reading.
    ///
    /// [`ConversionMode::None`] skips scaling entirely; the converted
    /// fields then carry the raw counts unchanged.
    pub(crate) fn from_raw(raw: Mag, mode: ConversionMode) -> Self {
        let (x, y, z) = match mode.factor() {
            Some(factor) => (
                raw.x as f32 * factor,
                raw.y as f32 * factor,
                raw.z as f32 * factor,
            ),
            None => (raw.x as f32, raw.y as f32, raw.z as f32),
        };
        Self {
            raw,
            x,
            y,
            z,
            mode,
            valid: raw.is_in_range(),
        }
    }

    pub const fn raw(&self) -> Mag {
        self.raw
    }

    /// Converted X-axis value in the units selected by [`Self::mode`].
    pub const fn x(&self) -> f32 {
        self.x
    }

    pub const fn y(&self) -> f32 {
        self.y
    }

    pub const fn z(&self) -> f32 {
        self.z
    }

    pub const fn mode(&self) -> ConversionMode {
        self.mode
    }

    pub const fn is_valid(&self) -> bool {
        self.valid
    }
}
