//! Calibration Sample Accumulation
//!
//! Per-axis scale corrections are computed offline from a window of recent
//! raw readings. This module only gathers that window: a fixed ring of the
//! last 15 readings per axis, started after a short settling period so that
//! samples taken while the sensor stabilizes after power-up or a mode change
//! never enter the window. The scale-factor computation itself happens in
//! the ground-side tooling and is out of scope here.

use crate::mag::Mag;

/// Readings retained per axis.
pub const CALIBRATION_SAMPLES: usize = 15;

/// Readings discarded after power-up or a mode change before any are kept.
pub const SETTLING_SAMPLES: u32 = 5;

/// Expected raw X reading under self-test excitation
/// (1.16 gauss nominal bias field at 1370 LSB/gauss).
pub const SELF_TEST_NOMINAL_X: i16 = 1589;
/// Expected raw Y reading under self-test excitation.
pub const SELF_TEST_NOMINAL_Y: i16 = 1589;
/// Expected raw Z reading under self-test excitation
/// (1.08 gauss nominal bias field at 1370 LSB/gauss).
pub const SELF_TEST_NOMINAL_Z: i16 = 1479;

/// Per-axis scale corrections derived offline from an accumulated window.
///
/// The driver only stores these; applying them to readings is the
/// consumer's job.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct CalibrationFactors {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Default for CalibrationFactors {
    /// Unity factors: readings pass through unscaled.
    fn default() -> Self {
        Self {
            x: 1.0,
            y: 1.0,
            z: 1.0,
        }
    }
}

/// How the sensor is excited while samples accumulate.
///
/// Self-test enables the sensor's internal bias coil so observed readings
/// can be compared against the nominal constants above; the comparison is
/// made by the consumer, not here.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum OperationMode {
    Normal,
    SelfTest,
}

/// Ring accumulator of recent raw readings, one lane per axis.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct CalibrationAccumulator {
    samples_x: [i16; CALIBRATION_SAMPLES],
    samples_y: [i16; CALIBRATION_SAMPLES],
    samples_z: [i16; CALIBRATION_SAMPLES],
    write_index: u8,
    samples_seen: u32,
    mode: OperationMode,
}

impl CalibrationAccumulator {
    pub const fn new() -> Self {
        Self {
            samples_x: [0; CALIBRATION_SAMPLES],
            samples_y: [0; CALIBRATION_SAMPLES],
            samples_z: [0; CALIBRATION_SAMPLES],
            write_index: 0,
            samples_seen: 0,
            mode: OperationMode::Normal,
        }
    }

    /// Feed one raw reading into the window.
    ///
    /// The first [`SETTLING_SAMPLES`] readings are counted but not stored;
    /// after that the window wraps, overwriting the oldest entry.
    pub fn record(&mut self, cur: Mag) {
        self.samples_seen += 1;
        if self.samples_seen <= SETTLING_SAMPLES {
            return;
        }
        let index = self.write_index as usize;
        self.samples_x[index] = cur.x();
        self.samples_y[index] = cur.y();
        self.samples_z[index] = cur.z();
        self.write_index = (self.write_index + 1) % CALIBRATION_SAMPLES as u8;
    }

    /// X-axis window, in ring order; entries past [`Self::stored`] are
    /// untouched zeros until the window fills.
    pub const fn samples_x(&self) -> &[i16; CALIBRATION_SAMPLES] {
        &self.samples_x
    }

    pub const fn samples_y(&self) -> &[i16; CALIBRATION_SAMPLES] {
        &self.samples_y
    }

    pub const fn samples_z(&self) -> &[i16; CALIBRATION_SAMPLES] {
        &self.samples_z
    }

    /// Total readings fed in, including discarded settling readings.
    pub const fn samples_seen(&self) -> u32 {
        self.samples_seen
    }

    /// Number of valid entries currently in the window.
    pub fn stored(&self) -> usize {
        let kept = self.samples_seen.saturating_sub(SETTLING_SAMPLES);
        kept.min(CALIBRATION_SAMPLES as u32) as usize
    }

    /// Slot the next kept reading will land in.
    pub const fn write_index(&self) -> u8 {
        self.write_index
    }

    pub const fn mode(&self) -> OperationMode {
        self.mode
    }

    /// Record a mode change and restart the settling window, since the
    /// excitation change disturbs the sensor just like power-up does.
    pub fn set_mode(&mut self, mode: OperationMode) {
        if mode != self.mode {
            self.mode = mode;
            self.samples_seen = 0;
            self.write_index = 0;
        }
    }
}

impl Default for CalibrationAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
