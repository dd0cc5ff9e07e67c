//! Transient Spike Suppression
//!
//! Bus noise occasionally corrupts a single transfer, producing a one-tick
//! spike that would feed straight into attitude determination. A real change
//! in the measured field persists, so a jump is only believed once it has
//! been seen on two consecutive ticks; an isolated excursion is dropped and
//! the previous accepted reading is reported in its place.

use crate::mag::Mag;

/// Largest per-axis step, in raw counts, accepted without confirmation.
pub const GLITCH_MAX_DIFF: u16 = 50;

/// Two-tick debounce over one sensor's raw readings.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct GlitchFilter {
    last_accepted: Mag,
    last_diffs: (u16, u16, u16),
    glitch_count: u32,
    initialized: bool,
}

impl GlitchFilter {
    pub const fn new() -> Self {
        Self {
            last_accepted: Mag::new(0, 0, 0),
            last_diffs: (0, 0, 0),
            glitch_count: 0,
            initialized: false,
        }
    }

    /// Run one reading through the filter, returning the reading the
    /// caller should see.
    ///
    /// The first reading ever seen is accepted as-is. After that a reading
    /// within [`GLITCH_MAX_DIFF`] of the last accepted one passes through;
    /// a larger jump passes only if the previous tick also jumped,
    /// otherwise the stale accepted reading is returned and the glitch
    /// counter advances.
    pub fn apply(&mut self, cur: Mag) -> Mag {
        if !self.initialized {
            self.last_accepted = cur;
            self.last_diffs = (0, 0, 0);
            self.glitch_count = 0;
            self.initialized = true;
            return cur;
        }

        let diff = (
            axis_diff(cur.x(), self.last_accepted.x()),
            axis_diff(cur.y(), self.last_accepted.y()),
            axis_diff(cur.z(), self.last_accepted.z()),
        );
        let exceeded =
            diff.0 > GLITCH_MAX_DIFF || diff.1 > GLITCH_MAX_DIFF || diff.2 > GLITCH_MAX_DIFF;
        let prior_exceeded = self.last_diffs.0 > GLITCH_MAX_DIFF
            || self.last_diffs.1 > GLITCH_MAX_DIFF
            || self.last_diffs.2 > GLITCH_MAX_DIFF;
        self.last_diffs = diff;

        if !exceeded || prior_exceeded {
            // Small step, or a jump sustained over two ticks.
            self.last_accepted = cur;
            cur
        } else {
            self.glitch_count += 1;
            self.last_accepted
        }
    }

    /// Number of readings rejected as isolated spikes.
    pub const fn glitch_count(&self) -> u32 {
        self.glitch_count
    }

    /// Last reading accepted by the filter.
    pub const fn last_accepted(&self) -> Mag {
        self.last_accepted
    }
}

impl Default for GlitchFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// Absolute per-axis difference; the i16 spread always fits a u16.
fn axis_diff(a: i16, b: i16) -> u16 {
    (a as i32 - b as i32).unsigned_abs() as u16
}
