//! Sample Conditioning Strategies
//!
//! Each sensor instance carries exactly one conditioning strategy, chosen
//! when the driver is constructed and fixed for its lifetime: either the
//! glitch filter (flight configuration) or the calibration accumulator
//! (ground characterization and self-test). The acquisition pipeline
//! dispatches every decoded reading through whichever is active.

use crate::calibration::CalibrationAccumulator;
use crate::glitch::GlitchFilter;
use crate::mag::Mag;

/// The conditioning strategy attached to one sensor instance.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Conditioning {
    GlitchFilter(GlitchFilter),
    Calibration(CalibrationAccumulator),
}

impl Conditioning {
    /// Spike-suppressing configuration for flight use.
    pub const fn glitch_filter() -> Self {
        Self::GlitchFilter(GlitchFilter::new())
    }

    /// Sample-collecting configuration for calibration runs.
    pub const fn calibration() -> Self {
        Self::Calibration(CalibrationAccumulator::new())
    }

    /// Route one decoded reading through the active strategy.
    ///
    /// The glitch filter may substitute its last accepted reading; the
    /// accumulator records and passes the reading through unchanged.
    pub(crate) fn apply(&mut self, cur: Mag) -> Mag {
        match self {
            Self::GlitchFilter(filter) => filter.apply(cur),
            Self::Calibration(accumulator) => {
                accumulator.record(cur);
                cur
            }
        }
    }

    pub const fn as_glitch_filter(&self) -> Option<&GlitchFilter> {
        match self {
            Self::GlitchFilter(filter) => Some(filter),
            Self::Calibration(_) => None,
        }
    }

    pub const fn as_calibration(&self) -> Option<&CalibrationAccumulator> {
        match self {
            Self::Calibration(accumulator) => Some(accumulator),
            Self::GlitchFilter(_) => None,
        }
    }

    pub fn as_calibration_mut(&mut self) -> Option<&mut CalibrationAccumulator> {
        match self {
            Self::Calibration(accumulator) => Some(accumulator),
            Self::GlitchFilter(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calibration_strategy_passes_readings_through() {
        let mut conditioning = Conditioning::calibration();
        for v in 0..7 {
            let cur = Mag::new(v, v, v);
            assert_eq!(conditioning.apply(cur), cur);
        }
        let accumulator = conditioning.as_calibration().unwrap();
        assert_eq!(accumulator.samples_seen(), 7);
        assert_eq!(accumulator.stored(), 2);
    }

    #[test]
    fn glitch_strategy_can_substitute_readings() {
        let mut conditioning = Conditioning::glitch_filter();
        conditioning.apply(Mag::new(0, 0, 0));
        assert_eq!(conditioning.apply(Mag::new(900, 0, 0)), Mag::new(0, 0, 0));
        assert_eq!(conditioning.as_glitch_filter().unwrap().glitch_count(), 1);
        assert!(conditioning.as_calibration().is_none());
    }
}
