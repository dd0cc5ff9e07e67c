//! Raw-to-Physical Unit Conversion
//!
//! At the configured gain of 1370 LSB/gauss one raw count corresponds to
//! 73.0 nT (100 000 nT per gauss / 1370 counts per gauss). All factors here
//! assume that gain; reconfiguring the sensor's gain without updating the
//! conversion factors will silently mis-scale the output.

/// Nanoteslas represented by one raw count at gain 1370 LSB/gauss.
pub const RAW_TO_NANOTESLAS: f32 = 73.0;

/// Teslas represented by one raw count at gain 1370 LSB/gauss.
pub const RAW_TO_TESLAS: f32 = 73.0e-9;

/// Unit selector applied by the acquisition pipeline.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConversionMode {
    /// Skip conversion; converted fields carry the raw counts.
    None,
    /// Scale to nanoteslas.
    NanoTeslas,
    /// Scale to teslas.
    Teslas,
    /// Fallback scaling (nanoteslas).
    Default,
}

impl ConversionMode {
    /// Scale factor for this mode, or `None` when conversion is skipped.
    pub const fn factor(self) -> Option<f32> {
        match self {
            Self::None => None,
            Self::NanoTeslas | Self::Default => Some(RAW_TO_NANOTESLAS),
            Self::Teslas => Some(RAW_TO_TESLAS),
        }
    }
}

/// Error converting a field strength back to raw counts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum ConversionError {
    /// The rounded result does not fit a signed 16-bit raw count.
    OutOfRange,
}

/// Field strength in teslas for a single raw axis count.
pub fn raw_to_teslas(raw: i16) -> f32 {
    raw as f32 * RAW_TO_TESLAS
}

/// Raw axis count, rounded to nearest, for a field strength in teslas.
///
/// Values that round outside the signed 16-bit range are reported as
/// [`ConversionError::OutOfRange`] rather than saturated or wrapped.
pub fn teslas_to_raw(teslas: f32) -> Result<i16, ConversionError> {
    let rounded = libm::roundf(teslas / RAW_TO_TESLAS);
    if rounded < i16::MIN as f32 || rounded > i16::MAX as f32 || !rounded.is_finite() {
        return Err(ConversionError::OutOfRange);
    }
    Ok(rounded as i16)
}
