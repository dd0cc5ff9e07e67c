//! Blocking Magnetometer Driver
//!
//! One [`Magnetometer`] owns one I2C bus handle and the conditioning state
//! for the sensor behind it. Each acquisition is a single blocking 6-byte
//! register read followed by variant decode, conditioning, unit conversion
//! and the range-validity check; there is no retry or timeout at this
//! layer, and no internal locking. Callers serialize access per instance.

use crate::{
    address::Address,
    calibration::{CalibrationAccumulator, CalibrationFactors, OperationMode},
    conditioning::Conditioning,
    conversion::ConversionMode,
    error::{Error, InitError},
    mag::{Mag, MagSample},
    variant::{ConfigWrite, HardwareVariant},
};
use core::marker::PhantomData;
use embedded_hal::i2c::I2c;

/// Driver for one 3-axis magnetometer on an I2C bus.
pub struct Magnetometer<I, V>
where
    I: I2c,
    V: HardwareVariant,
{
    i2c: I,
    address: u8,
    factors: CalibrationFactors,
    conditioning: Conditioning,
    sample: MagSample,
    variant: PhantomData<V>,
}

impl<I, V> Magnetometer<I, V>
where
    I: I2c,
    V: HardwareVariant,
{
    /// Construct a driver and put the sensor into continuous measurement.
    ///
    /// The conditioning strategy chosen here is fixed for the life of the
    /// instance. On a failed configuration write the bus is handed back
    /// inside the error.
    pub fn new(i2c: I, address: Address, conditioning: Conditioning) -> Result<Self, InitError<I>> {
        let mut sensor = Self {
            i2c,
            address: address.into(),
            factors: CalibrationFactors::default(),
            conditioning,
            sample: MagSample::from_raw(Mag::new(0, 0, 0), ConversionMode::None),
            variant: PhantomData,
        };

        if let Err(error) = sensor.apply_config(V::NORMAL_CONFIG) {
            Err(InitError {
                error,
                i2c: sensor.i2c,
            })
        } else {
            Ok(sensor)
        }
    }

    /// Returns the underlying I2C peripheral, consuming this driver.
    pub fn release(self) -> I {
        self.i2c
    }

    pub(crate) fn read(&mut self, bytes: &[u8], response: &mut [u8]) -> Result<(), Error<I>> {
        self.i2c
            .write_read(self.address, bytes, response)
            .map_err(Error::WriteReadError)
    }

    pub(crate) fn write(&mut self, bytes: &[u8]) -> Result<(), Error<I>> {
        self.i2c.write(self.address, bytes).map_err(Error::WriteError)
    }

    fn apply_config(&mut self, writes: &[ConfigWrite]) -> Result<(), Error<I>> {
        for config in writes {
            // Variant tables never write more than 3 registers at once.
            let mut buf = [0u8; 4];
            buf[0] = config.register;
            buf[1..1 + config.data.len()].copy_from_slice(config.data);
            self.write(&buf[..1 + config.data.len()])?;
        }
        Ok(())
    }

    /// Acquire one conditioned, converted and validated sample.
    ///
    /// The returned value is also retained internally; [`Self::sample`]
    /// yields it until the next acquisition on this instance.
    pub fn read_xyz(&mut self, mode: ConversionMode) -> Result<MagSample, Error<I>> {
        let mut frame = [0u8; 6];
        self.read(&[V::DATA_START], &mut frame)?;
        let conditioned = self.conditioning.apply(V::decode(frame));
        self.sample = MagSample::from_raw(conditioned, mode);
        Ok(self.sample)
    }

    /// Most recently acquired sample.
    pub fn sample(&self) -> &MagSample {
        &self.sample
    }

    /// Switch between normal measurement and self-test excitation.
    ///
    /// Writes the variant's register sequence and, when the calibration
    /// accumulator is active, restarts its settling window.
    pub fn set_operation_mode(&mut self, mode: OperationMode) -> Result<(), Error<I>> {
        match mode {
            OperationMode::Normal => self.apply_config(V::NORMAL_CONFIG)?,
            OperationMode::SelfTest => self.apply_config(V::SELF_TEST_CONFIG)?,
        }
        if let Some(accumulator) = self.conditioning.as_calibration_mut() {
            accumulator.set_mode(mode);
        }
        Ok(())
    }

    pub fn calibration_factors(&self) -> CalibrationFactors {
        self.factors
    }

    pub fn set_calibration_factors(&mut self, factors: CalibrationFactors) {
        self.factors = factors;
    }

    /// Readings rejected by the glitch filter, when that strategy is
    /// active.
    pub fn glitch_count(&self) -> Option<u32> {
        self.conditioning
            .as_glitch_filter()
            .map(|filter| filter.glitch_count())
    }

    /// Read-only view of the calibration window, when that strategy is
    /// active.
    pub fn calibration(&self) -> Option<&CalibrationAccumulator> {
        self.conditioning.as_calibration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::{CALIBRATION_SAMPLES, SETTLING_SAMPLES};
    use crate::conversion::RAW_TO_NANOTESLAS;
    use crate::mock::MockI2c;
    use crate::registers::{hmc5883l, lsm303agr};
    use crate::variant::{Hmc5883l, Lsm303agr};

    fn frame(a: i16, b: i16, c: i16) -> [u8; 6] {
        let a = a.to_be_bytes();
        let b = b.to_be_bytes();
        let c = c.to_be_bytes();
        [a[0], a[1], b[0], b[1], c[0], c[1]]
    }

    #[test]
    fn init_writes_hmc5883l_config_burst() {
        let sensor = Magnetometer::<_, Hmc5883l>::new(
            MockI2c::new(),
            Address::default(),
            Conditioning::glitch_filter(),
        )
        .unwrap();

        let i2c = sensor.release();
        assert_eq!(i2c.writes.len(), 1);
        let (addr, bytes) = &i2c.writes[0];
        assert_eq!(*addr, 0x1E);
        assert_eq!(
            bytes.as_slice(),
            &[
                hmc5883l::Register::ConfigA as u8,
                hmc5883l::AVERAGE_8_SAMPLES | hmc5883l::OUTPUT_RATE_30HZ,
                hmc5883l::GAIN_1370_LSB_GAUSS,
                hmc5883l::MODE_CONTINUOUS,
            ]
        );
    }

    #[test]
    fn init_writes_lsm303agr_config_registers() {
        let sensor = Magnetometer::<_, Lsm303agr>::new(
            MockI2c::new(),
            Address::default(),
            Conditioning::glitch_filter(),
        )
        .unwrap();

        let i2c = sensor.release();
        assert_eq!(i2c.writes.len(), 2);
        assert_eq!(
            i2c.writes[0].1.as_slice(),
            &[lsm303agr::Register::CfgRegA as u8, lsm303agr::ODR_100HZ]
        );
        assert_eq!(
            i2c.writes[1].1.as_slice(),
            &[
                lsm303agr::Register::CfgRegC as u8,
                lsm303agr::BLOCK_DATA_UPDATE
            ]
        );
    }

    #[test]
    fn read_xyz_decodes_and_converts() {
        let mut i2c = MockI2c::new();
        // HMC5883L frames carry X, Z, Y.
        i2c.queue_frame(frame(10, 30, 20));
        let mut sensor = Magnetometer::<_, Hmc5883l>::new(
            i2c,
            Address::default(),
            Conditioning::glitch_filter(),
        )
        .unwrap();

        let sample = sensor.read_xyz(ConversionMode::NanoTeslas).unwrap();
        assert_eq!(sample.raw(), Mag::new(10, 20, 30));
        assert_eq!(sample.x(), 10.0 * RAW_TO_NANOTESLAS);
        assert_eq!(sample.y(), 20.0 * RAW_TO_NANOTESLAS);
        assert_eq!(sample.z(), 30.0 * RAW_TO_NANOTESLAS);
        assert!(sample.is_valid());
        assert_eq!(sensor.sample(), &sample);

        // The data read addressed the first output register.
        let i2c = sensor.release();
        let (_, last_write) = i2c.writes.last().unwrap();
        assert_eq!(last_write.as_slice(), &[hmc5883l::Register::DataXMsb as u8]);
    }

    #[test]
    fn none_mode_skips_conversion() {
        let mut i2c = MockI2c::new();
        i2c.queue_frame(frame(-5, 7, 9));
        let mut sensor = Magnetometer::<_, Lsm303agr>::new(
            i2c,
            Address::default(),
            Conditioning::glitch_filter(),
        )
        .unwrap();

        let sample = sensor.read_xyz(ConversionMode::None).unwrap();
        assert_eq!(sample.raw(), Mag::new(-5, 7, 9));
        assert_eq!((sample.x(), sample.y(), sample.z()), (-5.0, 7.0, 9.0));
    }

    #[test]
    fn pipeline_suppresses_isolated_spike() {
        let mut i2c = MockI2c::new();
        i2c.queue_frame(frame(0, 0, 0));
        i2c.queue_frame(frame(1000, 0, 0));
        i2c.queue_frame(frame(0, 0, 0));
        let mut sensor = Magnetometer::<_, Lsm303agr>::new(
            i2c,
            Address::default(),
            Conditioning::glitch_filter(),
        )
        .unwrap();

        sensor.read_xyz(ConversionMode::None).unwrap();
        let spike = sensor.read_xyz(ConversionMode::None).unwrap();
        // The caller sees the stale baseline, not the spike.
        assert_eq!(spike.raw(), Mag::new(0, 0, 0));
        assert_eq!(sensor.glitch_count(), Some(1));

        let after = sensor.read_xyz(ConversionMode::None).unwrap();
        assert_eq!(after.raw(), Mag::new(0, 0, 0));
        assert_eq!(sensor.glitch_count(), Some(1));
    }

    #[test]
    fn calibration_pipeline_accumulates_after_settling() {
        let mut i2c = MockI2c::new();
        for v in 1..=8 {
            i2c.queue_frame(frame(v, v, v));
        }
        let mut sensor = Magnetometer::<_, Lsm303agr>::new(
            i2c,
            Address::default(),
            Conditioning::calibration(),
        )
        .unwrap();

        for _ in 0..8 {
            sensor.read_xyz(ConversionMode::None).unwrap();
        }
        let accumulator = sensor.calibration().unwrap();
        assert_eq!(accumulator.samples_seen(), 8);
        assert_eq!(accumulator.stored(), 8 - SETTLING_SAMPLES as usize);
        assert_eq!(accumulator.samples_x()[0], 6);
        assert!(accumulator.stored() < CALIBRATION_SAMPLES);
        assert_eq!(sensor.glitch_count(), None);
    }

    #[test]
    fn self_test_mode_writes_bias_config() {
        let mut sensor = Magnetometer::<_, Hmc5883l>::new(
            MockI2c::new(),
            Address::default(),
            Conditioning::calibration(),
        )
        .unwrap();

        sensor.set_operation_mode(OperationMode::SelfTest).unwrap();
        assert_eq!(sensor.calibration().unwrap().mode(), OperationMode::SelfTest);

        let i2c = sensor.release();
        let (_, bytes) = i2c.writes.last().unwrap();
        assert_eq!(
            bytes[1],
            hmc5883l::AVERAGE_8_SAMPLES
                | hmc5883l::OUTPUT_RATE_30HZ
                | hmc5883l::MEASURE_MODE_POSITIVE_BIAS
        );
    }

    #[test]
    fn calibration_factors_default_to_unity() {
        let mut sensor = Magnetometer::<_, Hmc5883l>::new(
            MockI2c::new(),
            Address::default(),
            Conditioning::glitch_filter(),
        )
        .unwrap();

        assert_eq!(sensor.calibration_factors(), CalibrationFactors::default());
        let factors = CalibrationFactors {
            x: 0.98,
            y: 1.02,
            z: 1.0,
        };
        sensor.set_calibration_factors(factors);
        assert_eq!(sensor.calibration_factors(), factors);
    }
}
