//! Asynchronous Magnetometer Driver
//!
//! Non-blocking mirror of the blocking driver in [`crate::sensor`], built
//! on `embedded-hal-async`. The acquisition semantics are identical: one
//! awaited 6-byte register read per sample, then variant decode,
//! conditioning, unit conversion and the range-validity check. Suitable
//! for firmware running an async executor.

use crate::{
    address::Address,
    calibration::{CalibrationAccumulator, CalibrationFactors, OperationMode},
    conditioning::Conditioning,
    conversion::ConversionMode,
    error_async::{Error, InitError},
    mag::{Mag, MagSample},
    variant::{ConfigWrite, HardwareVariant},
};
use core::marker::PhantomData;
use embedded_hal_async::i2c::I2c;

/// Async driver for one 3-axis magnetometer on an I2C bus.
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
    /// On a failed configuration write the bus is handed back inside the
    /// error.
    pub async fn new(
        i2c: I,
        address: Address,
        conditioning: Conditioning,
    ) -> Result<Self, InitError<I>> {
        let mut sensor = Self {
            i2c,
            address: address.into(),
            factors: CalibrationFactors::default(),
            conditioning,
            sample: MagSample::from_raw(Mag::new(0, 0, 0), ConversionMode::None),
            variant: PhantomData,
        };

        if let Err(error) = sensor.apply_config(V::NORMAL_CONFIG).await {
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

    pub(crate) async fn read(
        &mut self,
        bytes: &[u8],
        response: &mut [u8],
    ) -> Result<(), Error<I>> {
        self.i2c
            .write_read(self.address, bytes, response)
            .await
            .map_err(Error::WriteReadError)
    }

    pub(crate) async fn write(&mut self, bytes: &[u8]) -> Result<(), Error<I>> {
        self.i2c
            .write(self.address, bytes)
            .await
            .map_err(Error::WriteError)
    }

    async fn apply_config(&mut self, writes: &[ConfigWrite]) -> Result<(), Error<I>> {
        for config in writes {
            // Variant tables never write more than 3 registers at once.
            let mut buf = [0u8; 4];
            buf[0] = config.register;
            buf[1..1 + config.data.len()].copy_from_slice(config.data);
            self.write(&buf[..1 + config.data.len()]).await?;
        }
        Ok(())
    }

    /// Acquire one conditioned, converted and validated sample.
    ///
    /// The returned value is also retained internally; [`Self::sample`]
    /// yields it until the next acquisition on this instance.
    pub async fn read_xyz(&mut self, mode: ConversionMode) -> Result<MagSample, Error<I>> {
        let mut frame = [0u8; 6];
        self.read(&[V::DATA_START], &mut frame).await?;
        let conditioned = self.conditioning.apply(V::decode(frame));
        self.sample = MagSample::from_raw(conditioned, mode);
        Ok(self.sample)
    }

    /// Most recently acquired sample.
    pub fn sample(&self) -> &MagSample {
        &self.sample
    }

    /// Switch between normal measurement and self-test excitation.
    pub async fn set_operation_mode(&mut self, mode: OperationMode) -> Result<(), Error<I>> {
        match mode {
            OperationMode::Normal => self.apply_config(V::NORMAL_CONFIG).await?,
            OperationMode::SelfTest => self.apply_config(V::SELF_TEST_CONFIG).await?,
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
