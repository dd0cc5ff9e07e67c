//! Device Registry
//!
//! The flight platform carries a fixed number of magnetometers, one per
//! physical I2C bus, so the registry is a small owned collection rather
//! than a growable one. Registration hands out an opaque handle; every
//! registration past capacity is rejected explicitly instead of writing
//! past the end of the set. Handles on distinct instances touch disjoint
//! state.

use crate::{
    calibration::OperationMode,
    conversion::ConversionMode,
    error::Error,
    mag::MagSample,
    sensor::Magnetometer,
    variant::HardwareVariant,
};
use core::fmt::{Debug, Formatter};
use embedded_hal::i2c::I2c;
use heapless::Vec;

/// Number of magnetometers in the flight configuration, one per bus.
pub const MAX_MAGNETOMETERS: usize = 2;

/// Opaque handle to a registered sensor instance.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct MagHandle(u8);

/// Registration rejected because the registry is full. Hands the sensor
/// (and the bus it owns) back to the caller.
pub struct CapacityExceeded<I, V>
where
    I: I2c,
    V: HardwareVariant,
{
    pub sensor: Magnetometer<I, V>,
}

impl<I, V> Debug for CapacityExceeded<I, V>
where
    I: I2c,
    V: HardwareVariant,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str("CapacityExceeded")
    }
}

/// Owned, bounds-checked set of sensor instances.
pub struct MagRegistry<I, V, const N: usize = MAX_MAGNETOMETERS>
where
    I: I2c,
    V: HardwareVariant,
{
    sensors: Vec<Magnetometer<I, V>, N>,
}

impl<I, V, const N: usize> MagRegistry<I, V, N>
where
    I: I2c,
    V: HardwareVariant,
{
    pub const fn new() -> Self {
        Self {
            sensors: Vec::new(),
        }
    }

    /// Register a configured sensor, returning its handle.
    pub fn register(
        &mut self,
        sensor: Magnetometer<I, V>,
    ) -> Result<MagHandle, CapacityExceeded<I, V>> {
        let index = self.sensors.len() as u8;
        match self.sensors.push(sensor) {
            Ok(()) => Ok(MagHandle(index)),
            Err(sensor) => Err(CapacityExceeded { sensor }),
        }
    }

    /// Acquire one sample from the sensor behind `handle`.
    pub fn read_xyz(
        &mut self,
        handle: MagHandle,
        mode: ConversionMode,
    ) -> Result<MagSample, Error<I>> {
        self.get_mut(handle).ok_or(Error::UnknownHandle)?.read_xyz(mode)
    }

    /// Switch the sensor behind `handle` between normal measurement and
    /// self-test excitation.
    pub fn set_operation_mode(
        &mut self,
        handle: MagHandle,
        mode: OperationMode,
    ) -> Result<(), Error<I>> {
        self.get_mut(handle)
            .ok_or(Error::UnknownHandle)?
            .set_operation_mode(mode)
    }

    pub fn get(&self, handle: MagHandle) -> Option<&Magnetometer<I, V>> {
        self.sensors.get(handle.0 as usize)
    }

    pub fn get_mut(&mut self, handle: MagHandle) -> Option<&mut Magnetometer<I, V>> {
        self.sensors.get_mut(handle.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<I, V, const N: usize> Default for MagRegistry<I, V, N>
where
    I: I2c,
    V: HardwareVariant,
{
    fn default() -> Self {
        Self::new()
    }
}
