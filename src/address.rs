//! Magnetometer I2C Address Configuration
//!
//! Both supported parts respond on the same fixed 7-bit address:
//! - HMC5883L: 0x1E (single address, no select pin)
//! - LSM303AGR magnetometer block: 0x1E
//!
//! Multiple sensors therefore cannot share one bus; the flight
//! configuration puts one magnetometer on each of the two I2C buses.

/// A magnetometer 7-bit I2C address.
///
/// Note: this is a 7-bit address. Some I2C implementations may
/// require left-shifting by 1 to create the 8-bit address.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct Address(pub u8);

impl Default for Address {
    /// Returns the address (0x1E) shared by the HMC5883L and the
    /// LSM303AGR magnetometer block.
    fn default() -> Self {
        Self(0x1E)
    }
}

impl From<Address> for u8 {
    /// Converts the address wrapper to raw u8 value.
    /// Used internally for I2C communication.
    fn from(addr: Address) -> Self {
        addr.0
    }
}

impl From<u8> for Address {
    /// Creates an address from raw u8 value.
    fn from(addr: u8) -> Self {
        Self(addr)
    }
}
