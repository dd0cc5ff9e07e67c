//! Register Maps for the Supported Magnetometers
//!
//! Both parts are controlled through a small bank of configuration
//! registers followed by the six data output registers. Addresses and bit
//! values here are fixed hardware constants; the driver never computes
//! them. Only the registers the driver actually touches are listed.

/// HMC5883L register map and control bits.
pub mod hmc5883l {
    /// HMC5883L register addresses.
    #[derive(Copy, Clone, Debug)]
    #[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
    pub enum Register {
        /// Configuration Register A (0x00)
        /// Sample averaging, output data rate and measurement bias
        ConfigA = 0x00,

        /// Configuration Register B (0x01)
        /// Gain selection; sets the LSB/gauss sensitivity
        ConfigB = 0x01,

        /// Mode register (0x02)
        /// Idle, single or continuous measurement mode
        Mode = 0x02,

        /// First data output register (0x03)
        /// Six bytes follow in X, Z, Y order, high byte first
        DataXMsb = 0x03,

        /// Status register (0x09)
        Status = 0x09,

        /// Identification register A (0x0A), reads 'H'
        IdA = 0x0A,
    }

    /// Configuration Register A: average 8 samples per output.
    pub const AVERAGE_8_SAMPLES: u8 = 0b0110_0000;
    /// Configuration Register A: 30 Hz continuous output rate.
    pub const OUTPUT_RATE_30HZ: u8 = 0b0001_0100;
    /// Configuration Register A: normal measurement flow, no bias coil.
    pub const MEASURE_MODE_NORMAL: u8 = 0b0000_0000;
    /// Configuration Register A: positive bias coil energized on all axes
    /// (self-test excitation).
    pub const MEASURE_MODE_POSITIVE_BIAS: u8 = 0b0000_0001;

    /// Configuration Register B: gain 1370 LSB/gauss, output range
    /// 0xF800..=0x07FF (-2048..=2047).
    pub const GAIN_1370_LSB_GAUSS: u8 = 0b0000_0000;

    /// Mode register: continuous measurement.
    pub const MODE_CONTINUOUS: u8 = 0x00;
    /// Mode register: idle.
    pub const MODE_IDLE: u8 = 0x02;
}

/// LSM303AGR magnetometer register map and control bits.
pub mod lsm303agr {
    /// LSM303AGR magnetometer register addresses.
    ///
    /// The part auto-increments the register pointer, so multi-byte
    /// configuration and data transfers address only the first register.
    #[derive(Copy, Clone, Debug)]
    #[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
    pub enum Register {
        /// Identification register (0x4F), reads 0x40
        WhoAmI = 0x4F,

        /// Configuration register A (0x60)
        /// Soft reset, output data rate and measurement mode
        CfgRegA = 0x60,

        /// Configuration register B (0x61)
        /// Offset cancellation and low-pass filter
        CfgRegB = 0x61,

        /// Configuration register C (0x62)
        /// Block data update and self-test enable
        CfgRegC = 0x62,

        /// Status register (0x67)
        Status = 0x67,

        /// First data output register (0x68)
        /// Six bytes follow in X, Y, Z order
        OutX = 0x68,
    }

    /// Configuration register A: reset registers and flush the sensing
    /// element.
    pub const SOFT_RESET: u8 = 0b0010_0000;
    /// Configuration register A: 100 Hz output data rate.
    pub const ODR_100HZ: u8 = 0b0000_1100;
    /// Configuration register A: continuous measurement mode.
    pub const MODE_CONTINUOUS: u8 = 0b0000_0000;

    /// Configuration register B: enable hard-iron offset cancellation.
    pub const OFFSET_CANCELLATION: u8 = 0b0000_0010;

    /// Configuration register C: block data update, output registers held
    /// stable during a multi-byte read.
    pub const BLOCK_DATA_UPDATE: u8 = 0b0001_0000;
    /// Configuration register C: self-test excitation enable.
    pub const SELF_TEST: u8 = 0b0000_0010;
}
