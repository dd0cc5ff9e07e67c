//! Hardware Variant Capability Interface
//!
//! The two supported parts differ in their register protocol and in the
//! axis ordering of the 6-byte data frame, but not in anything the rest of
//! the pipeline cares about. Each variant is a zero-sized type implementing
//! [`HardwareVariant`]; the driver is generic over it, so the variant is
//! fixed when a sensor is constructed rather than compiled in.

use crate::mag::Mag;
use crate::registers::{hmc5883l, lsm303agr};

/// One configuration transfer: a start register and the bytes written from
/// it. Both parts auto-increment the register pointer, so a multi-byte
/// write programs consecutive registers.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct ConfigWrite {
    pub register: u8,
    pub data: &'static [u8],
}

/// Register protocol and frame decoding for one magnetometer part.
pub trait HardwareVariant {
    /// Register writes that put the part into continuous measurement.
    const NORMAL_CONFIG: &'static [ConfigWrite];

    /// Register writes that additionally energize the self-test
    /// excitation coil.
    const SELF_TEST_CONFIG: &'static [ConfigWrite];

    /// First data output register of the 6-byte frame.
    const DATA_START: u8;

    /// Decode one 6-byte frame into per-axis raw counts.
    fn decode(frame: [u8; 6]) -> Mag;
}

/// Honeywell HMC5883L.
pub struct Hmc5883l;

impl HardwareVariant for Hmc5883l {
    // One auto-increment burst programs Configuration A, Configuration B
    // and the mode register: average 8 samples at 30 Hz, gain 1370
    // LSB/gauss, continuous measurement.
    const NORMAL_CONFIG: &'static [ConfigWrite] = &[ConfigWrite {
        register: hmc5883l::Register::ConfigA as u8,
        data: &[
            hmc5883l::AVERAGE_8_SAMPLES
                | hmc5883l::OUTPUT_RATE_30HZ
                | hmc5883l::MEASURE_MODE_NORMAL,
            hmc5883l::GAIN_1370_LSB_GAUSS,
            hmc5883l::MODE_CONTINUOUS,
        ],
    }];

    const SELF_TEST_CONFIG: &'static [ConfigWrite] = &[ConfigWrite {
        register: hmc5883l::Register::ConfigA as u8,
        data: &[
            hmc5883l::AVERAGE_8_SAMPLES
                | hmc5883l::OUTPUT_RATE_30HZ
                | hmc5883l::MEASURE_MODE_POSITIVE_BIAS,
            hmc5883l::GAIN_1370_LSB_GAUSS,
            hmc5883l::MODE_CONTINUOUS,
        ],
    }];

    const DATA_START: u8 = hmc5883l::Register::DataXMsb as u8;

    /// The HMC5883L transfers its axes in X, Z, Y order, high byte first.
    /// The ordering is, unfortunately, intentional.
    fn decode(frame: [u8; 6]) -> Mag {
        Mag::new(
            i16::from_be_bytes([frame[0], frame[1]]),
            i16::from_be_bytes([frame[4], frame[5]]),
            i16::from_be_bytes([frame[2], frame[3]]),
        )
    }
}

/// ST LSM303AGR magnetometer block.
pub struct Lsm303agr;

impl HardwareVariant for Lsm303agr {
    const NORMAL_CONFIG: &'static [ConfigWrite] = &[
        ConfigWrite {
            register: lsm303agr::Register::CfgRegA as u8,
            data: &[lsm303agr::ODR_100HZ | lsm303agr::MODE_CONTINUOUS],
        },
        ConfigWrite {
            register: lsm303agr::Register::CfgRegC as u8,
            data: &[lsm303agr::BLOCK_DATA_UPDATE],
        },
    ];

    const SELF_TEST_CONFIG: &'static [ConfigWrite] = &[
        ConfigWrite {
            register: lsm303agr::Register::CfgRegA as u8,
            data: &[lsm303agr::ODR_100HZ | lsm303agr::MODE_CONTINUOUS],
        },
        ConfigWrite {
            register: lsm303agr::Register::CfgRegC as u8,
            data: &[lsm303agr::BLOCK_DATA_UPDATE | lsm303agr::SELF_TEST],
        },
    ];

    const DATA_START: u8 = lsm303agr::Register::OutX as u8;

    /// Axes arrive in X, Y, Z order, high byte first.
    fn decode(frame: [u8; 6]) -> Mag {
        Mag::new(
            i16::from_be_bytes([frame[0], frame[1]]),
            i16::from_be_bytes([frame[2], frame[3]]),
            i16::from_be_bytes([frame[4], frame[5]]),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hmc5883l_frame_is_x_z_y() {
        // 0x0001, 0x0002, 0x0003 on the wire.
        let mag = Hmc5883l::decode([0x00, 0x01, 0x00, 0x02, 0x00, 0x03]);
        assert_eq!(mag, Mag::new(1, 3, 2));
    }

    #[test]
    fn lsm303agr_frame_is_x_y_z() {
        let mag = Lsm303agr::decode([0x00, 0x01, 0x00, 0x02, 0x00, 0x03]);
        assert_eq!(mag, Mag::new(1, 2, 3));
    }

    #[test]
    fn decode_sign_extends_high_byte() {
        // 0xF800 = -2048, the bottom of the sensor's range.
        let mag = Lsm303agr::decode([0xF8, 0x00, 0x07, 0xFF, 0xFF, 0xFF]);
        assert_eq!(mag, Mag::new(-2048, 2047, -1));
    }
}
