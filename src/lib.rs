#![no_std]

pub mod address;
pub mod calibration;
pub mod conditioning;
pub mod conversion;
pub mod error;
pub mod error_async;
pub mod glitch;
pub mod mag;
pub mod registers;
pub mod registry;
pub mod sensor;
pub mod sensor_async;
pub mod variant;

#[cfg(test)]
mod mock;
