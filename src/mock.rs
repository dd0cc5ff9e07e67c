//! Transaction-recording mock I2C bus for driver tests.
//!
//! Records every write for verification and replays queued 6-byte data
//! frames for reads, one frame per read operation.

use core::convert::Infallible;
use embedded_hal::i2c::{ErrorType, I2c, Operation, SevenBitAddress};
use heapless::Vec;

pub struct MockI2c {
    /// Every write performed, as (address, bytes).
    pub writes: Vec<(u8, Vec<u8, 8>), 16>,
    frames: Vec<[u8; 6], 32>,
    next_frame: usize,
}

impl MockI2c {
    pub fn new() -> Self {
        Self {
            writes: Vec::new(),
            frames: Vec::new(),
            next_frame: 0,
        }
    }

    /// Queue a data frame; reads past the queue return zeros.
    pub fn queue_frame(&mut self, frame: [u8; 6]) {
        self.frames.push(frame).unwrap();
    }
}

impl ErrorType for MockI2c {
    type Error = Infallible;
}

impl I2c for MockI2c {
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        for operation in operations.iter_mut() {
            match operation {
                Operation::Write(bytes) => {
                    let mut data = Vec::new();
                    data.extend_from_slice(bytes).unwrap();
                    self.writes.push((address, data)).unwrap();
                }
                Operation::Read(buffer) => {
                    let frame = self
                        .frames
                        .get(self.next_frame)
                        .copied()
                        .unwrap_or([0; 6]);
                    self.next_frame += 1;
                    let len = buffer.len().min(frame.len());
                    buffer[..len].copy_from_slice(&frame[..len]);
                }
            }
        }
        Ok(())
    }
}
