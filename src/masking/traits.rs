use rand::RngCore;

use super::{InputSize, Mask};
use crate::error::Result;

pub trait MaskGenerator {
    fn input_size(&self) -> InputSize;

    /// Draws one mask using `rng` as the source of randomness.
    fn generate_with(&self, rng: &mut dyn RngCore) -> Result<Mask>;

    /// Draws one mask from the thread-local generator.
    fn generate(&self) -> Result<Mask> {
        self.generate_with(&mut rand::thread_rng())
    }
}
