use rand::{seq::SliceRandom, Rng, RngCore};

use super::{traits::MaskGenerator, InputSize, Mask};
use crate::error::Result;

/// Masks the same spatial patches in every frame.
///
/// Each frame gets exactly `floor(mask_ratio * height * width)` hidden patches,
/// clamped to `[0, height * width]`. The spatial pattern is drawn once per
/// call and tiled across all frames.
#[derive(Clone, Debug)]
pub struct TubeMaskingGenerator {
    input_size: InputSize,
    num_patches_per_frame: usize,
    total_patches: usize,
    num_masks_per_frame: usize,
    total_masks: usize,
}
impl TubeMaskingGenerator {
    pub fn new<S: Into<InputSize>>(input_size: S, mask_ratio: f64) -> Self {
        let input_size = input_size.into();
        let num_patches_per_frame = input_size.patches_per_frame();
        let total_patches = input_size.total_patches();
        if !(0.0..=1.0).contains(&mask_ratio) {
            log::warn!("tube mask ratio {mask_ratio} is outside [0, 1]; clamping mask count");
        }
        // `as` saturates: negative and NaN products give 0
        let num_masks_per_frame =
            ((mask_ratio * num_patches_per_frame as f64).floor() as usize).min(num_patches_per_frame);
        let total_masks = input_size.frames * num_masks_per_frame;
        log::debug!(
            "tube masking {input_size}: {num_masks_per_frame}/{num_patches_per_frame} patches per frame"
        );
        Self {
            input_size,
            num_patches_per_frame,
            total_patches,
            num_masks_per_frame,
            total_masks,
        }
    }
    pub fn num_patches_per_frame(&self) -> usize {
        self.num_patches_per_frame
    }
    pub fn total_patches(&self) -> usize {
        self.total_patches
    }
    pub fn num_masks_per_frame(&self) -> usize {
        self.num_masks_per_frame
    }
    pub fn total_masks(&self) -> usize {
        self.total_masks
    }

    /// Draws one tube mask. Never fails.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Mask {
        let num_visible = self.num_patches_per_frame - self.num_masks_per_frame;
        let mut mask_per_frame = vec![0u8; num_visible];
        mask_per_frame.resize(self.num_patches_per_frame, 1);
        mask_per_frame.shuffle(rng);

        log::trace!("tube mask pattern {:?}", mask_per_frame);
        let values = mask_per_frame.repeat(self.input_size.frames);
        Mask::new(self.input_size, values)
    }
}

impl MaskGenerator for TubeMaskingGenerator {
    fn input_size(&self) -> InputSize {
        self.input_size
    }
    fn generate_with(&self, rng: &mut dyn RngCore) -> Result<Mask> {
        Ok(self.sample(rng))
    }
}

impl std::fmt::Display for TubeMaskingGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Mask: total patches {}, mask patches {}",
            self.total_patches, self.total_masks
        )
    }
}
