use itertools::Itertools;
use rand::{seq::index, Rng, RngCore};

use super::{traits::MaskGenerator, InputSize, Mask};
use crate::error::{MaskError, Result};

/// Masks whole frames.
///
/// Without a mask list, each call hides `round(mask_ratio * frames)` distinct
/// frames chosen uniformly at random (ties round to even). With a mask list,
/// the list is used as-is (`true` = hide) and every call returns the same mask.
#[derive(Clone, Debug)]
pub struct FrameMaskingGenerator {
    input_size: InputSize,
    num_patches_per_frame: usize,
    total_patches: usize,
    mask_ratio: f64,
    mask_list: Option<Vec<bool>>,
}
impl FrameMaskingGenerator {
    pub fn new<S: Into<InputSize>>(input_size: S, mask_ratio: f64) -> Self {
        let input_size = input_size.into();
        if !(0.0..=1.0).contains(&mask_ratio) {
            log::warn!("frame mask ratio {mask_ratio} is outside [0, 1]");
        }
        log::debug!("frame masking {input_size}: ratio {mask_ratio}");
        Self {
            input_size,
            num_patches_per_frame: input_size.patches_per_frame(),
            total_patches: input_size.total_patches(),
            mask_ratio,
            mask_list: None,
        }
    }

    /// Uses an explicit per-frame list instead of random selection.
    pub fn with_mask_list<S: Into<InputSize>>(
        input_size: S,
        mask_ratio: f64,
        mask_list: Vec<bool>,
    ) -> Result<Self> {
        let mut gen = Self::new(input_size, mask_ratio);
        if mask_list.len() != gen.input_size.frames {
            return Err(MaskError::MaskListLength {
                expected: gen.input_size.frames,
                actual: mask_list.len(),
            });
        }
        log::debug!(
            "frame masking {}: {} user-specified masked frames",
            gen.input_size,
            mask_list.iter().filter(|&&m| m).count()
        );
        gen.mask_list = Some(mask_list);
        Ok(gen)
    }

    pub fn num_patches_per_frame(&self) -> usize {
        self.num_patches_per_frame
    }
    pub fn total_patches(&self) -> usize {
        self.total_patches
    }
    pub fn mask_ratio(&self) -> f64 {
        self.mask_ratio
    }
    pub fn mask_list(&self) -> Option<&[bool]> {
        self.mask_list.as_deref()
    }

    /// Number of frames a random draw hides.
    pub fn frames_to_mask(&self) -> usize {
        // `as` saturates: negative and NaN products give 0
        (self.mask_ratio * self.input_size.frames as f64).round_ties_even() as usize
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Mask> {
        let frame_mask = match &self.mask_list {
            Some(mask_list) => mask_list.iter().map(|&m| m as u8).collect(),
            None => self.sample_frames(rng)?,
        };
        log::trace!("frame mask {:?}", frame_mask);

        let values = frame_mask
            .into_iter()
            .flat_map(|m| itertools::repeat_n(m, self.num_patches_per_frame))
            .collect_vec();
        Ok(Mask::new(self.input_size, values))
    }

    fn sample_frames<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<u8>> {
        let frames = self.input_size.frames;
        let frames_to_mask = self.frames_to_mask();
        if frames_to_mask > frames {
            return Err(MaskError::TooManyFrames {
                requested: frames_to_mask,
                available: frames,
            });
        }
        let mut frame_mask = vec![0u8; frames];
        for i in index::sample(rng, frames, frames_to_mask) {
            frame_mask[i] = 1;
        }
        Ok(frame_mask)
    }
}

impl MaskGenerator for FrameMaskingGenerator {
    fn input_size(&self) -> InputSize {
        self.input_size
    }
    fn generate_with(&self, rng: &mut dyn RngCore) -> Result<Mask> {
        self.sample(rng)
    }
}

impl std::fmt::Display for FrameMaskingGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "FrameMaskingGenerator(frames={}, height={}, width={}, mask_ratio={}, ",
            self.input_size.frames, self.input_size.height, self.input_size.width, self.mask_ratio
        )?;
        match &self.mask_list {
            Some(mask_list) => write!(
                f,
                "user_masked_frames={})",
                mask_list.iter().filter(|&&m| m).count()
            ),
            None => write!(f, "random_masking=True)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn half_of_four_frames() -> Result<()> {
        let gen = FrameMaskingGenerator::new((4, 2, 2), 0.5);
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..20 {
            let mask = gen.sample(&mut rng)?;
            assert_eq!(mask.len(), 16);
            assert_eq!(mask.num_masked(), 8);
            let full = mask.frames().filter(|f| f.iter().all(|&m| m == 1)).count();
            let empty = mask.frames().filter(|f| f.iter().all(|&m| m == 0)).count();
            assert_eq!((full, empty), (2, 2));
        }
        Ok(())
    }

    #[test]
    fn rounds_half_to_even() {
        assert_eq!(FrameMaskingGenerator::new((5, 1, 1), 0.5).frames_to_mask(), 2);
        assert_eq!(FrameMaskingGenerator::new((3, 1, 1), 0.5).frames_to_mask(), 2);
        assert_eq!(FrameMaskingGenerator::new((16, 1, 1), 0.75).frames_to_mask(), 12);
        assert_eq!(FrameMaskingGenerator::new((4, 1, 1), -1.0).frames_to_mask(), 0);
    }

    #[test]
    fn too_many_frames() {
        let gen = FrameMaskingGenerator::new((4, 2, 2), 1.5);
        assert_eq!(gen.frames_to_mask(), 6);
        let err = gen.sample(&mut StdRng::seed_from_u64(0)).unwrap_err();
        assert!(matches!(
            err,
            MaskError::TooManyFrames {
                requested: 6,
                available: 4
            }
        ));
    }

    #[test]
    fn mask_list_length_mismatch() {
        let err = FrameMaskingGenerator::with_mask_list((5, 2, 2), 0.5, vec![true, false, true])
            .unwrap_err();
        assert!(matches!(
            err,
            MaskError::MaskListLength {
                expected: 5,
                actual: 3
            }
        ));
    }

    #[test]
    fn mask_list_is_used() -> Result<()> {
        let gen = FrameMaskingGenerator::with_mask_list(
            (4, 1, 2),
            0.0,
            vec![false, true, false, true],
        )?;
        let expected = vec![0, 0, 1, 1, 0, 0, 1, 1];
        for seed in 0..5 {
            let mask = gen.sample(&mut StdRng::seed_from_u64(seed))?;
            assert_eq!(mask.as_slice(), &expected[..]);
        }
        Ok(())
    }

    #[test]
    fn display() -> Result<()> {
        let gen = FrameMaskingGenerator::new((4, 2, 2), 0.5);
        assert_eq!(
            gen.to_string(),
            "FrameMaskingGenerator(frames=4, height=2, width=2, mask_ratio=0.5, random_masking=True)"
        );
        let gen = FrameMaskingGenerator::with_mask_list((3, 2, 2), 0.5, vec![true, false, true])?;
        assert_eq!(
            gen.to_string(),
            "FrameMaskingGenerator(frames=3, height=2, width=2, mask_ratio=0.5, user_masked_frames=2)"
        );
        Ok(())
    }
}
