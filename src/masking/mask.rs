use candle_core::{Device, Tensor};

use crate::error::{MaskError, Result};

/// Extent of one video sample in patch units.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct InputSize {
    pub frames: usize,
    pub height: usize,
    pub width: usize,
}
impl InputSize {
    pub fn new(frames: usize, height: usize, width: usize) -> Self {
        Self {
            frames,
            height,
            width,
        }
    }
    pub fn patches_per_frame(&self) -> usize {
        self.height * self.width
    }
    pub fn total_patches(&self) -> usize {
        self.frames * self.patches_per_frame()
    }
}
impl From<(usize, usize, usize)> for InputSize {
    fn from((frames, height, width): (usize, usize, usize)) -> Self {
        Self::new(frames, height, width)
    }
}
impl From<[usize; 3]> for InputSize {
    fn from([frames, height, width]: [usize; 3]) -> Self {
        Self::new(frames, height, width)
    }
}
impl TryFrom<&[usize]> for InputSize {
    type Error = MaskError;
    fn try_from(dims: &[usize]) -> Result<Self> {
        match *dims {
            [frames, height, width] => Ok(Self::new(frames, height, width)),
            _ => Err(MaskError::InputArity(dims.len())),
        }
    }
}
impl std::fmt::Display for InputSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.frames, self.height, self.width)
    }
}

/// A flat 0/1 patch mask for one sample, frame-major (frame, then height, then width).
///
/// `1` marks a hidden patch, `0` a visible one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Mask {
    input_size: InputSize,
    values: Vec<u8>,
}
impl Mask {
    pub(crate) fn new(input_size: InputSize, values: Vec<u8>) -> Self {
        debug_assert_eq!(values.len(), input_size.total_patches());
        Self { input_size, values }
    }
    pub fn input_size(&self) -> InputSize {
        self.input_size
    }
    pub fn as_slice(&self) -> &[u8] {
        &self.values
    }
    pub fn into_vec(self) -> Vec<u8> {
        self.values
    }
    pub fn len(&self) -> usize {
        self.values.len()
    }
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
    pub fn num_masked(&self) -> usize {
        self.values.iter().filter(|&&m| m != 0).count()
    }
    pub fn num_visible(&self) -> usize {
        self.len() - self.num_masked()
    }

    /// Patches of frame `index`, or `None` past the last frame.
    pub fn frame(&self, index: usize) -> Option<&[u8]> {
        if index >= self.input_size.frames {
            return None;
        }
        let n = self.input_size.patches_per_frame();
        Some(&self.values[index * n..(index + 1) * n])
    }

    pub fn frames(&self) -> impl Iterator<Item = &[u8]> + '_ {
        (0..self.input_size.frames).filter_map(move |i| self.frame(i))
    }

    pub fn masked_indices(&self) -> Vec<usize> {
        self.indices_of(1)
    }
    pub fn visible_indices(&self) -> Vec<usize> {
        self.indices_of(0)
    }
    fn indices_of(&self, value: u8) -> Vec<usize> {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(idx, &m)| if m == value { Some(idx) } else { None })
            .collect()
    }

    pub fn to_bool_vec(&self) -> Vec<bool> {
        self.values.iter().map(|&m| m != 0).collect()
    }

    /// 1-D `u8` tensor of length `total_patches`.
    pub fn to_tensor(&self, device: &Device) -> Result<Tensor> {
        Ok(Tensor::from_slice(&self.values, self.values.len(), device)?)
    }

    /// `(frames, height * width)` `u8` tensor.
    pub fn to_frame_tensor(&self, device: &Device) -> Result<Tensor> {
        let shape = (
            self.input_size.frames,
            self.input_size.patches_per_frame(),
        );
        Ok(Tensor::from_slice(&self.values, shape, device)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_size_from_slice() {
        let size = InputSize::try_from(&[2usize, 3, 4][..]).unwrap();
        assert_eq!(size, InputSize::new(2, 3, 4));
        assert_eq!(size.patches_per_frame(), 12);
        assert_eq!(size.total_patches(), 24);
        assert_eq!(size.to_string(), "2x3x4");

        let err = InputSize::try_from(&[2usize, 3][..]).unwrap_err();
        assert!(matches!(err, MaskError::InputArity(2)));
    }

    #[test]
    fn frame_views() {
        let mask = Mask::new(InputSize::new(2, 1, 3), vec![0, 1, 0, 1, 1, 1]);
        assert_eq!(mask.frame(0), Some(&[0u8, 1, 0][..]));
        assert_eq!(mask.frame(1), Some(&[1u8, 1, 1][..]));
        assert_eq!(mask.frame(2), None);
        assert_eq!(mask.frames().count(), 2);
        assert_eq!(mask.num_masked(), 4);
        assert_eq!(mask.num_visible(), 2);
        assert_eq!(mask.masked_indices(), vec![1, 3, 4, 5]);
        assert_eq!(mask.visible_indices(), vec![0, 2]);
    }

    #[test]
    fn tensors() -> Result<()> {
        let mask = Mask::new(InputSize::new(2, 1, 2), vec![1, 0, 1, 0]);
        let t = mask.to_tensor(&Device::Cpu)?;
        assert_eq!(t.dims(), &[4]);
        assert_eq!(t.to_vec1::<u8>()?, vec![1, 0, 1, 0]);
        let t = mask.to_frame_tensor(&Device::Cpu)?;
        assert_eq!(t.dims(), &[2, 2]);
        assert_eq!(t.to_vec2::<u8>()?, vec![vec![1, 0], vec![1, 0]]);
        Ok(())
    }
}
