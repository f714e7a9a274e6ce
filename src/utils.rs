use candle_core::{Result, Tensor};

/// Positions of `mask` (1-D, `u8`) equal to `value`, as a `u32` index tensor.
pub fn mask_to_index(mask: &Tensor, value: u8) -> Result<Tensor> {
    let index: Vec<u32> = mask
        .to_vec1()?
        .into_iter()
        .enumerate()
        .filter_map(|(idx, m): (_, u8)| if m == value { Some(idx as u32) } else { None })
        .collect();
    let len = index.len();
    Tensor::from_vec(index, len, mask.device())
}

// tokens: (num_patches, dim), mask: (num_patches,)
pub fn visible_tokens(tokens: &Tensor, mask: &Tensor) -> Result<Tensor> {
    tokens.index_select(&mask_to_index(mask, 0)?, 0)
}

pub fn masked_tokens(tokens: &Tensor, mask: &Tensor) -> Result<Tensor> {
    tokens.index_select(&mask_to_index(mask, 1)?, 0)
}
