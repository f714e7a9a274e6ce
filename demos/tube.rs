use candle_core::{DType, Device, Tensor};
use candle_nn::{Module, VarBuilder, VarMap};

use candle_mae_mask::config::{MaskingConfig, MaskingStrategy};
use candle_mae_mask::masking::{InputSize, MaskGenerator, TubeMaskingGenerator};
use candle_mae_mask::utils::visible_tokens;

// cargo run --example tube -- 8x14x14 tube:0.9
fn main() -> anyhow::Result<()> {
    let device = Device::Cpu;
    let mut args = std::env::args().skip(1);
    let input_size: InputSize = match args.next() {
        Some(s) => s.parse()?,
        None => MaskingConfig::default().input_size,
    };
    let strategy: MaskingStrategy = match args.next() {
        Some(s) => s.parse()?,
        None => MaskingStrategy::default(),
    };

    let tube = TubeMaskingGenerator::new(input_size, strategy.mask_ratio());
    println!("{}", tube);

    // patch embedding: 2x16x16 RGB tubelets -> 384
    let patch_dim = 2 * 16 * 16 * 3;
    let hidden_dim = 384;
    let varmap = VarMap::new();
    let vs = VarBuilder::from_varmap(&varmap, DType::F32, &device);
    let embed = candle_nn::linear(patch_dim, hidden_dim, vs.pp("patch_embed"))?;

    let generator = MaskingConfig::new(input_size, strategy).build()?;
    for step in 0..3 {
        let patches = Tensor::randn(0f32, 1., (input_size.total_patches(), patch_dim), &device)?;
        let tokens = embed.forward(&patches)?;

        let mask = generator.generate()?;
        let visible = visible_tokens(&tokens, &mask.to_tensor(&device)?)?;
        println!(
            "Step: {step} masked {:5} visible {:5} encoder input {:?}",
            mask.num_masked(),
            mask.num_visible(),
            visible.dims(),
        );
    }
    Ok(())
}
