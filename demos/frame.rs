use candle_core::Device;

use candle_mae_mask::masking::{FrameMaskingGenerator, MaskGenerator};

// cargo run --example frame
fn main() -> anyhow::Result<()> {
    let device = Device::Cpu;

    // random frames
    let random = FrameMaskingGenerator::new((8, 4, 4), 0.25);
    println!("{}", random);
    for _ in 0..3 {
        let mask = random.generate()?;
        let frames = mask.to_frame_tensor(&device)?.max(1)?;
        println!("masked frames {:?}", frames.to_vec1::<u8>()?);
    }

    // explicit frames
    let mask_list = vec![false, true, false, true, false, true, false, true];
    let fixed = FrameMaskingGenerator::with_mask_list((8, 4, 4), 0.5, mask_list)?;
    println!("{}", fixed);
    let mask = fixed.generate()?;
    println!("masked frames {:?}", mask.to_frame_tensor(&device)?.max(1)?.to_vec1::<u8>()?);

    // more frames than available
    let broken = FrameMaskingGenerator::new((4, 4, 4), 1.5);
    if let Err(e) = broken.generate() {
        println!("{}: {}", broken, e);
    }
    Ok(())
}
