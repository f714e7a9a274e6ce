use indicatif::{ProgressBar, ProgressStyle};
use rand::{rngs::StdRng, SeedableRng};

use candle_mae_mask::masking::{MaskGenerator, TubeMaskingGenerator};

// cargo run --example frequency
fn main() -> anyhow::Result<()> {
    let draws = 100_000u64;
    let (height, width) = (4, 4);
    let tube = TubeMaskingGenerator::new((2, height, width), 0.75);
    let mut rng = StdRng::seed_from_u64(0);

    let pbar = ProgressBar::new(draws);
    pbar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({per_sec}, {eta})")?
            .progress_chars("#>-"),
    );
    let mut counts = vec![0u64; height * width];
    for _ in 0..draws {
        let mask = tube.generate_with(&mut rng)?;
        for (c, &m) in counts.iter_mut().zip(mask.as_slice()) {
            *c += m as u64;
        }
        pbar.inc(1);
    }
    pbar.finish();

    let expected = tube.num_masks_per_frame() as f64 / tube.num_patches_per_frame() as f64;
    println!("{} expected frequency {:.4}", tube, expected);
    for row in counts.chunks(width) {
        let row: Vec<String> = row
            .iter()
            .map(|&c| format!("{:.4}", c as f64 / draws as f64))
            .collect();
        println!("{}", row.join(" "));
    }
    Ok(())
}
