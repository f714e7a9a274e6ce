mod traits;
pub use traits::MaskGenerator;

mod mask;
pub use mask::{InputSize, Mask};

mod tube;
pub use tube::TubeMaskingGenerator;
mod frame;
pub use frame::FrameMaskingGenerator;
