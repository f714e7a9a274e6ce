use thiserror::Error;

#[derive(Debug, Error)]
pub enum MaskError {
    #[error("input size must have 3 dimensions (frames, height, width), but got {0}")]
    InputArity(usize),

    #[error("mask_list must have length {expected}, but got {actual}")]
    MaskListLength { expected: usize, actual: usize },

    #[error("cannot mask {requested} distinct frames out of {available}")]
    TooManyFrames { requested: usize, available: usize },

    #[error("failed to parse {what} from {input:?}")]
    Parse { what: &'static str, input: String },

    #[error(transparent)]
    Regex(#[from] regex::Error),

    #[error(transparent)]
    Candle(#[from] candle_core::Error),
}

pub type Result<T> = std::result::Result<T, MaskError>;
