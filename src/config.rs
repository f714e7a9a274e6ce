use std::str::FromStr;

use regex::Regex;

use crate::error::{MaskError, Result};
use crate::masking::{FrameMaskingGenerator, InputSize, MaskGenerator, TubeMaskingGenerator};

#[derive(Clone, Debug, PartialEq)]
pub enum MaskingStrategy {
    Tube {
        mask_ratio: f64,
    },
    Frame {
        mask_ratio: f64,
        mask_list: Option<Vec<bool>>,
    },
}
impl MaskingStrategy {
    pub fn mask_ratio(&self) -> f64 {
        match self {
            Self::Tube { mask_ratio } | Self::Frame { mask_ratio, .. } => *mask_ratio,
        }
    }
}
impl Default for MaskingStrategy {
    fn default() -> Self {
        Self::Tube { mask_ratio: 0.9 }
    }
}

// tube:0.9 | frame:0.5 | frame:0.5:0101
impl FromStr for MaskingStrategy {
    type Err = MaskError;
    fn from_str(s: &str) -> Result<Self> {
        let parse_err = || MaskError::Parse {
            what: "masking strategy",
            input: s.to_owned(),
        };
        let regex = Regex::new(r"^\s*(tube|frame)\s*:\s*([0-9]*\.?[0-9]+)\s*(?::\s*([01]+))?\s*$")?;
        let c = regex.captures(s).ok_or_else(parse_err)?;
        let mask_ratio: f64 = c[2].parse().map_err(|_| parse_err())?;
        let mask_list = c
            .get(3)
            .map(|m| m.as_str().chars().map(|ch| ch == '1').collect::<Vec<_>>());
        match (&c[1], mask_list) {
            ("tube", None) => Ok(Self::Tube { mask_ratio }),
            ("frame", mask_list) => Ok(Self::Frame {
                mask_ratio,
                mask_list,
            }),
            _ => Err(parse_err()),
        }
    }
}

// 16x14x14 or 16,14,14
impl FromStr for InputSize {
    type Err = MaskError;
    fn from_str(s: &str) -> Result<Self> {
        let parse_err = || MaskError::Parse {
            what: "input size",
            input: s.to_owned(),
        };
        let regex = Regex::new(r"^\s*(\d+)\s*[x,]\s*(\d+)\s*[x,]\s*(\d+)\s*$")?;
        let c = regex.captures(s).ok_or_else(parse_err)?;
        let mut dims = Vec::with_capacity(3);
        for i in 1..=3 {
            dims.push(c[i].parse::<usize>().map_err(|_| parse_err())?);
        }
        InputSize::try_from(dims.as_slice())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MaskingConfig {
    pub input_size: InputSize,
    pub strategy: MaskingStrategy,
}
impl MaskingConfig {
    pub fn new<S: Into<InputSize>>(input_size: S, strategy: MaskingStrategy) -> Self {
        Self {
            input_size: input_size.into(),
            strategy,
        }
    }
    pub fn build(&self) -> Result<Box<dyn MaskGenerator>> {
        let gen: Box<dyn MaskGenerator> = match &self.strategy {
            MaskingStrategy::Tube { mask_ratio } => {
                Box::new(TubeMaskingGenerator::new(self.input_size, *mask_ratio))
            }
            MaskingStrategy::Frame {
                mask_ratio,
                mask_list: None,
            } => Box::new(FrameMaskingGenerator::new(self.input_size, *mask_ratio)),
            MaskingStrategy::Frame {
                mask_ratio,
                mask_list: Some(mask_list),
            } => Box::new(FrameMaskingGenerator::with_mask_list(
                self.input_size,
                *mask_ratio,
                mask_list.clone(),
            )?),
        };
        Ok(gen)
    }
}
impl Default for MaskingConfig {
    // 16 frames with tubelet size 2, 224px with 16px patches
    fn default() -> Self {
        Self::new((8, 14, 14), MaskingStrategy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_input_size() {
        assert_eq!("16x14x14".parse::<InputSize>().unwrap(), InputSize::new(16, 14, 14));
        assert_eq!(" 4, 2 ,2 ".parse::<InputSize>().unwrap(), InputSize::new(4, 2, 2));
        assert!(matches!(
            "4x2".parse::<InputSize>(),
            Err(MaskError::Parse { .. })
        ));
        assert!("4x2x-1".parse::<InputSize>().is_err());
    }

    #[test]
    fn parse_strategy() {
        assert_eq!(
            "tube:0.9".parse::<MaskingStrategy>().unwrap(),
            MaskingStrategy::Tube { mask_ratio: 0.9 }
        );
        assert_eq!(
            "frame:.5".parse::<MaskingStrategy>().unwrap(),
            MaskingStrategy::Frame {
                mask_ratio: 0.5,
                mask_list: None
            }
        );
        assert_eq!(
            "frame:0:0110".parse::<MaskingStrategy>().unwrap(),
            MaskingStrategy::Frame {
                mask_ratio: 0.0,
                mask_list: Some(vec![false, true, true, false])
            }
        );
        assert!("tube:0.5:01".parse::<MaskingStrategy>().is_err());
        assert!("random:0.5".parse::<MaskingStrategy>().is_err());
        assert!("tube".parse::<MaskingStrategy>().is_err());
    }

    #[test]
    fn build() -> Result<()> {
        let gen = MaskingConfig::default().build()?;
        assert_eq!(gen.input_size(), InputSize::new(8, 14, 14));
        assert_eq!(gen.generate()?.num_masked(), 8 * 176);

        let config = MaskingConfig::new((3, 2, 2), "frame:0:101".parse()?);
        assert_eq!(config.build()?.generate()?.num_masked(), 8);

        let config = MaskingConfig::new((4, 2, 2), "frame:0:101".parse()?);
        assert!(matches!(
            config.build().err(),
            Some(MaskError::MaskListLength { .. })
        ));
        Ok(())
    }
}
