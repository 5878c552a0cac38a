use crate::error::{DatasetError, Result};
use crate::pack::writer::ArchiveOptions;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Network architecture the external training job should build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelType {
    Categorical,
    Linear,
}

impl FromStr for ModelType {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "categorical" => Ok(Self::Categorical),
            "linear" => Ok(Self::Linear),
            other => Err(DatasetError::UnknownModelType(other.to_string())),
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Categorical => write!(f, "categorical"),
            Self::Linear => write!(f, "linear"),
        }
    }
}

/// Hyperparameters handed to the external training job. Derived from the
/// same options used to build the archive so the archive shape and the job
/// configuration cannot drift apart.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct HyperParameters {
    pub img_width: u32,
    pub img_height: u32,
    pub slice_size: usize,
    pub horizon: u32,
    pub model_type: String,
}

impl HyperParameters {
    pub fn from_options(opts: &ArchiveOptions, model_type: ModelType) -> Self {
        Self {
            img_width: opts.width,
            img_height: opts.height,
            slice_size: opts.slice_size,
            horizon: opts.horizon,
            model_type: model_type.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_type_parses_case_insensitively() {
        assert_eq!("categorical".parse::<ModelType>().unwrap(), ModelType::Categorical);
        assert_eq!("Linear".parse::<ModelType>().unwrap(), ModelType::Linear);
        assert!(matches!(
            "resnet".parse::<ModelType>(),
            Err(DatasetError::UnknownModelType(_))
        ));
    }

    #[test]
    fn hyperparameters_mirror_archive_options() {
        let opts = ArchiveOptions {
            slice_size: 2,
            width: 160,
            height: 120,
            horizon: 20,
            flip: true,
        };
        let hp = HyperParameters::from_options(&opts, ModelType::Linear);
        assert_eq!(hp.img_width, 160);
        assert_eq!(hp.img_height, 120);
        assert_eq!(hp.slice_size, 2);
        assert_eq!(hp.horizon, 20);
        assert_eq!(hp.model_type, "linear");
    }
}
