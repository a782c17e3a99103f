//! Image analysis for streetsense.
//!
//! [`HeuristicScorer`] derives the five discomfort factors from pixel
//! statistics and detector output. [`ImageNetPreprocessor`] is the feature
//! extraction gate: an image is only scored once it survives classifier-style
//! preprocessing.

#![forbid(unsafe_code)]

pub mod measures;
mod preprocess;
mod scorer;

pub use preprocess::{
    CROP_SIDE, IMAGENET_MEAN, IMAGENET_STD, ImageNetPreprocessor, RESIZE_SHORTEST_SIDE,
};
pub use scorer::HeuristicScorer;
