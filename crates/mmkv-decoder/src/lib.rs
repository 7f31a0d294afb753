#![warn(clippy::pedantic)]

pub mod classifier;
pub mod config;
pub mod decoder;
pub mod error;
pub mod render;

pub use classifier::{Classified, Classifier, classify};
pub use config::DecoderConfig;
pub use decoder::{DecodedDump, MmkvDecoder, ScanOutcome};
pub use error::DecodeError;
