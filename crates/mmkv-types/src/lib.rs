#![warn(clippy::pedantic)]

pub mod entry;
pub mod error;
pub mod type_hint;

pub use entry::{Entry, TypeLabel};
pub use error::TypeError;
pub use type_hint::TypeHint;
