#![warn(clippy::pedantic)]

pub mod error;
pub mod header;
pub mod kv_frame;
pub mod reader;
pub mod varint;

pub use error::WireError;
pub use header::{DumpHeader, HEADER_SIZE};
pub use kv_frame::KvFrame;
pub use reader::FrameReader;
