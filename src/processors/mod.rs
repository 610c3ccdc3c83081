//! Image processing steps of the preprocessing pipeline.
//!
//! * [`Resize`] - bring a bitmap to the graph's input size
//! * [`ExtractPixels`] - turn a bitmap into an offset float tensor

pub mod pixels;
pub mod resize;
pub mod types;

pub use pixels::ExtractPixels;
pub use resize::Resize;
pub use types::{ChannelOrder, ResizeMode};
