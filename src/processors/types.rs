//! Types used in image processing operations.

use serde::{Deserialize, Serialize};

/// Specifies the order of channels in an image tensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChannelOrder {
    /// Channel, Height, Width order (planar: all R, then all G, then all B)
    CHW,
    /// Height, Width, Channel order (interleaved: R,G,B per pixel)
    #[default]
    HWC,
}

/// How an image is brought to the target size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResizeMode {
    /// Crop the largest centered region with the target aspect ratio, then resize.
    #[default]
    IsoCrop,
    /// Stretch the whole image to the target size.
    Fill,
}
