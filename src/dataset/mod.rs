//! Dataset inputs: the image manifest and the class label table.

pub mod labels;
pub mod manifest;

pub use labels::LabelTable;
pub use manifest::{Manifest, ManifestRecord};
