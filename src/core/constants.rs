//! Constants tied to the Inception graph and the default file layout.
//!
//! The input size, pixel offset and tensor names are part of the graph's
//! training-time contract. Changing any of them without re-exporting the
//! graph silently degrades accuracy; they are deliberately not configuration.

/// Input width expected by the Inception graph, in pixels.
pub const INCEPTION_INPUT_WIDTH: u32 = 224;

/// Input height expected by the Inception graph, in pixels.
pub const INCEPTION_INPUT_HEIGHT: u32 = 224;

/// Number of color channels fed to the graph (R, G, B).
pub const INCEPTION_CHANNELS: usize = 3;

/// Value subtracted from every channel value during pixel extraction.
pub const INCEPTION_PIXEL_OFFSET: f32 = 117.0;

/// Factor applied to every channel value after the offset.
pub const INCEPTION_PIXEL_SCALE: f32 = 1.0;

/// Name of the graph's input tensor.
pub const INCEPTION_INPUT_NAME: &str = "input";

/// Name of the graph's classification output tensor.
pub const INCEPTION_OUTPUT_NAME: &str = "softmax2";

/// Default manifest location, relative to the working directory.
pub const DEFAULT_MANIFEST_PATH: &str = "images/tags.tsv";

/// Default directory the manifest's image paths are resolved against.
pub const DEFAULT_IMAGES_DIR: &str = "images";

/// Default location of the graph file.
pub const DEFAULT_GRAPH_PATH: &str = "models/tensorflow_inception_graph.onnx";

/// Default location of the label list.
pub const DEFAULT_LABELS_PATH: &str = "models/imagenet_comp_graph_label_strings.txt";

/// Marker appended to report lines whose prediction differs from the expected label.
pub const WRONG_MARKER: &str = "***WRONG***";

/// Number of candidates logged per record at debug level.
pub const DEFAULT_TOPK: usize = 3;
