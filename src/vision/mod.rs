/// Vision module
///
/// Pixel-level processing for ball detection: color segmentation into a
/// binary mask, and connected-component blob extraction over that mask.
/// Everything here is a pure function of its inputs; the decision logic
/// lives in `detection`.

pub mod blob;
pub mod color;

// Re-export commonly used types
pub use blob::{extract_blobs, Blob};
pub use color::{ball_mask, rgb_to_hsv, Hsv, HsvRange};
