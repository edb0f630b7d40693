#![forbid(unsafe_code)]

pub mod average;
pub mod buffer;
pub mod error;
pub mod frame;
pub mod reader;
pub mod render;
pub mod resample;

pub use average::PixelAverager;
pub use buffer::{PixelBuffer, PixelFormat};
pub use error::{CorniceError, CorniceResult};
pub use frame::{Frame, FrameParts, FramePosition, Margins, Section};
pub use reader::{FrameReader, decode_image};
pub use render::{render, render_into};
pub use resample::{Downsampler, Upsampler};
