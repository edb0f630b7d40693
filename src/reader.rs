use std::{collections::BTreeMap, path::PathBuf};

use anyhow::Context;

use crate::{
    buffer::{PixelBuffer, PixelFormat},
    error::{CorniceError, CorniceResult},
    frame::{Frame, FrameParts, Section},
};

const SIDE_NAMES: [&str; 4] = ["top", "bottom", "left", "right"];

/// Optional per-side placement metadata, edges only.
#[derive(Clone, Copy, Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct SideMeta {
    #[serde(default)]
    offset: u32,
    #[serde(default)]
    repeating: bool,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct FrameMeta {
    #[serde(default)]
    sides: BTreeMap<String, SideMeta>,
}

impl FrameMeta {
    fn side(&self, name: &str) -> SideMeta {
        self.sides.get(name).copied().unwrap_or_default()
    }
}

/// Reads an unpacked frame asset directory: eight position PNGs plus
/// `thumbnail.png` and an optional `frame.json` metadata document.
///
/// All images are decoded eagerly; the validated [`Frame`] handed out is
/// immutable and never partially populated.
#[derive(Debug)]
pub struct FrameReader {
    dir: PathBuf,
}

impl FrameReader {
    pub fn open(dir: impl Into<PathBuf>) -> CorniceResult<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(CorniceError::asset(format!(
                "frame asset directory '{}' does not exist",
                dir.display()
            )));
        }
        Ok(Self { dir })
    }

    pub fn read_frame(&self) -> CorniceResult<Frame> {
        let meta = self.read_meta()?;
        let top = meta.side("top");
        let bottom = meta.side("bottom");
        let left = meta.side("left");
        let right = meta.side("right");

        let parts = FrameParts {
            top: Section::horizontal_edge(self.read_image("top.png")?, top.offset, top.repeating),
            bottom: Section::horizontal_edge(
                self.read_image("bottom.png")?,
                bottom.offset,
                bottom.repeating,
            ),
            left: Section::vertical_edge(self.read_image("left.png")?, left.offset, left.repeating),
            right: Section::vertical_edge(
                self.read_image("right.png")?,
                right.offset,
                right.repeating,
            ),
            top_left: Section::corner(self.read_image("top-left.png")?),
            top_right: Section::corner(self.read_image("top-right.png")?),
            bottom_left: Section::corner(self.read_image("bottom-left.png")?),
            bottom_right: Section::corner(self.read_image("bottom-right.png")?),
            thumbnail: self.read_image("thumbnail.png")?,
            path: Some(self.dir.clone()),
        };

        let frame = Frame::new(parts)?;
        tracing::debug!(dir = %self.dir.display(), format = ?frame.format(), "loaded frame asset");
        Ok(frame)
    }

    /// Decode only the thumbnail, for cheap gallery previews.
    pub fn read_thumbnail(&self) -> CorniceResult<PixelBuffer> {
        self.read_image("thumbnail.png")
    }

    fn read_meta(&self) -> CorniceResult<FrameMeta> {
        let path = self.dir.join("frame.json");
        if !path.is_file() {
            return Ok(FrameMeta::default());
        }
        let bytes = std::fs::read(&path)
            .with_context(|| format!("read frame metadata '{}'", path.display()))?;
        let meta: FrameMeta = serde_json::from_slice(&bytes)
            .map_err(|e| CorniceError::serde(format!("parse '{}': {e}", path.display())))?;
        for name in meta.sides.keys() {
            if !SIDE_NAMES.contains(&name.as_str()) {
                return Err(CorniceError::serde(format!(
                    "unknown side '{name}' in '{}'",
                    path.display()
                )));
            }
        }
        Ok(meta)
    }

    fn read_image(&self, name: &str) -> CorniceResult<PixelBuffer> {
        let path = self.dir.join(name);
        let bytes =
            std::fs::read(&path).with_context(|| format!("read image '{}'", path.display()))?;
        decode_image(&bytes)
            .map_err(|e| CorniceError::asset(format!("decode '{}': {e}", path.display())))
    }
}

/// Decode an encoded image into one of the supported 1-byte-per-channel
/// layouts, preserving the source color type.
pub fn decode_image(bytes: &[u8]) -> CorniceResult<PixelBuffer> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let (width, height) = (dyn_img.width(), dyn_img.height());
    let (format, raw) = match dyn_img {
        image::DynamicImage::ImageLuma8(img) => (PixelFormat::Gray8, img.into_raw()),
        image::DynamicImage::ImageLumaA8(img) => (PixelFormat::GrayAlpha8, img.into_raw()),
        image::DynamicImage::ImageRgb8(img) => (PixelFormat::Rgb8, img.into_raw()),
        image::DynamicImage::ImageRgba8(img) => (PixelFormat::Rgba8, img.into_raw()),
        other => {
            return Err(CorniceError::asset(format!(
                "unsupported color type {:?}: only 8-bit-per-channel images are allowed",
                other.color()
            )));
        }
    };
    PixelBuffer::from_raw(width, height, format, raw)
}
