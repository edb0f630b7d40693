use std::path::PathBuf;

use crate::{
    buffer::{PixelBuffer, PixelFormat},
    error::{CorniceError, CorniceResult},
};

/// One of the eight artwork pieces composing a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FramePosition {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl FramePosition {
    pub const ALL: [FramePosition; 8] = [
        FramePosition::Top,
        FramePosition::Bottom,
        FramePosition::Left,
        FramePosition::Right,
        FramePosition::TopLeft,
        FramePosition::TopRight,
        FramePosition::BottomLeft,
        FramePosition::BottomRight,
    ];

    pub fn is_corner(self) -> bool {
        matches!(
            self,
            FramePosition::TopLeft
                | FramePosition::TopRight
                | FramePosition::BottomLeft
                | FramePosition::BottomRight
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            FramePosition::Top => "top",
            FramePosition::Bottom => "bottom",
            FramePosition::Left => "left",
            FramePosition::Right => "right",
            FramePosition::TopLeft => "top-left",
            FramePosition::TopRight => "top-right",
            FramePosition::BottomLeft => "bottom-left",
            FramePosition::BottomRight => "bottom-right",
        }
    }
}

/// One frame artwork piece: decoded pixels plus placement metadata.
///
/// Corners carry no offsets and never repeat; horizontal edges only carry a
/// Y offset, vertical edges only an X offset. The constructors enforce the
/// shape, `Frame::new` re-checks it.
#[derive(Clone, Debug)]
pub struct Section {
    pixels: PixelBuffer,
    x_offset: u32,
    y_offset: u32,
    repeating: bool,
}

impl Section {
    pub fn corner(pixels: PixelBuffer) -> Self {
        Self {
            pixels,
            x_offset: 0,
            y_offset: 0,
            repeating: false,
        }
    }

    pub fn horizontal_edge(pixels: PixelBuffer, y_offset: u32, repeating: bool) -> Self {
        Self {
            pixels,
            x_offset: 0,
            y_offset,
            repeating,
        }
    }

    pub fn vertical_edge(pixels: PixelBuffer, x_offset: u32, repeating: bool) -> Self {
        Self {
            pixels,
            x_offset,
            y_offset: 0,
            repeating,
        }
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn x_offset(&self) -> u32 {
        self.x_offset
    }

    pub fn y_offset(&self) -> u32 {
        self.y_offset
    }

    pub fn repeating(&self) -> bool {
        self.repeating
    }
}

/// Fixed border thickness on each side, derived from the largest
/// protruding section per side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Margins {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

/// Unvalidated input to [`Frame::new`].
#[derive(Clone, Debug)]
pub struct FrameParts {
    pub top: Section,
    pub bottom: Section,
    pub left: Section,
    pub right: Section,
    pub top_left: Section,
    pub top_right: Section,
    pub bottom_left: Section,
    pub bottom_right: Section,
    pub thumbnail: PixelBuffer,
    pub path: Option<PathBuf>,
}

/// A validated, immutable set of eight frame sections plus thumbnail.
///
/// Construction checks every invariant the compositor relies on, so
/// rendering never fails on frame shape. A `Frame` is read-only after
/// construction and safe to share across concurrently rendering threads.
#[derive(Clone, Debug)]
pub struct Frame {
    sections: [Section; 8],
    margins: Margins,
    format: PixelFormat,
    thumbnail: PixelBuffer,
    path: Option<PathBuf>,
}

fn max3(a: u32, b: u32, c: u32) -> u32 {
    a.max(b).max(c)
}

impl Frame {
    pub fn new(parts: FrameParts) -> CorniceResult<Self> {
        let sections = [
            parts.top,
            parts.bottom,
            parts.left,
            parts.right,
            parts.top_left,
            parts.top_right,
            parts.bottom_left,
            parts.bottom_right,
        ];

        let format = sections[FramePosition::Top as usize].pixels.format();
        for pos in FramePosition::ALL {
            let s = &sections[pos as usize];
            if s.pixels.is_empty() {
                return Err(CorniceError::validation(format!(
                    "{} section has zero rows or columns",
                    pos.name()
                )));
            }
            if s.pixels.format() != format {
                return Err(CorniceError::validation(format!(
                    "pixel format of {} section ({:?}) does not match top section ({:?})",
                    pos.name(),
                    s.pixels.format(),
                    format
                )));
            }
            if s.x_offset > s.width() || s.y_offset > s.height() {
                return Err(CorniceError::validation(format!(
                    "{} section offset exceeds its extent",
                    pos.name()
                )));
            }
            if pos.is_corner() && (s.repeating || s.x_offset != 0 || s.y_offset != 0) {
                return Err(CorniceError::validation(format!(
                    "{} corner must not repeat or carry offsets",
                    pos.name()
                )));
            }
        }

        // Non-repeating edges feed the ratio mappers, which need at least
        // two source indices on the variable axis.
        for (pos, len) in [
            (FramePosition::Top, sections[FramePosition::Top as usize].width()),
            (FramePosition::Bottom, sections[FramePosition::Bottom as usize].width()),
            (FramePosition::Left, sections[FramePosition::Left as usize].height()),
            (FramePosition::Right, sections[FramePosition::Right as usize].height()),
        ] {
            if !sections[pos as usize].repeating && len < 2 {
                return Err(CorniceError::validation(format!(
                    "non-repeating {} edge must span at least 2 pixels",
                    pos.name()
                )));
            }
        }

        let s = |pos: FramePosition| &sections[pos as usize];
        let margins = Margins {
            left: max3(
                s(FramePosition::TopLeft).width() - s(FramePosition::TopLeft).x_offset,
                s(FramePosition::BottomLeft).width() - s(FramePosition::BottomLeft).x_offset,
                s(FramePosition::Left).width() - s(FramePosition::Left).x_offset,
            ),
            top: max3(
                s(FramePosition::TopLeft).height() - s(FramePosition::TopLeft).y_offset,
                s(FramePosition::TopRight).height() - s(FramePosition::TopRight).y_offset,
                s(FramePosition::Top).height() - s(FramePosition::Top).y_offset,
            ),
            right: max3(
                s(FramePosition::TopRight).width() + s(FramePosition::TopRight).x_offset,
                s(FramePosition::BottomRight).width() + s(FramePosition::BottomRight).x_offset,
                s(FramePosition::Right).width() + s(FramePosition::Right).x_offset,
            ),
            bottom: max3(
                s(FramePosition::BottomLeft).height() + s(FramePosition::BottomLeft).y_offset,
                s(FramePosition::BottomRight).height() + s(FramePosition::BottomRight).y_offset,
                s(FramePosition::Bottom).height() + s(FramePosition::Bottom).y_offset,
            ),
        };

        Ok(Self {
            sections,
            margins,
            format,
            thumbnail: parts.thumbnail,
            path: parts.path,
        })
    }

    pub fn section(&self, pos: FramePosition) -> &Section {
        &self.sections[pos as usize]
    }

    pub fn margins(&self) -> Margins {
        self.margins
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.format.bytes_per_pixel()
    }

    pub fn thumbnail(&self) -> &PixelBuffer {
        &self.thumbnail
    }

    pub fn path(&self) -> Option<&std::path::Path> {
        self.path.as_deref()
    }

    /// Smallest destination size the compositor accepts.
    ///
    /// Offsets only shrink a side's margin, so an offset edge's artwork can
    /// protrude past its margin into the content area; the minimum accounts
    /// for that protrusion so every blit stays in bounds.
    pub fn min_canvas(&self) -> (u32, u32) {
        let width = (self.margins.left + self.margins.right)
            .max(self.section(FramePosition::Left).width())
            .max(self.section(FramePosition::Right).width());
        let height = (self.margins.top + self.margins.bottom)
            .max(self.section(FramePosition::Top).height())
            .max(self.section(FramePosition::Bottom).height());
        (width, height)
    }
}
