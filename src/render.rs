use crate::{
    average::PixelAverager,
    buffer::PixelBuffer,
    error::{CorniceError, CorniceResult},
    frame::{Frame, FramePosition, Section},
    resample::{Downsampler, Upsampler},
};

/// Render `frame` into a fresh zero-filled buffer of the given size.
///
/// The interior content region stays zeroed; the presentation layer draws
/// its own content there.
#[tracing::instrument(skip(frame))]
pub fn render(frame: &Frame, pixel_width: u32, pixel_height: u32) -> CorniceResult<PixelBuffer> {
    let mut dest = PixelBuffer::new(pixel_width, pixel_height, frame.format());
    render_into(frame, &mut dest)?;
    Ok(dest)
}

/// Composite the frame border into `dest`.
///
/// Corners are copied verbatim; each edge is resampled along its variable
/// axis (tiled, stretched, or box-filter shrunk). Sections draw in a fixed
/// order (corners, horizontal edges, vertical edges) and later writes win
/// where an offset edge protrudes past its margin; the call is
/// deterministic and performs no I/O.
pub fn render_into(frame: &Frame, dest: &mut PixelBuffer) -> CorniceResult<()> {
    if dest.format() != frame.format() {
        return Err(CorniceError::validation(format!(
            "destination format {:?} does not match frame format {:?}",
            dest.format(),
            frame.format()
        )));
    }
    let (min_w, min_h) = frame.min_canvas();
    if dest.width() < min_w || dest.height() < min_h {
        return Err(CorniceError::validation(format!(
            "destination {}x{} is below the frame minimum {}x{}",
            dest.width(),
            dest.height(),
            min_w,
            min_h
        )));
    }

    let m = frame.margins();
    let w = dest.width();
    let h = dest.height();

    blit(frame.section(FramePosition::TopLeft), dest, 0, 0);
    blit(frame.section(FramePosition::TopRight), dest, w - m.right, 0);
    blit(frame.section(FramePosition::BottomLeft), dest, 0, h - m.bottom);
    blit(
        frame.section(FramePosition::BottomRight),
        dest,
        w - m.right,
        h - m.bottom,
    );

    let write_width = w - m.left - m.right;
    if write_width > 0 {
        draw_horizontal_edge(frame.section(FramePosition::Top), dest, m.left, 0, write_width)?;
        draw_horizontal_edge(
            frame.section(FramePosition::Bottom),
            dest,
            m.left,
            h - m.bottom,
            write_width,
        )?;
    }

    let write_height = h - m.top - m.bottom;
    if write_height > 0 {
        draw_vertical_edge(frame.section(FramePosition::Left), dest, 0, m.top, write_height)?;
        draw_vertical_edge(
            frame.section(FramePosition::Right),
            dest,
            w - m.right,
            m.top,
            write_height,
        )?;
    }

    Ok(())
}

/// Unscaled byte-for-byte copy, used for the four corners.
fn blit(section: &Section, dest: &mut PixelBuffer, dest_x: u32, dest_y: u32) {
    let src = section.pixels();
    let bpp = src.bytes_per_pixel();
    let src_stride = src.stride();
    let dest_stride = dest.stride();
    let dest_bytes = dest.as_bytes_mut();
    for y in 0..src.height() as usize {
        let src_row = &src.as_bytes()[y * src_stride..][..src_stride];
        let dest_start = (dest_y as usize + y) * dest_stride + dest_x as usize * bpp;
        dest_bytes[dest_start..][..src_stride].copy_from_slice(src_row);
    }
}

/// Top/bottom edge: resample along X, copy the full source height per row.
fn draw_horizontal_edge(
    section: &Section,
    dest: &mut PixelBuffer,
    dest_x: u32,
    dest_y: u32,
    write_width: u32,
) -> CorniceResult<()> {
    let src_width = section.width();
    if section.repeating() {
        let tiled = tiled_length(src_width, write_width);
        downsample_x(section, dest, dest_x, dest_y, tiled, write_width, |x| {
            x % src_width
        })
    } else if write_width > src_width {
        upsample_x(section, dest, dest_x, dest_y, write_width)
    } else {
        downsample_x(section, dest, dest_x, dest_y, src_width, write_width, |x| x)
    }
}

/// Left/right edge: resample along Y, copy the full source width per
/// column.
fn draw_vertical_edge(
    section: &Section,
    dest: &mut PixelBuffer,
    dest_x: u32,
    dest_y: u32,
    write_height: u32,
) -> CorniceResult<()> {
    let src_height = section.height();
    if section.repeating() {
        let tiled = tiled_length(src_height, write_height);
        downsample_y(section, dest, dest_x, dest_y, tiled, write_height, |y| {
            y % src_height
        })
    } else if write_height > src_height {
        upsample_y(section, dest, dest_x, dest_y, write_height)
    } else {
        downsample_y(section, dest, dest_x, dest_y, src_height, write_height, |y| y)
    }
}

/// Logical length of a repeating source tiled to cover `write_len`.
///
/// Ceiling division; the remainder pixels of the last tile are absorbed by
/// the downsample averaging. The tiled length is kept >= 2 so the mapper
/// ratio stays valid even for a 1px tile and a 1px destination.
fn tiled_length(src_len: u32, write_len: u32) -> u32 {
    let mut repeat = write_len.div_ceil(src_len);
    if src_len * repeat < 2 {
        repeat = 2;
    }
    src_len * repeat
}

fn upsample_x(
    section: &Section,
    dest: &mut PixelBuffer,
    dest_x: u32,
    dest_y: u32,
    write_width: u32,
) -> CorniceResult<()> {
    let src = section.pixels();
    let bpp = src.bytes_per_pixel();
    let src_stride = src.stride();
    let dest_stride = dest.stride();
    let up = Upsampler::new(src.width(), write_width)?;
    let dest_bytes = dest.as_bytes_mut();
    for y in 0..src.height() as usize {
        let src_row = &src.as_bytes()[y * src_stride..][..src_stride];
        let dest_row_base = (dest_y as usize + y) * dest_stride;
        for x in 0..write_width {
            let (a, b) = up.map(x);
            let pa = &src_row[a as usize * bpp..][..bpp];
            let pb = &src_row[b as usize * bpp..][..bpp];
            let d = dest_row_base + (dest_x + x) as usize * bpp;
            for i in 0..bpp {
                dest_bytes[d + i] = ((u16::from(pa[i]) + u16::from(pb[i])) / 2) as u8;
            }
        }
    }
    Ok(())
}

fn upsample_y(
    section: &Section,
    dest: &mut PixelBuffer,
    dest_x: u32,
    dest_y: u32,
    write_height: u32,
) -> CorniceResult<()> {
    let src = section.pixels();
    let bpp = src.bytes_per_pixel();
    let src_stride = src.stride();
    let dest_stride = dest.stride();
    let up = Upsampler::new(src.height(), write_height)?;
    let dest_bytes = dest.as_bytes_mut();
    for y in 0..write_height {
        let (a, b) = up.map(y);
        let row_a = &src.as_bytes()[a as usize * src_stride..][..src_stride];
        let row_b = &src.as_bytes()[b as usize * src_stride..][..src_stride];
        let dest_row_base = (dest_y + y) as usize * dest_stride;
        for x in 0..src.width() as usize {
            let d = dest_row_base + (dest_x as usize + x) * bpp;
            for i in 0..bpp {
                let s = x * bpp + i;
                dest_bytes[d + i] = ((u16::from(row_a[s]) + u16::from(row_b[s])) / 2) as u8;
            }
        }
    }
    Ok(())
}

/// Box-filter shrink along X: walk source pixels in order, accumulate per
/// destination slot, flush whenever the mapped slot advances. `src_x_of`
/// folds a logical (possibly tiled) index back onto the source row.
fn downsample_x(
    section: &Section,
    dest: &mut PixelBuffer,
    dest_x: u32,
    dest_y: u32,
    in_count: u32,
    out_count: u32,
    src_x_of: impl Fn(u32) -> u32,
) -> CorniceResult<()> {
    let src = section.pixels();
    let bpp = src.bytes_per_pixel();
    let src_stride = src.stride();
    let dest_stride = dest.stride();
    let down = Downsampler::new(in_count, out_count)?;
    let dest_bytes = dest.as_bytes_mut();
    let mut avg = PixelAverager::new(bpp);
    for y in 0..src.height() as usize {
        let src_row = &src.as_bytes()[y * src_stride..][..src_stride];
        let dest_row_base = (dest_y as usize + y) * dest_stride;
        let mut prev = 0u32;
        for x in 0..in_count {
            let dx = down.map(x);
            if dx != prev {
                let d = dest_row_base + (dest_x + prev) as usize * bpp;
                avg.write_average(&mut dest_bytes[d..][..bpp]);
                prev = dx;
            }
            avg.add(&src_row[src_x_of(x) as usize * bpp..][..bpp]);
        }
        let d = dest_row_base + (dest_x + prev) as usize * bpp;
        avg.write_average(&mut dest_bytes[d..][..bpp]);
    }
    Ok(())
}

/// Box-filter shrink along Y, column-major so every destination pixel
/// aggregates all source rows that map onto it.
fn downsample_y(
    section: &Section,
    dest: &mut PixelBuffer,
    dest_x: u32,
    dest_y: u32,
    in_count: u32,
    out_count: u32,
    src_y_of: impl Fn(u32) -> u32,
) -> CorniceResult<()> {
    let src = section.pixels();
    let bpp = src.bytes_per_pixel();
    let src_stride = src.stride();
    let dest_stride = dest.stride();
    let down = Downsampler::new(in_count, out_count)?;
    let dest_bytes = dest.as_bytes_mut();
    let mut avg = PixelAverager::new(bpp);
    for x in 0..src.width() as usize {
        let dest_col_base = (dest_x as usize + x) * bpp;
        let mut prev = 0u32;
        for y in 0..in_count {
            let dy = down.map(y);
            if dy != prev {
                let d = (dest_y + prev) as usize * dest_stride + dest_col_base;
                avg.write_average(&mut dest_bytes[d..][..bpp]);
                prev = dy;
            }
            let s = src_y_of(y) as usize * src_stride + x * bpp;
            avg.add(&src.as_bytes()[s..][..bpp]);
        }
        let d = (dest_y + prev) as usize * dest_stride + dest_col_base;
        avg.write_average(&mut dest_bytes[d..][..bpp]);
    }
    Ok(())
}
