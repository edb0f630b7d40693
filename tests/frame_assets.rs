use std::path::{Path, PathBuf};

use cornice::{FramePosition, FrameReader, PixelFormat};

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "cornice_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn write_rgb_png(path: &Path, width: u32, height: u32, value: u8) {
    let data = vec![value; (width * height * 3) as usize];
    let img = image::RgbImage::from_raw(width, height, data).unwrap();
    img.save(path).unwrap();
}

fn write_gray_png(path: &Path, width: u32, height: u32, value: u8) {
    let data = vec![value; (width * height) as usize];
    let img = image::GrayImage::from_raw(width, height, data).unwrap();
    img.save(path).unwrap();
}

/// 3x3 corners, 3px-thick edges, 4x4 thumbnail, each piece a distinct
/// solid value; top edge repeats, left edge carries a 1px offset.
fn write_frame_asset(dir: &Path) {
    std::fs::create_dir_all(dir).unwrap();
    write_rgb_png(&dir.join("top.png"), 8, 3, 1);
    write_rgb_png(&dir.join("bottom.png"), 8, 3, 2);
    write_rgb_png(&dir.join("left.png"), 3, 8, 3);
    write_rgb_png(&dir.join("right.png"), 3, 8, 4);
    write_rgb_png(&dir.join("top-left.png"), 3, 3, 5);
    write_rgb_png(&dir.join("top-right.png"), 3, 3, 6);
    write_rgb_png(&dir.join("bottom-left.png"), 3, 3, 7);
    write_rgb_png(&dir.join("bottom-right.png"), 3, 3, 8);
    write_rgb_png(&dir.join("thumbnail.png"), 4, 4, 9);
    std::fs::write(
        dir.join("frame.json"),
        r#"{
  "sides": {
    "top": { "repeating": true },
    "left": { "offset": 1 }
  }
}"#,
    )
    .unwrap();
}

#[test]
fn read_frame_applies_metadata_and_margins() {
    let tmp = temp_dir("frame_assets_read");
    write_frame_asset(&tmp);

    let frame = FrameReader::open(&tmp).unwrap().read_frame().unwrap();
    assert_eq!(frame.format(), PixelFormat::Rgb8);
    assert_eq!(frame.path(), Some(tmp.as_path()));

    assert!(frame.section(FramePosition::Top).repeating());
    assert!(!frame.section(FramePosition::Bottom).repeating());
    assert_eq!(frame.section(FramePosition::Left).x_offset(), 1);
    assert_eq!(frame.section(FramePosition::Right).x_offset(), 0);

    // Corners protrude 3px everywhere; the left edge's offset only shrinks
    // its own contribution (3 - 1 = 2), so corners still set the margin.
    let m = frame.margins();
    assert_eq!((m.left, m.top, m.right, m.bottom), (3, 3, 3, 3));

    assert_eq!(frame.thumbnail().width(), 4);
    assert_eq!(frame.thumbnail().height(), 4);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn missing_metadata_means_defaults() {
    let tmp = temp_dir("frame_assets_no_meta");
    write_frame_asset(&tmp);
    std::fs::remove_file(tmp.join("frame.json")).unwrap();

    let frame = FrameReader::open(&tmp).unwrap().read_frame().unwrap();
    for pos in FramePosition::ALL {
        let s = frame.section(pos);
        assert!(!s.repeating(), "{} should not repeat", pos.name());
        assert_eq!(s.x_offset() + s.y_offset(), 0, "{} offset", pos.name());
    }

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn read_thumbnail_does_not_need_the_other_images() {
    let tmp = temp_dir("frame_assets_thumb");
    std::fs::create_dir_all(&tmp).unwrap();
    write_rgb_png(&tmp.join("thumbnail.png"), 4, 4, 9);

    let thumb = FrameReader::open(&tmp).unwrap().read_thumbnail().unwrap();
    assert_eq!(thumb.width(), 4);
    assert_eq!(thumb.as_bytes()[0], 9);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn missing_section_image_is_fatal() {
    let tmp = temp_dir("frame_assets_missing");
    write_frame_asset(&tmp);
    std::fs::remove_file(tmp.join("right.png")).unwrap();

    let err = FrameReader::open(&tmp).unwrap().read_frame().unwrap_err();
    assert!(err.to_string().contains("right.png"));

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn mixed_pixel_formats_are_fatal() {
    let tmp = temp_dir("frame_assets_mixed");
    write_frame_asset(&tmp);
    write_gray_png(&tmp.join("bottom.png"), 8, 3, 2);

    let err = FrameReader::open(&tmp).unwrap().read_frame().unwrap_err();
    assert!(err.to_string().contains("pixel format"));

    std::fs::remove_dir_all(&tmp).ok();
}
