use vb_detect::common::{PixelFormat, VbBox, VbFrame};
use vb_detect::data::{ImageTransformInfo, PrepareConfig};
use vb_detect::image_ops::{to_nchw_f32, to_packed};
use vb_detect::{prepare, VbError};

use fixtures::{assert_close, camera_frame};

#[test]
fn landscape_frame_is_stretched_to_target() {
    let frame = camera_frame(1280, 720);
    let cfg = PrepareConfig::new().with_rotation(false);

    let (out, info) = prepare(&frame, &cfg).unwrap();

    assert_eq!(out.dimensions(), (640, 640));
    assert_eq!(out.format(), PixelFormat::Bgra8);
    assert_eq!(out.as_bytes().len(), 640 * 640 * 4);
    assert_close(info.width_scale, 0.5, 1e-6);
    assert_close(info.height_scale, 640.0 / 720.0, 1e-6);
    assert!(!info.rotated);
}

#[test]
fn rotation_swaps_axes_before_scaling() {
    let frame = camera_frame(1280, 720);
    let cfg = PrepareConfig::new().with_rotation(true);

    let (out, info) = prepare(&frame, &cfg).unwrap();

    assert_eq!(out.dimensions(), (640, 640));
    assert_eq!((info.width_src, info.height_src), (1280, 720));
    assert_eq!((info.width_dst, info.height_dst), (640, 640));
    assert_close(info.width_scale, 640.0 / 720.0, 1e-6);
    assert_close(info.height_scale, 0.5, 1e-6);
    assert!(info.rotated);
}

#[test]
fn uniform_colour_survives_resampling() {
    let frame = camera_frame(1280, 720);

    let (out, _) = prepare(&frame, &PrepareConfig::new()).unwrap();

    for (x, y) in [(0, 0), (639, 0), (0, 639), (320, 320), (639, 639)] {
        let px = out.pixel(x, y).unwrap();
        for (got, want) in px.iter().zip([40u8, 80, 120, 255]) {
            assert!((*got as i16 - want as i16).abs() <= 1, "pixel ({x}, {y}) = {px:?}");
        }
    }
}

#[test]
fn input_frame_is_left_untouched() {
    let frame = camera_frame(64, 48);
    let before = frame.clone();

    let _ = prepare(&frame, &PrepareConfig::new().with_target(32, 32)).unwrap();

    assert_eq!(frame, before);
}

#[test]
fn zero_sized_frames_are_rejected() {
    let frame = VbFrame::new(0, 480, PixelFormat::Bgra8, Vec::new()).unwrap();

    let result = prepare(&frame, &PrepareConfig::new());

    assert!(matches!(result, Err(VbError::Conversion(_))));
}

#[test]
fn zero_target_is_rejected() {
    let frame = camera_frame(8, 8);

    let result = prepare(&frame, &PrepareConfig::new().with_target(0, 640));

    assert!(matches!(result, Err(VbError::Conversion(_))));
}

#[test]
fn planar_output_format_is_rejected() {
    let frame = camera_frame(8, 8);

    let result = prepare(&frame, &PrepareConfig::new().with_output_format(PixelFormat::Nv12));

    assert!(matches!(result, Err(VbError::Conversion(_))));
}

#[test]
fn short_buffer_is_a_conversion_error() {
    let result = VbFrame::new(4, 4, PixelFormat::Bgra8, vec![0u8; 4 * 4 * 4 - 1]);

    assert!(matches!(result, Err(VbError::Conversion(_))));
}

#[test]
fn nv12_gray_converts_to_gray() {
    let (w, h) = (4u32, 4u32);
    let mut data = vec![128u8; (w * h) as usize];
    data.extend(vec![128u8; (w * h / 2) as usize]);
    let frame = VbFrame::new(w, h, PixelFormat::Nv12, data).unwrap();

    let (out, _) = prepare(&frame, &PrepareConfig::new().with_target(4, 4).with_rotation(false)).unwrap();

    for px in out.as_bytes().chunks_exact(4) {
        for c in &px[..3] {
            assert!((*c as i16 - 128).abs() <= 1, "got {px:?}");
        }
        assert_eq!(px[3], 255);
    }
}

#[test]
fn nv12_odd_dimensions_are_accepted() {
    let (w, h) = (3u32, 3u32);
    let len = PixelFormat::Nv12.buffer_len(w, h);
    assert_eq!(len, 9 + 2 * 2 * 2);
    let frame = VbFrame::new(w, h, PixelFormat::Nv12, vec![128u8; len]).unwrap();

    let rgba = to_packed(&frame, PixelFormat::Rgba8).unwrap();

    assert_eq!(rgba.len(), 9 * 4);
}

#[test]
fn rgb_is_swizzled_to_bgra() {
    let frame = VbFrame::filled(2, 2, PixelFormat::Rgb8, &[255, 0, 0]).unwrap();

    let bgra = to_packed(&frame, PixelFormat::Bgra8).unwrap();

    assert_eq!(&bgra[..4], &[0, 0, 255, 255]);
    assert_eq!(bgra.len(), 2 * 2 * 4);
}

#[test]
fn rotation_is_clockwise() {
    // red | blue, one row
    let frame = VbFrame::new(2, 1, PixelFormat::Rgb8, vec![255, 0, 0, 0, 0, 255]).unwrap();
    let cfg = PrepareConfig::new()
        .with_target(1, 2)
        .with_rotation(true)
        .with_output_format(PixelFormat::Rgb8);

    let (out, _) = prepare(&frame, &cfg).unwrap();

    // Left column lands on top.
    assert_eq!(out.dimensions(), (1, 2));
    assert_eq!(out.pixel(0, 0).unwrap(), &[255, 0, 0]);
    assert_eq!(out.pixel(0, 1).unwrap(), &[0, 0, 255]);
}

#[test]
fn model_boxes_map_back_to_the_source_frame() {
    let info = ImageTransformInfo::new(1280, 720, 640, 640, true);
    // (100, 200, 50, 80) in the source becomes (440, 100, 80, 50) after the turn.
    let model_box = VbBox::new(440.0 * info.width_scale, 100.0 * info.height_scale,
                               80.0 * info.width_scale, 50.0 * info.height_scale);

    let source = info.to_source(&model_box);

    assert_close(source.x, 100.0, 1e-3);
    assert_close(source.y, 200.0, 1e-3);
    assert_close(source.w, 50.0, 1e-3);
    assert_close(source.h, 80.0, 1e-3);
}

#[test]
fn unrotated_boxes_only_unscale() {
    let info = ImageTransformInfo::new(1280, 720, 640, 640, false);

    let source = info.to_source(&VbBox::new(320.0, 320.0, 64.0, 64.0));

    assert_close(source.x, 640.0, 1e-3);
    assert_close(source.y, 360.0, 1e-3);
    assert_close(source.w, 128.0, 1e-3);
    assert_close(source.h, 72.0, 1e-3);
}

#[test]
fn planar_float_tensor_is_rgb_in_unit_range() {
    let frame = VbFrame::new(2, 1, PixelFormat::Bgra8, vec![0, 0, 255, 255, 255, 0, 0, 255]).unwrap();

    let tensor = to_nchw_f32(&frame).unwrap();

    assert_eq!(tensor.shape(), &[1, 3, 1, 2]);
    assert_eq!(tensor[[0, 0, 0, 0]], 1.0);
    assert_eq!(tensor[[0, 2, 0, 0]], 0.0);
    assert_eq!(tensor[[0, 0, 0, 1]], 0.0);
    assert_eq!(tensor[[0, 2, 0, 1]], 1.0);
}

#[test]
fn filled_frame_repeats_the_pixel() {
    let frame = VbFrame::filled(3, 2, PixelFormat::Rgb8, &[1, 2, 3]).unwrap();

    assert_eq!(frame.as_bytes().len(), 3 * 2 * 3);
    assert_eq!(frame.pixel(2, 1).unwrap(), &[1, 2, 3]);
    assert!(frame.pixel(3, 0).is_none());
    assert!(VbFrame::filled(3, 2, PixelFormat::Rgb8, &[1, 2]).is_err());
}
