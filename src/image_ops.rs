//! Functions to turn camera frames into model input.

use fast_image_resize::{
    images::Image as FirImage,
    pixels::PixelType,
    FilterType, ResizeAlg, ResizeOptions, Resizer,
};
use image::{imageops, ImageBuffer, Rgb, Rgba};
use ndarray::Array4;
use rayon::prelude::*;
use crate::common::{PixelFormat, VbFrame};
use crate::data::{ImageTransformInfo, PrepareConfig};
use crate::error::{Result, VbError};

/// Main preprocessing entry point.
///
/// Converts `input` to `cfg.output_format`, optionally rotates it 90 degrees
/// clockwise, then stretches it to exactly `target_width x target_height`.
/// The aspect ratio is not preserved and no padding is added.
pub fn prepare(input: &VbFrame, cfg: &PrepareConfig) -> Result<(VbFrame, ImageTransformInfo)> {
    let (w0, h0) = input.dimensions();
    if w0 == 0 || h0 == 0 {
        return Err(VbError::conversion(format!("input frame has zero extent ({}x{})", w0, h0)));
    }
    if cfg.target_width == 0 || cfg.target_height == 0 {
        return Err(VbError::conversion(format!(
            "target size has zero extent ({}x{})", cfg.target_width, cfg.target_height
        )));
    }
    let pixel_type = match cfg.output_format.bytes_per_pixel() {
        Some(3) => PixelType::U8x3,
        Some(4) => PixelType::U8x4,
        _ => {
            return Err(VbError::conversion(format!(
                "{} is not a packed output format", cfg.output_format.as_str()
            )))
        }
    };

    let info = ImageTransformInfo::new(w0, h0, cfg.target_width, cfg.target_height, cfg.rotate_90_cw);

    let packed = to_packed(input, cfg.output_format)?;
    let (packed, w, h) = if cfg.rotate_90_cw {
        (rotate_cw(packed, w0, h0, pixel_type)?, h0, w0)
    } else {
        (packed, w0, h0)
    };

    let resized = if (w, h) == (cfg.target_width, cfg.target_height) {
        packed
    } else {
        resize_exact(packed, w, h, cfg.target_width, cfg.target_height, pixel_type)?
    };

    log::trace!(
        "prepared {}x{} {} -> {}x{} {} (scale {:.3}x{:.3}, rotated={})",
        w0, h0, input.format().as_str(),
        cfg.target_width, cfg.target_height, cfg.output_format.as_str(),
        info.width_scale, info.height_scale, info.rotated
    );

    let frame = VbFrame::new(cfg.target_width, cfg.target_height, cfg.output_format, resized)?;
    Ok((frame, info))
}

/// Converts any supported frame into a packed buffer of `format`.
pub fn to_packed(frame: &VbFrame, format: PixelFormat) -> Result<Vec<u8>> {
    if frame.format() == format {
        return Ok(frame.as_bytes().to_vec());
    }
    let dst_bpp = format.bytes_per_pixel().ok_or_else(|| {
        VbError::conversion(format!("cannot convert into planar {}", format.as_str()))
    })?;

    // Everything goes through RGBA.
    let rgba: Vec<u8> = match frame.format() {
        PixelFormat::Nv12 => nv12_to_rgba(frame.as_bytes(), frame.width(), frame.height()),
        PixelFormat::Rgba8 => frame.as_bytes().to_vec(),
        PixelFormat::Rgb8 => frame.as_bytes()
            .par_chunks_exact(3)
            .flat_map_iter(|p| [p[0], p[1], p[2], 255])
            .collect(),
        PixelFormat::Bgra8 => frame.as_bytes()
            .par_chunks_exact(4)
            .flat_map_iter(|p| [p[2], p[1], p[0], p[3]])
            .collect(),
    };

    let out: Vec<u8> = match format {
        PixelFormat::Rgba8 => rgba,
        PixelFormat::Bgra8 => rgba
            .par_chunks_exact(4)
            .flat_map_iter(|p| [p[2], p[1], p[0], p[3]])
            .collect(),
        PixelFormat::Rgb8 => rgba
            .par_chunks_exact(4)
            .flat_map_iter(|p| [p[0], p[1], p[2]])
            .collect(),
        PixelFormat::Nv12 => unreachable!("rejected above"),
    };
    debug_assert_eq!(out.len(), frame.width() as usize * frame.height() as usize * dst_bpp);
    Ok(out)
}

/// Full-range BT.601 YCbCr 4:2:0 to RGBA.
fn nv12_to_rgba(data: &[u8], width: u32, height: u32) -> Vec<u8> {
    let (w, h) = (width as usize, height as usize);
    let chroma_stride = 2 * w.div_ceil(2);
    if w == 0 || h == 0 {
        return Vec::new();
    }
    let (luma, chroma) = data.split_at(w * h);

    let mut out = vec![0u8; w * h * 4];
    out.par_chunks_mut(w * 4).enumerate().for_each(|(row, line)| {
        let chroma_row = &chroma[(row / 2) * chroma_stride..];
        for col in 0..w {
            let y = luma[row * w + col] as f32;
            let cb = chroma_row[(col / 2) * 2] as f32 - 128.0;
            let cr = chroma_row[(col / 2) * 2 + 1] as f32 - 128.0;

            let r = y + 1.402 * cr;
            let g = y - 0.344_136 * cb - 0.714_136 * cr;
            let b = y + 1.772 * cb;

            let px = &mut line[col * 4..col * 4 + 4];
            px[0] = r.round().clamp(0.0, 255.0) as u8;
            px[1] = g.round().clamp(0.0, 255.0) as u8;
            px[2] = b.round().clamp(0.0, 255.0) as u8;
            px[3] = 255;
        }
    });
    out
}

fn rotate_cw(buffer: Vec<u8>, width: u32, height: u32, pixel_type: PixelType) -> Result<Vec<u8>> {
    let rotated = match pixel_type {
        PixelType::U8x3 => {
            let img = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer)
                .ok_or_else(|| VbError::conversion("rotation buffer does not match frame size"))?;
            imageops::rotate90(&img).into_raw()
        }
        PixelType::U8x4 => {
            // Channel order is irrelevant to a rotation, BGRA rides in an Rgba container.
            let img = ImageBuffer::<Rgba<u8>, _>::from_raw(width, height, buffer)
                .ok_or_else(|| VbError::conversion("rotation buffer does not match frame size"))?;
            imageops::rotate90(&img).into_raw()
        }
        other => return Err(VbError::conversion(format!("unsupported pixel type {:?}", other))),
    };
    Ok(rotated)
}

fn resize_exact(buffer: Vec<u8>, width: u32, height: u32, target_w: u32, target_h: u32,
                pixel_type: PixelType) -> Result<Vec<u8>> {
    let src = FirImage::from_vec_u8(width, height, buffer, pixel_type)?;
    let mut dst = FirImage::new(target_w, target_h, pixel_type);

    let options = ResizeOptions::new()
        .resize_alg(ResizeAlg::Convolution(FilterType::Bilinear));
    let mut resizer = Resizer::new();
    resizer.resize(&src, &mut dst, &options)?;

    Ok(dst.into_vec())
}

/// `[1, 3, H, W]` RGB tensor scaled to `[0, 1]`, for runtimes that take planar float input.
pub fn to_nchw_f32(frame: &VbFrame) -> Result<Array4<f32>> {
    let rgb = to_packed(frame, PixelFormat::Rgb8)?;
    let w = frame.width() as usize;
    let h = frame.height() as usize;
    let hw = w * h;

    let mut out = vec![0.0f32; rgb.len()];
    for i in 0..hw {
        out[i] = rgb[3 * i] as f32 / 255.0;             // Channel 0
        out[i + hw] = rgb[3 * i + 1] as f32 / 255.0;    // Channel 1
        out[i + 2 * hw] = rgb[3 * i + 2] as f32 / 255.0; // Channel 2
    }

    Ok(Array4::from_shape_vec((1, 3, h, w), out)?)
}
