use ef_core::{Error, Image, ImageView, Rgb32};

/// Wraps a 360° panorama horizontally before fusion.
///
/// The pad band is one image height wide on each side: the left pad holds
/// the rightmost `height` columns, the right pad the leftmost `height`
/// columns. Output width is `width + 2 * height`. Requires
/// `height <= width` so the wrapped bands exist.
pub fn add_circular_padding(src: &ImageView<'_, Rgb32>) -> Result<Image<Rgb32>, Error> {
    let width = src.width();
    let height = src.height();
    if height == 0 || height > width {
        return Err(Error::PanoramaGeometry { width, height });
    }

    let pad = height;
    let mut out = Image::new_fill(width + 2 * pad, height, [0.0f32; 3]);
    for y in 0..height {
        let src_row = src.row(y);
        let dst_row = out.row_mut(y);
        dst_row[..pad].copy_from_slice(&src_row[width - pad..]);
        dst_row[pad..pad + width].copy_from_slice(src_row);
        dst_row[pad + width..].copy_from_slice(&src_row[..pad]);
    }

    Ok(out)
}

/// Recovers the panorama band from a fused, padded image.
///
/// Takes the center band starting at column `height`, `2 * height` columns
/// wide — the unpadded extent of a 2:1 panorama. Requires
/// `3 * height <= width`.
pub fn crop_panorama(fused: &ImageView<'_, Rgb32>) -> Result<Image<Rgb32>, Error> {
    let width = fused.width();
    let height = fused.height();
    let crop_w = 2 * height;
    if height == 0 || height + crop_w > width {
        return Err(Error::PanoramaGeometry { width, height });
    }

    let band = fused.subview(height, 0, crop_w, height)?;
    Ok(band.to_image())
}

#[cfg(test)]
mod tests {
    use ef_core::{Image, Rgb32};

    use super::{add_circular_padding, crop_panorama};

    fn column_coded(width: usize, height: usize) -> Image<Rgb32> {
        let mut data = Vec::with_capacity(width * height);
        for _y in 0..height {
            for x in 0..width {
                data.push([x as f32, 0.0, 0.0]);
            }
        }
        Image::from_vec(width, height, data).expect("valid image")
    }

    #[test]
    fn padding_wraps_opposite_edges() {
        let src = column_coded(8, 4);
        let padded = add_circular_padding(&src.as_view()).expect("feasible geometry");

        assert_eq!(padded.width(), 8 + 2 * 4);
        assert_eq!(padded.height(), 4);

        let row = padded.row(2);
        // Left pad: rightmost 4 source columns.
        for (i, px) in row[..4].iter().enumerate() {
            assert_eq!(px[0], (4 + i) as f32);
        }
        // Center: the source itself.
        for (i, px) in row[4..12].iter().enumerate() {
            assert_eq!(px[0], i as f32);
        }
        // Right pad: leftmost 4 source columns.
        for (i, px) in row[12..].iter().enumerate() {
            assert_eq!(px[0], i as f32);
        }
    }

    #[test]
    fn padding_rejects_tall_images() {
        let src = column_coded(4, 8);
        assert!(add_circular_padding(&src.as_view()).is_err());
    }

    #[test]
    fn crop_recovers_center_band() {
        let padded = column_coded(16, 4);
        let cropped = crop_panorama(&padded.as_view()).expect("feasible geometry");

        assert_eq!(cropped.width(), 8);
        assert_eq!(cropped.height(), 4);
        for y in 0..4 {
            for (i, px) in cropped.row(y).iter().enumerate() {
                assert_eq!(px[0], (4 + i) as f32);
            }
        }
    }

    #[test]
    fn crop_rejects_narrow_images() {
        let img = column_coded(8, 4);
        assert!(crop_panorama(&img.as_view()).is_err());
    }

    #[test]
    fn pad_then_crop_preserves_two_to_one_geometry() {
        let src = column_coded(8, 4);
        let padded = add_circular_padding(&src.as_view()).expect("feasible geometry");
        let cropped = crop_panorama(&padded.as_view()).expect("feasible geometry");

        assert_eq!(cropped.width(), src.width());
        assert_eq!(cropped.height(), src.height());
        assert_eq!(cropped, src);
    }
}
