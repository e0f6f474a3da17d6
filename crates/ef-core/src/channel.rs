use crate::{Error, Image, ImageView};

/// One RGB pixel with normalized `[0, 1]` channel values.
pub type Rgb32 = [f32; 3];

const U8_SCALE: f32 = 1.0 / 255.0;

/// Builds a normalized RGB image from interleaved 8-bit RGB bytes.
///
/// `data` must hold exactly `width * height * 3` bytes.
pub fn rgb_from_u8(width: usize, height: usize, data: &[u8]) -> Result<Image<Rgb32>, Error> {
    let pixels = width.checked_mul(height).ok_or(Error::SizeMismatch {
        expected: usize::MAX,
        actual: data.len(),
    })?;
    let expected = pixels.checked_mul(3).ok_or(Error::SizeMismatch {
        expected: usize::MAX,
        actual: data.len(),
    })?;

    if data.len() != expected {
        return Err(Error::SizeMismatch {
            expected,
            actual: data.len(),
        });
    }

    let mut out = Vec::with_capacity(pixels);
    for px in data.chunks_exact(3) {
        out.push([
            px[0] as f32 * U8_SCALE,
            px[1] as f32 * U8_SCALE,
            px[2] as f32 * U8_SCALE,
        ]);
    }

    Image::from_vec(width, height, out)
}

/// Rescales a normalized RGB image to interleaved 8-bit RGB bytes.
///
/// Values are multiplied by 255 and clamped at the cast; fusion output may
/// leave `[0, 1]` and the clamp belongs to this encoding boundary.
pub fn rgb_to_u8(src: &ImageView<'_, Rgb32>) -> Vec<u8> {
    let mut out = Vec::with_capacity(src.width() * src.height() * 3);
    for y in 0..src.height() {
        for px in src.row(y) {
            for c in 0..3 {
                out.push((px[c] * 255.0).round().clamp(0.0, 255.0) as u8);
            }
        }
    }
    out
}

/// Splits an RGB image into three scalar channel planes, in R, G, B order.
pub fn split_channels(src: &ImageView<'_, Rgb32>) -> [Image<f32>; 3] {
    let mut planes = [
        Vec::with_capacity(src.width() * src.height()),
        Vec::with_capacity(src.width() * src.height()),
        Vec::with_capacity(src.width() * src.height()),
    ];

    for y in 0..src.height() {
        for px in src.row(y) {
            for (plane, &v) in planes.iter_mut().zip(px.iter()) {
                plane.push(v);
            }
        }
    }

    planes.map(|plane| {
        Image::from_vec(src.width(), src.height(), plane)
            .expect("plane length matches source dimensions")
    })
}

/// Interleaves three scalar channel planes back into an RGB image.
pub fn merge_channels(
    r: &ImageView<'_, f32>,
    g: &ImageView<'_, f32>,
    b: &ImageView<'_, f32>,
) -> Result<Image<Rgb32>, Error> {
    let expected = (r.width(), r.height());
    for plane in [g, b] {
        let actual = (plane.width(), plane.height());
        if actual != expected {
            return Err(Error::DimensionMismatch { expected, actual });
        }
    }

    let mut out = Vec::with_capacity(r.width() * r.height());
    for y in 0..r.height() {
        let (rr, gr, br) = (r.row(y), g.row(y), b.row(y));
        for x in 0..r.width() {
            out.push([rr[x], gr[x], br[x]]);
        }
    }

    Image::from_vec(r.width(), r.height(), out)
}

/// Converts RGB to grayscale with the Rec.601 luma weights.
pub fn to_luma(src: &ImageView<'_, Rgb32>) -> Image<f32> {
    let mut out = Vec::with_capacity(src.width() * src.height());
    for y in 0..src.height() {
        for px in src.row(y) {
            out.push(0.299 * px[0] + 0.587 * px[1] + 0.114 * px[2]);
        }
    }

    Image::from_vec(src.width(), src.height(), out)
        .expect("luma length matches source dimensions")
}
