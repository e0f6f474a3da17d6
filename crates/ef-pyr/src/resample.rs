use ef_core::{map_index, BorderMode, Image, ImageView, Rgb32};

/// Normalized 5-tap binomial low-pass kernel.
const KERNEL: [f32; 5] = [
    1.0 / 16.0,
    4.0 / 16.0,
    6.0 / 16.0,
    4.0 / 16.0,
    1.0 / 16.0,
];

const BORDER: BorderMode = BorderMode::Reflect101;

#[inline]
pub(crate) fn half_dim(n: usize) -> usize {
    (n + 1) / 2
}

#[inline]
fn valid_up_dim(src: usize, dst: usize) -> bool {
    dst == 2 * src || dst + 1 == 2 * src
}

/// Low-pass filters and halves a scalar image (round-up halving).
pub fn pyr_down_f32(src: &ImageView<'_, f32>) -> Image<f32> {
    let (sw, sh) = (src.width(), src.height());
    let (dw, dh) = (half_dim(sw), half_dim(sh));
    let mut dst = Image::new_fill(dw, dh, 0.0f32);
    if sw == 0 || sh == 0 {
        return dst;
    }

    // Horizontal pass: dw x sh.
    let mut tmp = vec![0.0f32; dw * sh];
    for y in 0..sh {
        let row = src.row(y);
        let out_row = &mut tmp[y * dw..(y + 1) * dw];
        for (p, out) in out_row.iter_mut().enumerate() {
            let mut acc = 0.0f32;
            for (k, &kv) in KERNEL.iter().enumerate() {
                let idx = map_index(2 * p as isize + k as isize - 2, sw, BORDER);
                acc += row[idx] * kv;
            }
            *out = acc;
        }
    }

    // Vertical pass: dw x dh.
    let out = dst.data_mut();
    for q in 0..dh {
        let out_row = &mut out[q * dw..(q + 1) * dw];
        for (k, &kv) in KERNEL.iter().enumerate() {
            let sy = map_index(2 * q as isize + k as isize - 2, sh, BORDER);
            let tmp_row = &tmp[sy * dw..(sy + 1) * dw];
            for (o, &t) in out_row.iter_mut().zip(tmp_row.iter()) {
                *o += t * kv;
            }
        }
    }

    dst
}

/// Low-pass filters and halves an RGB image (round-up halving).
pub fn pyr_down_rgb(src: &ImageView<'_, Rgb32>) -> Image<Rgb32> {
    let (sw, sh) = (src.width(), src.height());
    let (dw, dh) = (half_dim(sw), half_dim(sh));
    let mut dst = Image::new_fill(dw, dh, [0.0f32; 3]);
    if sw == 0 || sh == 0 {
        return dst;
    }

    let mut tmp = vec![[0.0f32; 3]; dw * sh];
    for y in 0..sh {
        let row = src.row(y);
        let out_row = &mut tmp[y * dw..(y + 1) * dw];
        for (p, out) in out_row.iter_mut().enumerate() {
            let mut acc = [0.0f32; 3];
            for (k, &kv) in KERNEL.iter().enumerate() {
                let px = &row[map_index(2 * p as isize + k as isize - 2, sw, BORDER)];
                for c in 0..3 {
                    acc[c] += px[c] * kv;
                }
            }
            *out = acc;
        }
    }

    let out = dst.data_mut();
    for q in 0..dh {
        let out_row = &mut out[q * dw..(q + 1) * dw];
        for (k, &kv) in KERNEL.iter().enumerate() {
            let sy = map_index(2 * q as isize + k as isize - 2, sh, BORDER);
            let tmp_row = &tmp[sy * dw..(sy + 1) * dw];
            for (o, t) in out_row.iter_mut().zip(tmp_row.iter()) {
                for c in 0..3 {
                    o[c] += t[c] * kv;
                }
            }
        }
    }

    dst
}

/// Doubles a scalar image to an explicit `(dst_w, dst_h)` target size.
///
/// The target must satisfy `dst == 2 * src` or `dst == 2 * src - 1` per
/// axis; the closed forms below are the zero-insertion transpose of
/// [`KERNEL`] with unit DC gain per axis.
pub fn pyr_up_f32(src: &ImageView<'_, f32>, dst_w: usize, dst_h: usize) -> Image<f32> {
    let (sw, sh) = (src.width(), src.height());
    assert!(
        valid_up_dim(sw, dst_w) && valid_up_dim(sh, dst_h),
        "pyr_up target {dst_w}x{dst_h} is not an upsampling of {sw}x{sh}"
    );

    // Horizontal pass: dst_w x sh.
    let mut tmp = vec![0.0f32; dst_w * sh];
    for y in 0..sh {
        let row = src.row(y);
        up_axis_f32(row, &mut tmp[y * dst_w..(y + 1) * dst_w]);
    }

    // Vertical pass: dst_w x dst_h.
    let mut dst = Image::new_fill(dst_w, dst_h, 0.0f32);
    let out = dst.data_mut();
    for j in 0..dst_h {
        let p = j / 2;
        let out_row = &mut out[j * dst_w..(j + 1) * dst_w];
        if j % 2 == 0 {
            let pm = map_index(p as isize - 1, sh, BORDER);
            let pp = map_index(p as isize + 1, sh, BORDER);
            for x in 0..dst_w {
                out_row[x] = (tmp[pm * dst_w + x]
                    + 6.0 * tmp[p * dst_w + x]
                    + tmp[pp * dst_w + x])
                    * 0.125;
            }
        } else {
            let pp = map_index(p as isize + 1, sh, BORDER);
            for x in 0..dst_w {
                out_row[x] = (tmp[p * dst_w + x] + tmp[pp * dst_w + x]) * 0.5;
            }
        }
    }

    dst
}

/// Doubles an RGB image to an explicit `(dst_w, dst_h)` target size.
pub fn pyr_up_rgb(src: &ImageView<'_, Rgb32>, dst_w: usize, dst_h: usize) -> Image<Rgb32> {
    let (sw, sh) = (src.width(), src.height());
    assert!(
        valid_up_dim(sw, dst_w) && valid_up_dim(sh, dst_h),
        "pyr_up target {dst_w}x{dst_h} is not an upsampling of {sw}x{sh}"
    );

    let mut tmp = vec![[0.0f32; 3]; dst_w * sh];
    for y in 0..sh {
        let row = src.row(y);
        up_axis_rgb(row, &mut tmp[y * dst_w..(y + 1) * dst_w]);
    }

    let mut dst = Image::new_fill(dst_w, dst_h, [0.0f32; 3]);
    let out = dst.data_mut();
    for j in 0..dst_h {
        let p = j / 2;
        let out_row = &mut out[j * dst_w..(j + 1) * dst_w];
        if j % 2 == 0 {
            let pm = map_index(p as isize - 1, sh, BORDER);
            let pp = map_index(p as isize + 1, sh, BORDER);
            for (x, o) in out_row.iter_mut().enumerate() {
                for c in 0..3 {
                    o[c] = (tmp[pm * dst_w + x][c]
                        + 6.0 * tmp[p * dst_w + x][c]
                        + tmp[pp * dst_w + x][c])
                        * 0.125;
                }
            }
        } else {
            let pp = map_index(p as isize + 1, sh, BORDER);
            for (x, o) in out_row.iter_mut().enumerate() {
                for c in 0..3 {
                    o[c] = (tmp[p * dst_w + x][c] + tmp[pp * dst_w + x][c]) * 0.5;
                }
            }
        }
    }

    dst
}

fn up_axis_f32(src: &[f32], dst: &mut [f32]) {
    let n = src.len();
    for (j, out) in dst.iter_mut().enumerate() {
        let p = j / 2;
        if j % 2 == 0 {
            let pm = map_index(p as isize - 1, n, BORDER);
            let pp = map_index(p as isize + 1, n, BORDER);
            *out = (src[pm] + 6.0 * src[p] + src[pp]) * 0.125;
        } else {
            let pp = map_index(p as isize + 1, n, BORDER);
            *out = (src[p] + src[pp]) * 0.5;
        }
    }
}

fn up_axis_rgb(src: &[Rgb32], dst: &mut [Rgb32]) {
    let n = src.len();
    for (j, out) in dst.iter_mut().enumerate() {
        let p = j / 2;
        if j % 2 == 0 {
            let pm = map_index(p as isize - 1, n, BORDER);
            let pp = map_index(p as isize + 1, n, BORDER);
            for c in 0..3 {
                out[c] = (src[pm][c] + 6.0 * src[p][c] + src[pp][c]) * 0.125;
            }
        } else {
            let pp = map_index(p as isize + 1, n, BORDER);
            for c in 0..3 {
                out[c] = (src[p][c] + src[pp][c]) * 0.5;
            }
        }
    }
}
