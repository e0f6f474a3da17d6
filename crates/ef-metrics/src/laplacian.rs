use ef_core::{map_index, BorderMode, Image, ImageView};

/// Discrete 3x3 Laplacian (4-neighbor second-derivative stencil).
///
/// Kernel:
/// ```text
/// 0  1  0
/// 1 -4  1
/// 0  1  0
/// ```
pub fn laplacian_3x3(src: &ImageView<'_, f32>, border: BorderMode) -> Image<f32> {
    let w = src.width();
    let h = src.height();
    let mut out = Image::new_fill(w, h, 0.0f32);
    if w == 0 || h == 0 {
        return out;
    }

    let dst = out.data_mut();
    for y in 0..h {
        let ym1 = map_index(y as isize - 1, h, border);
        let yp1 = map_index(y as isize + 1, h, border);
        let r_up = src.row(ym1);
        let r_mid = src.row(y);
        let r_dn = src.row(yp1);
        let dst_row = &mut dst[y * w..(y + 1) * w];

        for (x, out_px) in dst_row.iter_mut().enumerate() {
            let xm1 = map_index(x as isize - 1, w, border);
            let xp1 = map_index(x as isize + 1, w, border);
            *out_px = r_up[x] + r_dn[x] + r_mid[xm1] + r_mid[xp1] - 4.0 * r_mid[x];
        }
    }

    out
}
