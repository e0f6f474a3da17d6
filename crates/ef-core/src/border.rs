#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderMode {
    Clamp,
    Reflect101,
}

/// Maps a possibly out-of-range index into `0..len`.
///
/// `len` must be non-zero; every index maps for both modes.
pub fn map_index(i: isize, len: usize, mode: BorderMode) -> usize {
    debug_assert!(len > 0, "map_index requires a non-empty axis");
    match mode {
        BorderMode::Clamp => {
            if i < 0 {
                0
            } else {
                (i as usize).min(len - 1)
            }
        }
        BorderMode::Reflect101 => {
            if len == 1 {
                return 0;
            }

            let period = (2 * len - 2) as isize;
            let r = i.rem_euclid(period) as usize;
            if r < len {
                r
            } else {
                (2 * len - 2) - r
            }
        }
    }
}
