//! Icon scaling arithmetic.
//!
//! Icons are resized by whole-number factors so small glyphs stay crisp: a
//! large image is subsampled by `max_dim / target`, a small one is zoomed by
//! `ceil(target / max_dim)`.  The result may therefore differ from `target`.

/// Returns the dimensions of a `width x height` image scaled towards `target`
/// pixels on its longer side.
pub fn scaled_size(width: u32, height: u32, target: u32) -> (u32, u32) {
    let max_dim = width.max(height);
    if max_dim == 0 || target == 0 {
        return (width, height);
    }

    if max_dim > target {
        let factor = (max_dim / target).max(1);
        ((width / factor).max(1), (height / factor).max(1))
    } else if max_dim < target {
        let factor = target.div_ceil(max_dim);
        (width * factor, height * factor)
    } else {
        (width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_size_is_unchanged() {
        assert_eq!(scaled_size(48, 48, 48), (48, 48));
        assert_eq!(scaled_size(26, 13, 26), (26, 13));
    }

    #[test]
    fn test_large_icon_is_subsampled_by_whole_factor() {
        // 512 / 48 = 10 (integer), 512 / 10 = 51
        assert_eq!(scaled_size(512, 512, 48), (51, 51));
        assert_eq!(scaled_size(96, 48, 48), (48, 24));
    }

    #[test]
    fn test_small_icon_is_zoomed_by_ceiling_factor() {
        assert_eq!(scaled_size(16, 16, 48), (48, 48));
        assert_eq!(scaled_size(20, 10, 48), (60, 30));
    }

    #[test]
    fn test_zero_dimension_is_left_alone() {
        assert_eq!(scaled_size(0, 0, 48), (0, 0));
        assert_eq!(scaled_size(10, 10, 0), (10, 10));
    }
}
