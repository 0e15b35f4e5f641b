//! First- and second-order moments of a binary image's set pixels,
//! the basic building block for centroid/orientation estimation.

use crate::image::BinImageView;
use crate::pixel::pixel_get_bin;

/// `(N, Σx, Σy)` over set pixels.
pub fn moment_order1_bin(img: &BinImageView) -> (u64, i64, i64) {
    let mut n = 0u64;
    let mut sx = 0i64;
    let mut sy = 0i64;
    let off = img.off as usize;
    for y in 0..img.h {
        let row = img.row(y).to_vec();
        for x in 0..img.w {
            if pixel_get_bin(&row, off + x) != 0 {
                n += 1;
                sx += x as i64;
                sy += y as i64;
            }
        }
    }
    (n, sx, sy)
}

/// `(N, Σx, Σy, Σx², Σy², Σxy)` over set pixels.
pub fn moment_order2_bin(img: &BinImageView) -> (u64, i64, i64, i64, i64, i64) {
    let mut n = 0u64;
    let (mut sx, mut sy, mut sxx, mut syy, mut sxy) = (0i64, 0i64, 0i64, 0i64, 0i64);
    let off = img.off as usize;
    for y in 0..img.h {
        let row = img.row(y).to_vec();
        for x in 0..img.w {
            if pixel_get_bin(&row, off + x) != 0 {
                let (xi, yi) = (x as i64, y as i64);
                n += 1;
                sx += xi;
                sy += yi;
                sxx += xi * xi;
                syy += yi * yi;
                sxy += xi * yi;
            }
        }
    }
    (n, sx, sy, sxx, syy, sxy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::{align, AlignedBuffer};
    use crate::pixel::pixel_set_bin;

    #[test]
    fn single_pixel_moments() {
        let w = 8;
        let h = 8;
        let dim = align((w + 7) / 8);
        let mut buf = AlignedBuffer::new(dim * h).unwrap();
        pixel_set_bin(&mut buf.as_mut_slice()[3 * dim..3 * dim + dim], 5, 1);
        let img = BinImageView::new(buf.as_slice(), dim, 0, w, h).unwrap();
        assert_eq!(moment_order1_bin(&img), (1, 5, 3));
        assert_eq!(moment_order2_bin(&img), (1, 5, 3, 25, 9, 15));
    }
}
