//! Naive per-pixel reference implementations, used by tests as the
//! ground truth that the vectorized/decomposed kernels elsewhere in
//! the crate must match byte-for-byte. Never used on a non-test code
//! path — clarity beats speed here by design.

use crate::image::{BinImageView, U8ImageView};
use crate::pixel::{pixel_get_bin, pixel_get_u8};

pub fn ref_pixop_add_u8(a: &U8ImageView, b: &U8ImageView) -> Vec<Vec<u8>> {
    (0..a.h)
        .map(|y| {
            (0..a.w)
                .map(|x| pixel_get_u8(a.row(y), x).saturating_add(pixel_get_u8(b.row(y), x)))
                .collect()
        })
        .collect()
}

pub fn ref_pixop_sub_u8(a: &U8ImageView, b: &U8ImageView) -> Vec<Vec<u8>> {
    (0..a.h)
        .map(|y| {
            (0..a.w)
                .map(|x| pixel_get_u8(a.row(y), x).saturating_sub(pixel_get_u8(b.row(y), x)))
                .collect()
        })
        .collect()
}

pub fn ref_stat_sum_bin(img: &BinImageView) -> u64 {
    let off = img.off as usize;
    let mut total = 0u64;
    for y in 0..img.h {
        let row = img.row(y).to_vec();
        for x in 0..img.w {
            total += pixel_get_bin(&row, off + x) as u64;
        }
    }
    total
}

/// Naive single-pixel-at-a-time dilation by an explicit structuring
/// element, the ground truth [`crate::morph::dilate_se_bin`]'s
/// constant-shift-bitblit implementation must match.
pub fn ref_dilate_points(get: impl Fn(i32, i32) -> bool, w: usize, h: usize, se: &[(i32, i32)]) -> Vec<Vec<bool>> {
    (0..h)
        .map(|y| {
            (0..w)
                .map(|x| se.iter().any(|&(dx, dy)| get(x as i32 + dx, y as i32 + dy)))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::{align, AlignedBuffer};
    use crate::pixop::pixop_add_u8;

    #[test]
    fn pixop_add_matches_reference_on_random_data() {
        crate::state::initialize();
        let w = 23;
        let h = 5;
        let dim = align(w);
        let mut abuf = AlignedBuffer::new(dim * h).unwrap();
        let mut bbuf = AlignedBuffer::new(dim * h).unwrap();
        for i in 0..dim * h {
            abuf.as_mut_slice()[i] = ((i * 37 + 11) % 256) as u8;
            bbuf.as_mut_slice()[i] = ((i * 53 + 7) % 256) as u8;
        }
        let a = U8ImageView::new(abuf.as_slice(), dim, w, h).unwrap();
        let b = U8ImageView::new(bbuf.as_slice(), dim, w, h).unwrap();
        let expected = ref_pixop_add_u8(&a, &b);

        let mut dbuf = AlignedBuffer::new(dim * h).unwrap();
        dbuf.as_mut_slice().copy_from_slice(abuf.as_slice());
        {
            let mut dst = crate::image::U8ImageMut::new(dbuf.as_mut_slice(), dim, w, h).unwrap();
            pixop_add_u8(&mut dst, &b).unwrap();
        }
        let dst_view = U8ImageView::new(dbuf.as_slice(), dim, w, h).unwrap();
        for y in 0..h {
            for x in 0..w {
                assert_eq!(pixel_get_u8(dst_view.row(y), x), expected[y][x], "x={x} y={y}");
            }
        }
    }

    #[test]
    fn generic_dilate_matches_reference_for_diamond() {
        crate::state::initialize();
        let w = 12;
        let h = 12;
        let dim = align(crate::image::row_bytes(w, 0));
        let mut buf = AlignedBuffer::new(dim * h).unwrap();
        crate::pixel::pixel_set_bin(&mut buf.as_mut_slice()[6 * dim..6 * dim + dim], 6, 1);
        let points = crate::morph::se::diamond_points(2);

        let src_snapshot = buf.as_slice().to_vec();
        let mut dst = vec![0u8; dim * h];
        crate::morph::dilate_se_bin(&mut dst, &src_snapshot, dim, h, &points).unwrap();

        let get = |x: i32, y: i32| {
            if x < 0 || y < 0 || x as usize >= w || y as usize >= h {
                false
            } else {
                pixel_get_bin(&src_snapshot[y as usize * dim..y as usize * dim + dim], x as usize) != 0
            }
        };
        let expected = ref_dilate_points(get, w, h, &points);
        for y in 0..h {
            for x in 0..w {
                let got = pixel_get_bin(&dst[y * dim..y * dim + dim], x) != 0;
                assert_eq!(got, expected[y][x], "x={x} y={y}");
            }
        }
    }
}
