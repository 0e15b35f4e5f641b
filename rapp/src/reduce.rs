//! 2x2 binary reduction and expansion (rank-1): shrink a binary image
//! by taking one representative bit per 2x2 block, or grow it back by
//! replicating each bit into a 2x2 block.

use crate::error::{RappError, RappResult};
use crate::image::{check_disjoint, BinImageMut, BinImageView};
use crate::pixel::{pixel_get_bin, pixel_set_bin};

/// `dst[x,y] = src[2x,2y]` (the top-left representative of each 2x2
/// block), rank-1 reduction. `dst` must be half `src`'s size in each
/// dimension (rounding down).
pub fn reduce_2x2_rank1_bin(dst: &mut BinImageMut, src: &BinImageView) -> RappResult {
    if dst.w != src.w / 2 || dst.h != src.h / 2 {
        return Err(RappError::BadSize);
    }
    let (dp, dlen) = dst.footprint();
    let (sp, slen) = src.footprint();
    check_disjoint(dp, dlen, sp, slen)?;
    crate::state::check_initialized()?;

    for y in 0..dst.h {
        let w = dst.w;
        let doff = dst.off as usize;
        let soff = src.off as usize;
        let srow = src.row(2 * y).to_vec();
        let drow = dst.row_mut(y);
        for x in 0..w {
            let v = pixel_get_bin(&srow, soff + 2 * x);
            pixel_set_bin(drow, doff + x, v);
        }
    }
    Ok(())
}

/// Inverse of [`reduce_2x2_rank1_bin`]: replicates each source bit
/// into a 2x2 block of `dst`. `dst` must be exactly twice `src`'s size
/// in each dimension.
pub fn expand_2x2_bin(dst: &mut BinImageMut, src: &BinImageView) -> RappResult {
    if dst.w != src.w * 2 || dst.h != src.h * 2 {
        return Err(RappError::BadSize);
    }
    let (dp, dlen) = dst.footprint();
    let (sp, slen) = src.footprint();
    check_disjoint(dp, dlen, sp, slen)?;
    crate::state::check_initialized()?;

    for y in 0..src.h {
        let sw = src.w;
        let doff = dst.off as usize;
        let soff = src.off as usize;
        let srow = src.row(y).to_vec();
        for row_pair in 0..2 {
            let drow = dst.row_mut(2 * y + row_pair);
            for x in 0..sw {
                let v = pixel_get_bin(&srow, soff + x);
                pixel_set_bin(drow, doff + 2 * x, v);
                pixel_set_bin(drow, doff + 2 * x + 1, v);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::{align, AlignedBuffer};

    #[test]
    fn reduce_then_expand_preserves_uniform_blocks() {
        crate::state::initialize();
        let w = 8;
        let h = 4;
        let dim = align((w + 7) / 8);
        let mut sbuf = AlignedBuffer::new(dim * h).unwrap();
        // Set every 2x2 block uniformly so the round-trip is exact.
        for y in 0..h {
            let row = &mut sbuf.as_mut_slice()[y * dim..y * dim + dim];
            for x in 0..w {
                let block_on = ((x / 2) + (y / 2)) % 2 == 0;
                pixel_set_bin(row, x, block_on as u8);
            }
        }
        let src = BinImageView::new(sbuf.as_slice(), dim, 0, w, h).unwrap();

        let rdim = align(((w / 2) + 7) / 8);
        let mut rbuf = AlignedBuffer::new(rdim * (h / 2)).unwrap();
        let mut reduced = BinImageMut::new(rbuf.as_mut_slice(), rdim, 0, w / 2, h / 2).unwrap();
        reduce_2x2_rank1_bin(&mut reduced, &src).unwrap();

        let mut ebuf = AlignedBuffer::new(dim * h).unwrap();
        let mut expanded = BinImageMut::new(ebuf.as_mut_slice(), dim, 0, w, h).unwrap();
        expand_2x2_bin(&mut expanded, &reduced.as_view()).unwrap();

        for y in 0..h {
            let srow = src.row(y).to_vec();
            let erow = expanded.row(y);
            for x in 0..w {
                assert_eq!(
                    pixel_get_bin(&srow, x),
                    pixel_get_bin(erow, x),
                    "x={x} y={y}"
                );
            }
        }
    }
}
