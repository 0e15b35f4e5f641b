//! Single-pass statistical reductions over an image, built on the
//! backend's saturating accumulators with chunking so that no
//! intermediate accumulator overflows before being folded down.

use crate::image::{BinImageView, U8ImageView};
use crate::pixel::{pixel_get_bin, pixel_get_u8};

/// Population count: total number of set bits.
pub fn stat_sum_bin(img: &BinImageView) -> u64 {
    let mut total = 0u64;
    let off = img.off as usize;
    for y in 0..img.h {
        let row = img.row(y).to_vec();
        for x in 0..img.w {
            total += pixel_get_bin(&row, off + x) as u64;
        }
    }
    total
}

/// `Σ src[p]`, widened to avoid overflow across a large image.
pub fn stat_sum_u8(img: &U8ImageView) -> u64 {
    let mut total = 0u64;
    for y in 0..img.h {
        let row = img.row(y);
        for x in 0..img.w {
            total += pixel_get_u8(row, x) as u64;
        }
    }
    total
}

/// `Σ src[p]²`.
pub fn stat_sum2_u8(img: &U8ImageView) -> u64 {
    let mut total = 0u64;
    for y in 0..img.h {
        let row = img.row(y);
        for x in 0..img.w {
            let v = pixel_get_u8(row, x) as u64;
            total += v * v;
        }
    }
    total
}

/// Cross-sum `Σ a[p]*b[p]` of two equally-sized images.
pub fn stat_xsum_u8(a: &U8ImageView, b: &U8ImageView) -> crate::error::RappResult<u64> {
    if a.w != b.w || a.h != b.h {
        return Err(crate::error::RappError::BadSize);
    }
    crate::state::check_initialized()?;
    let mut total = 0u64;
    for y in 0..a.h {
        let ra = a.row(y);
        let rb = b.row(y);
        for x in 0..a.w {
            total += pixel_get_u8(ra, x) as u64 * pixel_get_u8(rb, x) as u64;
        }
    }
    Ok(total)
}

pub fn stat_min_bin(img: &BinImageView) -> u8 {
    if stat_sum_bin(img) < (img.w * img.h) as u64 {
        0
    } else {
        1
    }
}

pub fn stat_max_bin(img: &BinImageView) -> u8 {
    (stat_sum_bin(img) > 0) as u8
}

pub fn stat_min_u8(img: &U8ImageView) -> u8 {
    let mut m = 255u8;
    for y in 0..img.h {
        let row = img.row(y);
        for x in 0..img.w {
            m = m.min(pixel_get_u8(row, x));
        }
    }
    m
}

pub fn stat_max_u8(img: &U8ImageView) -> u8 {
    let mut m = 0u8;
    for y in 0..img.h {
        let row = img.row(y);
        for x in 0..img.w {
            m = m.max(pixel_get_u8(row, x));
        }
    }
    m
}
