//! `extern "C"` shell over a representative subset of the compute
//! layer, for embedding this crate as a drop-in C library.
//!
//! Every wrapper here does three things and nothing else: validate raw
//! pointers/sizes into the safe [`crate::image`] view types, call
//! straight into the Rust entry point, and flatten the `Result` back
//! into the numeric convention the rest of this module documents. No
//! kernel logic lives here.
//!
//! # Conventions
//!
//! - Dimensions (`w`, `h`, `dim`, `rows`) are passed as `i32` (never
//!   negative in a well-formed call) and cast to `usize` internally;
//!   a negative value is rejected as [`crate::error::RappError::BadSize`].
//! - Every fallible call returns `0` on success and a negative
//!   [`crate::error::RappError::code`] on failure. Callers that need the
//!   human-readable reason pass the code to [`rapp_error_string`].
//! - Buffer arguments are raw pointers the caller owns; this module
//!   never frees or retains them past the call. [`rapp_alloc`] and
//!   [`rapp_free`] are provided for callers who want this crate to own
//!   the allocation too, mirroring [`crate::alloc::AlignedBuffer`].
//!
//! # Safety
//!
//! Every `pub extern "C"` function here is `unsafe`: callers must pass
//! pointers that are either null or valid for the stated length, with
//! no other live reference to the same memory for the duration of the
//! call (the [`crate::image::check_disjoint`] checks the safe layer
//! performs only catch overlap *between arguments*, not aliasing with
//! memory the caller holds elsewhere).

use std::os::raw::{c_int, c_uchar};
use std::slice;

use crate::error::RappError;
use crate::image::{BinImageMut, BinImageView, U8ImageMut, U8ImageView};

fn code_of(r: crate::error::RappResult) -> c_int {
    match r {
        Ok(()) => 0,
        Err(e) => e.code(),
    }
}

unsafe fn slice_or<'a>(ptr: *const c_uchar, len: usize) -> Result<&'a [u8], RappError> {
    if ptr.is_null() {
        return Err(RappError::NullPointer);
    }
    Ok(unsafe { slice::from_raw_parts(ptr, len) })
}

unsafe fn slice_mut_or<'a>(ptr: *mut c_uchar, len: usize) -> Result<&'a mut [u8], RappError> {
    if ptr.is_null() {
        return Err(RappError::NullPointer);
    }
    Ok(unsafe { slice::from_raw_parts_mut(ptr, len) })
}

fn dims(w: c_int, h: c_int) -> Result<(usize, usize), RappError> {
    if w <= 0 || h <= 0 {
        return Err(RappError::BadSize);
    }
    Ok((w as usize, h as usize))
}

/// Process-wide initialization. See [`crate::state::initialize`].
#[no_mangle]
pub extern "C" fn rapp_initialize() {
    crate::state::initialize();
}

/// Process-wide teardown. See [`crate::state::terminate`].
#[no_mangle]
pub extern "C" fn rapp_terminate() {
    crate::state::terminate();
}

/// A stable, null-terminated-by-the-caller description of an error
/// code, mirroring [`RappError::describe`]. Returns an empty string
/// for an unrecognised code.
#[no_mangle]
pub extern "C" fn rapp_error_string(code: c_int, out: *mut c_uchar, out_len: usize) -> c_int {
    let text = RappError::from_code(code).map(RappError::describe).unwrap_or("");
    if out.is_null() {
        return RappError::NullPointer.code();
    }
    // SAFETY: caller guarantees `out` is valid for `out_len` bytes.
    let dst = unsafe { slice::from_raw_parts_mut(out, out_len) };
    let n = text.len().min(dst.len());
    dst[..n].copy_from_slice(&text.as_bytes()[..n]);
    n as c_int
}

/// Allocate an [`crate::alloc::ALIGNMENT`]-aligned, zeroed buffer of at
/// least `size` bytes. Returns null on failure. Must be released with
/// [`rapp_free`], never with a foreign `free`.
#[no_mangle]
pub extern "C" fn rapp_alloc(size: usize) -> *mut c_uchar {
    match crate::alloc::AlignedBuffer::new(size) {
        Ok(mut buf) => {
            let ptr = buf.as_mut_ptr();
            std::mem::forget(buf);
            ptr
        }
        Err(_) => std::ptr::null_mut(),
    }
}

/// Frees a buffer obtained from [`rapp_alloc`]. `len` must be the exact
/// `size` originally requested (rounded internally, but the rounding
/// is deterministic from `size` alone via [`crate::alloc::align`]).
/// Passing null is a no-op.
#[no_mangle]
pub extern "C" fn rapp_free(ptr: *mut c_uchar, len: usize) {
    if ptr.is_null() || len == 0 {
        return;
    }
    let rounded = crate::alloc::align(len);
    let layout = std::alloc::Layout::from_size_align(rounded, crate::alloc::ALIGNMENT)
        .expect("layout matches rapp_alloc's rounding");
    // SAFETY: caller guarantees `ptr` came from `rapp_alloc(len)` and
    // has not already been freed.
    unsafe { std::alloc::dealloc(ptr, layout) };
}

/// Combines `dst` and `src` in place with `op` (one of
/// [`crate::bitblt::RasterOp`]'s numeric discriminants), both bit-packed
/// binary rasters of `w x h` at bit offset 0.
#[no_mangle]
pub extern "C" fn rapp_bitblt_bin(
    dst: *mut c_uchar,
    dst_dim: c_int,
    src: *const c_uchar,
    src_dim: c_int,
    w: c_int,
    h: c_int,
    op: c_int,
) -> c_int {
    let result: Result<(), RappError> = (|| {
        let (w, h) = dims(w, h)?;
        if dst_dim <= 0 || src_dim <= 0 {
            return Err(RappError::BadSize);
        }
        let raster_op = match op {
            0 => crate::bitblt::RasterOp::Copy,
            1 => crate::bitblt::RasterOp::Not,
            2 => crate::bitblt::RasterOp::And,
            3 => crate::bitblt::RasterOp::Or,
            4 => crate::bitblt::RasterOp::Xor,
            5 => crate::bitblt::RasterOp::Nand,
            6 => crate::bitblt::RasterOp::Nor,
            7 => crate::bitblt::RasterOp::Xnor,
            8 => crate::bitblt::RasterOp::Andn,
            9 => crate::bitblt::RasterOp::Orn,
            10 => crate::bitblt::RasterOp::Nandn,
            11 => crate::bitblt::RasterOp::Norn,
            _ => return Err(RappError::BadParameter),
        };
        let dst_dim = dst_dim as usize;
        let src_dim = src_dim as usize;
        let dst_buf = unsafe { slice_mut_or(dst, dst_dim * h) }?;
        let src_buf = unsafe { slice_or(src, src_dim * h) }?;
        let mut dst_view = BinImageMut::new(dst_buf, dst_dim, 0, w, h)?;
        let src_view = BinImageView::new(src_buf, src_dim, 0, w, h)?;
        crate::bitblt::bitblt_bin_native(&mut dst_view, &src_view, w, h, raster_op)
    })();
    code_of(result)
}

/// Caller-supplied work buffer must be at least
/// [`crate::morph::worksize_bin_raw`]`(dim, rows)` bytes.
#[no_mangle]
pub extern "C" fn rapp_dilate_rect_bin(
    dst: *mut c_uchar,
    src: *const c_uchar,
    work: *mut c_uchar,
    dim: c_int,
    rows: c_int,
    se_w: c_int,
    se_h: c_int,
) -> c_int {
    let result: Result<(), RappError> = (|| {
        if dim <= 0 || rows <= 0 || se_w <= 0 || se_h <= 0 {
            return Err(RappError::BadSize);
        }
        let (dim, rows) = (dim as usize, rows as usize);
        let len = dim * rows;
        let dst_buf = unsafe { slice_mut_or(dst, len) }?;
        let src_buf = unsafe { slice_or(src, len) }?;
        let work_buf = unsafe { slice_mut_or(work, crate::morph::worksize_bin_raw(dim, rows)) }?;
        crate::morph::dilate_rect_bin(dst_buf, src_buf, work_buf, dim, rows, se_w as usize, se_h as usize)
    })();
    code_of(result)
}

#[no_mangle]
pub extern "C" fn rapp_erode_rect_bin(
    dst: *mut c_uchar,
    src: *const c_uchar,
    work: *mut c_uchar,
    dim: c_int,
    rows: c_int,
    se_w: c_int,
    se_h: c_int,
) -> c_int {
    let result: Result<(), RappError> = (|| {
        if dim <= 0 || rows <= 0 || se_w <= 0 || se_h <= 0 {
            return Err(RappError::BadSize);
        }
        let (dim, rows) = (dim as usize, rows as usize);
        let len = dim * rows;
        let dst_buf = unsafe { slice_mut_or(dst, len) }?;
        let src_buf = unsafe { slice_or(src, len) }?;
        let work_buf = unsafe { slice_mut_or(work, crate::morph::worksize_bin_raw(dim, rows)) }?;
        crate::morph::erode_rect_bin(dst_buf, src_buf, work_buf, dim, rows, se_w as usize, se_h as usize)
    })();
    code_of(result)
}

/// Gathers `src[x,y]` wherever `map[x,y]` is set into `pack`, left to
/// right, top to bottom. `pack_len` is the capacity of `pack` in
/// bytes; returns the population gathered, or a negative error code.
#[no_mangle]
pub extern "C" fn rapp_gather_u8(
    pack: *mut c_uchar,
    pack_len: usize,
    src: *const c_uchar,
    src_dim: c_int,
    map: *const c_uchar,
    map_dim: c_int,
    w: c_int,
    h: c_int,
) -> c_int {
    let result: Result<usize, RappError> = (|| {
        let (w, h) = dims(w, h)?;
        if src_dim <= 0 || map_dim <= 0 {
            return Err(RappError::BadSize);
        }
        let pack_buf = unsafe { slice_mut_or(pack, pack_len) }?;
        let src_buf = unsafe { slice_or(src, src_dim as usize * h) }?;
        let map_buf = unsafe { slice_or(map, map_dim as usize * h) }?;
        let src_view = U8ImageView::new(src_buf, src_dim as usize, w, h)?;
        let map_view = BinImageView::new(map_buf, map_dim as usize, 0, w, h)?;
        crate::cond::gather_u8(pack_buf, &src_view, &map_view)
    })();
    match result {
        Ok(n) => n as c_int,
        Err(e) => e.code(),
    }
}

/// Population count of a bit-packed binary raster. See
/// [`crate::stat::stat_sum_bin`]. Returns a negative error code on
/// failure, otherwise the (always non-negative) pixel count.
#[no_mangle]
pub extern "C" fn rapp_stat_sum_bin(src: *const c_uchar, dim: c_int, w: c_int, h: c_int) -> i64 {
    let result: Result<u64, RappError> = (|| {
        let (w, h) = dims(w, h)?;
        if dim <= 0 {
            return Err(RappError::BadSize);
        }
        let dim = dim as usize;
        let src_buf = unsafe { slice_or(src, dim * h) }?;
        let view = BinImageView::new(src_buf, dim, 0, w, h)?;
        Ok(crate::stat::stat_sum_bin(&view))
    })();
    match result {
        Ok(n) => n as i64,
        Err(e) => e.code() as i64,
    }
}

/// Adds `src` into `dst` in place, saturating at 255 per pixel. See
/// [`crate::pixop::pixop_add_u8`].
#[no_mangle]
pub extern "C" fn rapp_pixop_add_u8(
    dst: *mut c_uchar,
    dst_dim: c_int,
    src: *const c_uchar,
    src_dim: c_int,
    w: c_int,
    h: c_int,
) -> c_int {
    let result: Result<(), RappError> = (|| {
        let (w, h) = dims(w, h)?;
        if dst_dim <= 0 || src_dim <= 0 {
            return Err(RappError::BadSize);
        }
        let (dst_dim, src_dim) = (dst_dim as usize, src_dim as usize);
        let dst_buf = unsafe { slice_mut_or(dst, dst_dim * h) }?;
        let src_buf = unsafe { slice_or(src, src_dim * h) }?;
        let mut dst_view = U8ImageMut::new(dst_buf, dst_dim, w, h)?;
        let src_view = U8ImageView::new(src_buf, src_dim, w, h)?;
        crate::pixop::pixop_add_u8(&mut dst_view, &src_view)
    })();
    code_of(result)
}
