//! Bit-packed binary and 8-bit raster processing primitives.
//!
//! This crate is a from-scratch compute layer: a set of pure,
//! re-entrant kernels over raw pixel buffers (bit-packed binary or
//! byte-per-pixel 8-bit), plus a pluggable SIMD vector backend so the
//! same kernel source monomorphizes to scalar, SSE2, or NEON code
//! depending on what's compiled in.
//!
//! # Layout
//!
//! - [`backend`] — the `Backend` trait and its scalar/SSE2/NEON
//!   implementations; [`backend::Native`] is whichever one matches the
//!   target and enabled features.
//! - [`image`] — borrowed view/mut wrappers over caller-owned buffers
//!   (`U8ImageView`/`U8ImageMut`/`BinImageView`/`BinImageMut`), and the
//!   alignment/overlap checks every entry point runs first.
//! - [`alloc`] — the fixed alignment kernels assume, and an aligned
//!   buffer type for callers who don't already have one.
//! - [`bitblt`] — the word-at-a-time bit-blit combinator
//!   ([`bitblt::RasterOp`]) that several higher-level modules build on.
//! - [`pixel`], [`pixop`], [`thresh`], [`convert`], [`reduce`],
//!   [`rotate`], [`pad`], [`filter`] — per-pixel and whole-image
//!   primitives, including the named fixed-kernel convolutions.
//! - [`morph`] — rectangle/diamond/octagon/disc dilation and erosion,
//!   decomposed into the `bitblt` combinator rather than a sliding
//!   window.
//! - [`cond`] — gather/scatter through a binary selection map.
//! - [`contour`], [`rasterize`] — chain-code tracing and the inverse
//!   (line rasterization to chain code).
//! - [`fill`] — explicit-stack flood fill.
//! - [`stat`], [`moment`], [`integral`] — reductions over whole images.
//! - [`state`] — the one piece of process-wide mutable state this
//!   crate has: the initialize/terminate flag.
//! - [`error`] — the closed error taxonomy every entry point's
//!   prologue can fail with.
//! - [`ffi`] — `extern "C"` shell around a representative subset of the
//!   above, for callers embedding this as a C library.
//!
//! # Concurrency
//!
//! Other than [`state::initialize`]/[`state::terminate`], nothing in
//! this crate touches global state. Every compute function is a pure
//! function of its arguments: two threads calling the same function on
//! disjoint buffers never need to synchronize with each other, and
//! this crate never spawns threads or schedules work itself. Choosing
//! a parallelization strategy (if any) is left entirely to the caller.

pub mod alloc;
pub mod backend;
pub mod bitblt;
pub mod cond;
pub mod contour;
pub mod convert;
pub mod error;
pub mod fill;
pub mod ffi;
pub mod filter;
pub mod image;
pub mod integral;
pub mod moment;
pub mod morph;
pub mod pad;
pub mod pixel;
pub mod pixop;
pub mod rasterize;
pub mod reduce;
#[cfg(test)]
mod reference;
pub mod rotate;
pub mod stat;
pub mod state;
pub mod thresh;
