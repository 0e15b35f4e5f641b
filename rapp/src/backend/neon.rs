//! The aarch64 NEON backend, a 16-byte vector width. Like SSE2, NEON
//! has a native unaligned load/store, so the `UnalignedCursor`
//! protocol in [`crate::backend`] collapses to a direct
//! [`Backend::load`] per the design notes; it is kept in the generic
//! path for architectural uniformity with the MMX/AltiVec-style
//! backends that actually need the shift-and-combine form.

use core::arch::aarch64::*;

use super::Backend;

#[derive(Debug, Clone, Copy)]
pub struct Neon;

impl Backend for Neon {
    type V = uint8x16_t;
    const VSIZE: usize = 16;
    const HINT_CMPGT: bool = true;
    const HINT_CMPGE: bool = true;
    const HINT_AVGR: bool = true;

    #[inline(always)]
    fn zero() -> uint8x16_t {
        unsafe { vdupq_n_u8(0) }
    }

    #[inline(always)]
    fn splat(byte: u8) -> uint8x16_t {
        unsafe { vdupq_n_u8(byte) }
    }

    #[inline(always)]
    unsafe fn load(ptr: *const u8) -> uint8x16_t {
        vld1q_u8(ptr)
    }

    #[inline(always)]
    unsafe fn store(ptr: *mut u8, v: uint8x16_t) {
        vst1q_u8(ptr, v)
    }

    #[inline(always)]
    fn not(v: uint8x16_t) -> uint8x16_t {
        unsafe { vmvnq_u8(v) }
    }
    #[inline(always)]
    fn and(a: uint8x16_t, b: uint8x16_t) -> uint8x16_t {
        unsafe { vandq_u8(a, b) }
    }
    #[inline(always)]
    fn or(a: uint8x16_t, b: uint8x16_t) -> uint8x16_t {
        unsafe { vorrq_u8(a, b) }
    }
    #[inline(always)]
    fn xor(a: uint8x16_t, b: uint8x16_t) -> uint8x16_t {
        unsafe { veorq_u8(a, b) }
    }
    #[inline(always)]
    fn andn(a: uint8x16_t, b: uint8x16_t) -> uint8x16_t {
        unsafe { vandq_u8(a, vmvnq_u8(b)) }
    }

    #[inline(always)]
    fn add_sat(a: uint8x16_t, b: uint8x16_t) -> uint8x16_t {
        unsafe { vqaddq_u8(a, b) }
    }
    #[inline(always)]
    fn sub_sat(a: uint8x16_t, b: uint8x16_t) -> uint8x16_t {
        unsafe { vqsubq_u8(a, b) }
    }
    #[inline(always)]
    fn min(a: uint8x16_t, b: uint8x16_t) -> uint8x16_t {
        unsafe { vminq_u8(a, b) }
    }
    #[inline(always)]
    fn max(a: uint8x16_t, b: uint8x16_t) -> uint8x16_t {
        unsafe { vmaxq_u8(a, b) }
    }
    #[inline(always)]
    fn absdiff(a: uint8x16_t, b: uint8x16_t) -> uint8x16_t {
        unsafe { vabdq_u8(a, b) }
    }
    #[inline(always)]
    fn cmpgt(a: uint8x16_t, b: uint8x16_t) -> uint8x16_t {
        unsafe { vcgtq_u8(a, b) }
    }
    #[inline(always)]
    fn cmpge(a: uint8x16_t, b: uint8x16_t) -> uint8x16_t {
        unsafe { vcgeq_u8(a, b) }
    }
    #[inline(always)]
    fn avg_round(a: uint8x16_t, b: uint8x16_t) -> uint8x16_t {
        unsafe { vrhaddq_u8(a, b) }
    }
    #[inline(always)]
    fn avg_trunc(a: uint8x16_t, b: uint8x16_t) -> uint8x16_t {
        unsafe { vhaddq_u8(a, b) }
    }

    fn to_bits(v: uint8x16_t) -> u128 {
        let mut raw = [0u8; 16];
        unsafe { vst1q_u8(raw.as_mut_ptr(), v) };
        u128::from_le_bytes(raw)
    }

    fn from_bits(bits: u128) -> uint8x16_t {
        let raw = bits.to_le_bytes();
        unsafe { vld1q_u8(raw.as_ptr()) }
    }
}
