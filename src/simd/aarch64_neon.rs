#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

use super::BaseTally;

#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
pub unsafe fn count_gc_n_neon(seq: &[u8]) -> BaseTally {
    let mut gc = 0u64;
    let mut n = 0u64;
    let mut i = 0usize;
    let len = seq.len();

    let upper_mask = vdupq_n_u8(0xDF);
    let vc = vdupq_n_u8(b'C');
    let vg = vdupq_n_u8(b'G');
    let vn = vdupq_n_u8(b'N');
    let ones = vdupq_n_u8(1);

    while i + 16 <= len {
        let v = unsafe { vld1q_u8(seq.as_ptr().add(i)) };
        let v = vandq_u8(v, upper_mask);

        let is_gc = vorrq_u8(vceqq_u8(v, vc), vceqq_u8(v, vg));
        let is_n = vceqq_u8(v, vn);

        gc += vaddvq_u8(vandq_u8(is_gc, ones)) as u64;
        n += vaddvq_u8(vandq_u8(is_n, ones)) as u64;

        i += 16;
    }

    let tail = super::scalar::count_gc_n(&seq[i..]);
    BaseTally {
        gc: gc + tail.gc,
        n: n + tail.n,
    }
}
