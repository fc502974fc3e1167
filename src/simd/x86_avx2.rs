#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::BaseTally;

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
pub unsafe fn count_gc_n_avx2(seq: &[u8]) -> BaseTally {
    let mut gc = 0u64;
    let mut n = 0u64;
    let mut i = 0usize;
    let len = seq.len();

    let upper_mask = _mm256_set1_epi8(0xDFu8 as i8);
    let vc = _mm256_set1_epi8(b'C' as i8);
    let vg = _mm256_set1_epi8(b'G' as i8);
    let vn = _mm256_set1_epi8(b'N' as i8);

    while i + 32 <= len {
        let ptr = unsafe { seq.as_ptr().add(i) as *const __m256i };
        let v = _mm256_and_si256(unsafe { _mm256_loadu_si256(ptr) }, upper_mask);
        let is_gc = _mm256_or_si256(_mm256_cmpeq_epi8(v, vc), _mm256_cmpeq_epi8(v, vg));
        let is_n = _mm256_cmpeq_epi8(v, vn);
        gc += (_mm256_movemask_epi8(is_gc) as u32).count_ones() as u64;
        n += (_mm256_movemask_epi8(is_n) as u32).count_ones() as u64;
        i += 32;
    }

    let tail = super::scalar::count_gc_n(&seq[i..]);
    BaseTally {
        gc: gc + tail.gc,
        n: n + tail.n,
    }
}
