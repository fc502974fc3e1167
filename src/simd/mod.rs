#[cfg(target_arch = "aarch64")]
mod aarch64_neon;
mod scalar;
#[cfg(target_arch = "x86_64")]
mod x86_avx2;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BaseTally {
    pub gc: u64,
    pub n: u64,
}

pub fn count_gc_n(seq: &[u8]) -> BaseTally {
    #[cfg(target_arch = "x86_64")]
    if std::arch::is_x86_feature_detected!("avx2") {
        // SAFETY: avx2 support was just checked.
        return unsafe { x86_avx2::count_gc_n_avx2(seq) };
    }
    #[cfg(target_arch = "aarch64")]
    {
        // SAFETY: neon is part of the aarch64 baseline.
        return unsafe { aarch64_neon::count_gc_n_neon(seq) };
    }
    #[cfg(not(target_arch = "aarch64"))]
    scalar::count_gc_n(seq)
}
