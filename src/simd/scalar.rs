use super::BaseTally;

pub fn count_gc_n(seq: &[u8]) -> BaseTally {
    let mut tally = BaseTally::default();
    for &b in seq {
        match b & 0xDF {
            b'G' | b'C' => tally.gc += 1,
            b'N' => tally.n += 1,
            _ => {}
        }
    }
    tally
}
