use std::ops::Range;

/// Splits `len` items into at most `degree` contiguous batches.
///
/// The degree is clamped to `1..=len`, so an empty list yields no batches and a
/// degree larger than the list yields singleton batches. Every batch holds
/// `len / degree` items except the last, which also absorbs the remainder.
pub fn partition(len: usize, degree: usize) -> Vec<Range<usize>> {
    if len == 0 {
        return Vec::new();
    }

    let degree = degree.clamp(1, len);
    let base = len / degree;

    (0..degree)
        .map(|i| {
            let start = i * base;
            let end = if i + 1 == degree { len } else { start + base };
            start..end
        })
        .collect()
}
