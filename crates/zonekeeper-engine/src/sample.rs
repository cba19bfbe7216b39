//! Uniform sampling without replacement.

use rand::Rng;

/// Draw `n` items uniformly at random using the thread-local generator
#[must_use]
pub fn sample<T: Clone>(items: &[T], n: usize) -> Vec<T> {
    sample_with(items, n, &mut rand::thread_rng())
}

/// Draw `n` items uniformly at random without replacement
///
/// Runs a partial Fisher-Yates shuffle over a copy: walking back from the end,
/// each position is swapped with a uniformly chosen position at or before it,
/// and the last `n` positions form the sample. When `n >= items.len()` every
/// item is returned. `items` is never reordered.
pub fn sample_with<T, R>(items: &[T], n: usize, rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    let len = items.len();
    if n >= len {
        return items.to_vec();
    }

    let mut work = items.to_vec();
    for i in ((len - n)..len).rev() {
        let j = rng.gen_range(0..=i);
        work.swap(i, j);
    }

    work.split_off(len - n)
}
