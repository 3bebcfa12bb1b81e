//! Complexity Samples
//! Fixed illustrative series for the time and space complexity demos.
//! They do not depend on the loaded dataset.

use std::hint::black_box;
use std::time::Instant;

/// Input sizes used by both demos.
pub const DEMO_SIZES: [usize; 4] = [10, 100, 1000, 10000];

/// Bytes assumed per element by the space demo.
pub const BYTES_PER_ELEMENT: usize = 4;

/// Seconds spent building a doubled sequence of each size.
pub fn time_samples(sizes: &[usize]) -> Vec<(f64, f64)> {
    sizes
        .iter()
        .map(|&size| {
            let start = Instant::now();
            let doubled: Vec<usize> = (0..size).map(|n| n * 2).collect();
            black_box(doubled);
            (size as f64, start.elapsed().as_secs_f64())
        })
        .collect()
}

/// Bytes needed to store each size at `BYTES_PER_ELEMENT`.
pub fn space_samples(sizes: &[usize]) -> Vec<(f64, f64)> {
    sizes
        .iter()
        .map(|&size| (size as f64, (size * BYTES_PER_ELEMENT) as f64))
        .collect()
}
