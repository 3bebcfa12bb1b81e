//! Distribution Module
//! Equal-width histogram binning and value frequency counts.

use std::collections::HashMap;

/// One histogram bucket. `end` is exclusive except for the last bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
    pub height: f64,
}

impl HistogramBin {
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
    /// Heights are densities (area sums to 1) rather than raw counts.
    pub normalized: bool,
}

impl Histogram {
    /// Total number of values that landed in a bucket.
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    /// Sum of `height * width` over all buckets.
    #[cfg(test)]
    pub fn area(&self) -> f64 {
        self.bins.iter().map(|b| b.height * b.width()).sum()
    }

    pub fn max_height(&self) -> f64 {
        self.bins.iter().map(|b| b.height).fold(0.0, f64::max)
    }
}

/// Bucket `values` into `bin_count` equal-width bins over their observed range.
/// Non-finite values are skipped.
///
/// A constant column is widened to `[v - 0.5, v + 0.5]` and an empty one uses
/// `[0, 1]`, so there is always a drawable range. Large magnitudes get a wider
/// pad so every bucket spans more than one representable step.
pub fn histogram(values: &[f64], bin_count: usize, normalize: bool) -> Histogram {
    let bin_count = bin_count.max(1);
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();

    let (lo, hi) = value_range(&finite, bin_count);

    let width = (hi - lo) / bin_count as f64;
    let mut counts = vec![0usize; bin_count];
    for &v in &finite {
        let idx = ((v - lo) / width).floor() as usize;
        counts[idx.min(bin_count - 1)] += 1;
    }

    let n = finite.len();
    let bins = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let start = lo + i as f64 * width;
            let end = if i + 1 == bin_count {
                hi
            } else {
                lo + (i + 1) as f64 * width
            };
            // density uses the stored edges so the area stays exact after rounding
            let height = if !normalize {
                count as f64
            } else if n == 0 || end <= start {
                0.0
            } else {
                count as f64 / (n as f64 * (end - start))
            };
            HistogramBin {
                start,
                end,
                count,
                height,
            }
        })
        .collect();

    Histogram {
        bins,
        normalized: normalize,
    }
}

fn value_range(values: &[f64], bin_count: usize) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 1.0);
    }
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let scale = lo.abs().max(hi.abs());
    let min_span = scale * f64::EPSILON * 4.0 * bin_count as f64;
    if lo < hi && hi - lo >= min_span {
        return (lo, hi);
    }

    let mid = lo / 2.0 + hi / 2.0;
    let mut pad = if lo == hi {
        0.5_f64.max(min_span)
    } else {
        min_span
    };
    loop {
        let (a, b) = (mid - pad, mid + pad);
        if a < b && (b - a) / bin_count as f64 > 0.0 && a <= lo && b >= hi {
            return (a, b);
        }
        pad *= 2.0;
    }
}

/// Frequency of each distinct non-null value, most frequent first.
/// Ties keep the order in which values were first seen.
pub fn value_counts(values: &[Option<String>]) -> Vec<(String, usize)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for value in values.iter().flatten() {
        match index.get(value.as_str()) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(value.as_str(), counts.len());
                counts.push((value.clone(), 1));
            }
        }
    }

    // stable sort keeps first-seen order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_cover_every_value() {
        let values = [1.0, 2.0, 2.0, 3.0, 4.0, 10.0];
        let h = histogram(&values, 3, false);
        assert_eq!(h.bins.len(), 3);
        assert_eq!(h.total(), values.len());
        assert_eq!(h.bins[0].start, 1.0);
        assert_eq!(h.bins[2].end, 10.0);
        // max lands in the closed last bucket
        assert_eq!(h.bins[2].count, 1);
        assert_eq!(h.bins[0].count, 4);
    }

    #[test]
    fn normalized_area_is_one() {
        let values: Vec<f64> = (0..97).map(|i| (i as f64 * 0.37).sin() * 12.5).collect();
        for bins in [1, 7, 10, 50] {
            let h = histogram(&values, bins, true);
            assert!((h.area() - 1.0).abs() < 1e-9, "bins={bins} area={}", h.area());
        }
    }

    #[test]
    fn constant_values_are_widened() {
        let h = histogram(&[5.0, 5.0], 2, false);
        assert_eq!(h.bins[0].start, 4.5);
        assert_eq!(h.bins[1].end, 5.5);
        assert_eq!(h.total(), 2);
        assert!((histogram(&[5.0], 4, true).area() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn huge_constant_values_keep_unit_area() {
        let h = histogram(&[1e16; 3], 10, true);
        assert_eq!(h.total(), 3);
        assert!(h.bins.iter().all(|b| b.start < b.end));
        assert!(h.bins.iter().all(|b| b.height.is_finite()));
        assert!((h.area() - 1.0).abs() < 1e-9, "area={}", h.area());
    }

    #[test]
    fn nearly_equal_large_values_keep_unit_area() {
        let h = histogram(&[1e16, 1e16 + 2.0, 1e16 + 4.0], 50, true);
        assert_eq!(h.total(), 3);
        assert!((h.area() - 1.0).abs() < 1e-9, "area={}", h.area());
    }

    #[test]
    fn non_finite_values_are_skipped() {
        let h = histogram(&[1.0, f64::INFINITY, 2.0, f64::NAN], 2, true);
        assert_eq!(h.total(), 2);
        assert!(h.bins.iter().all(|b| b.end.is_finite()));
        assert!((h.area() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn empty_values_give_empty_buckets() {
        let h = histogram(&[], 10, true);
        assert_eq!(h.bins.len(), 10);
        assert_eq!(h.total(), 0);
        assert_eq!(h.max_height(), 0.0);
    }

    #[test]
    fn value_counts_sort_by_count_then_first_seen() {
        let values: Vec<Option<String>> = ["10", "20", "20", "30"]
            .iter()
            .map(|v| Some(v.to_string()))
            .collect();
        assert_eq!(
            value_counts(&values),
            vec![
                ("20".to_string(), 2),
                ("10".to_string(), 1),
                ("30".to_string(), 1)
            ]
        );
    }

    #[test]
    fn value_counts_skip_nulls() {
        let values = vec![Some("a".to_string()), None, Some("a".to_string()), None];
        let counts = value_counts(&values);
        assert_eq!(counts, vec![("a".to_string(), 2)]);
        assert_eq!(counts.iter().map(|(_, c)| c).sum::<usize>(), 2);
    }
}
