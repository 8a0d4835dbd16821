//! Whole-buffer intensity statistics.

use crate::{VolumeError, VolumeResult};

/// Minimum, maximum and histogram of a sample buffer.
///
/// Computed once, eagerly, in O(n). The histogram has one bucket per
/// integral intensity from `0` to the maximum inclusive, so its length is
/// `maximum + 1` regardless of how sparse the used range is.
///
/// # Example
///
/// ```rust
/// use volvis_volume::Statistics;
///
/// let stats = Statistics::compute(&[3, 1, 3, 0]).unwrap();
/// assert_eq!(stats.minimum(), 0.0);
/// assert_eq!(stats.maximum(), 3.0);
/// assert_eq!(stats.histogram(), &[1, 1, 0, 2]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    minimum: u16,
    maximum: u16,
    histogram: Vec<usize>,
}

impl Statistics {
    /// Scans `samples` once for bounds, then once for the histogram.
    pub fn compute(samples: &[u16]) -> VolumeResult<Self> {
        let (minimum, maximum) = samples
            .iter()
            .fold(None, |acc: Option<(u16, u16)>, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
            .ok_or(VolumeError::Empty)?;

        let mut histogram = vec![0usize; maximum as usize + 1];
        for &v in samples {
            histogram[v as usize] += 1;
        }

        Ok(Self {
            minimum,
            maximum,
            histogram,
        })
    }

    /// Smallest sample value.
    #[inline]
    pub fn minimum(&self) -> f32 {
        self.minimum as f32
    }

    /// Largest sample value.
    #[inline]
    pub fn maximum(&self) -> f32 {
        self.maximum as f32
    }

    /// Count per intensity, indexed by value.
    #[inline]
    pub fn histogram(&self) -> &[usize] {
        &self.histogram
    }

    /// Number of samples counted; equals the buffer length.
    pub fn total(&self) -> usize {
        self.histogram.iter().sum()
    }

    /// Sums the histogram into `bins` equal-width buckets over `0..=maximum`.
    ///
    /// Useful for display, where tens of thousands of buckets are too many.
    /// Returns an empty vector when `bins` is zero.
    pub fn rebin(&self, bins: usize) -> Vec<usize> {
        if bins == 0 {
            return Vec::new();
        }
        let mut out = vec![0usize; bins];
        let len = self.histogram.len();
        for (value, &count) in self.histogram.iter().enumerate() {
            out[value * bins / len] += count;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute() {
        let stats = Statistics::compute(&[5, 2, 9, 2, 5, 5]).unwrap();
        assert_eq!(stats.minimum(), 2.0);
        assert_eq!(stats.maximum(), 9.0);
        assert_eq!(stats.histogram().len(), 10);
        assert_eq!(stats.histogram()[5], 3);
        assert_eq!(stats.histogram()[2], 2);
        assert_eq!(stats.total(), 6);
    }

    #[test]
    fn test_empty() {
        assert!(matches!(Statistics::compute(&[]), Err(VolumeError::Empty)));
    }

    #[test]
    fn test_all_zero() {
        let stats = Statistics::compute(&[0; 8]).unwrap();
        assert_eq!(stats.histogram(), &[8]);
    }

    #[test]
    fn test_rebin() {
        let stats = Statistics::compute(&[0, 1, 2, 3, 3, 3, 3, 3]).unwrap();
        assert_eq!(stats.rebin(2), vec![2, 6]);
        assert_eq!(stats.rebin(4), vec![1, 1, 1, 5]);
        assert_eq!(stats.rebin(0), Vec::<usize>::new());
        assert_eq!(stats.rebin(16).iter().sum::<usize>(), 8);
    }
}
