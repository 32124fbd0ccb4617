use num_traits::{identities::zero, PrimInt, Unsigned};

use readloc_core::models::Interval;

/// A start-sorted interval list for one chromosome, queried with a binary
/// search plus forward scan.
///
/// Build cost is one sort; queries are `O(log n + k)` in the common case,
/// where `k` is bounded by how far back the longest interval forces the scan
/// to begin. The query lower bound subtracts the longest interval length
/// from the query start, so any interval starting earlier than that can be
/// skipped outright.
#[derive(Debug, Clone)]
pub struct ChromIndex<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    intervals: Vec<Interval<I, T>>,
    max_len: I,
}

impl<I, T> ChromIndex<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    /// Build a new index from a vector of intervals. The vector is sorted by
    /// start (then end) immediately.
    pub fn build(mut intervals: Vec<Interval<I, T>>) -> Self {
        intervals.sort();
        let max_len = intervals
            .iter()
            .map(|iv| iv.end.checked_sub(&iv.start).unwrap_or_else(zero::<I>))
            .max()
            .unwrap_or_else(zero::<I>);

        ChromIndex { intervals, max_len }
    }

    /// Iterate over every interval overlapping `[start, end)`.
    #[inline]
    pub fn query(&self, start: I, end: I) -> QueryIter<'_, I, T> {
        QueryIter {
            inner: self,
            off: Self::lower_bound(
                start.checked_sub(&self.max_len).unwrap_or_else(zero::<I>),
                &self.intervals,
            ),
            start,
            end,
        }
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// First index whose interval could still overlap a query beginning at
    /// `start`. Assumes the maximum interval length has already been
    /// subtracted from `start`.
    #[inline]
    fn lower_bound(start: I, intervals: &[Interval<I, T>]) -> usize {
        let mut size = intervals.len();
        let mut low = 0;

        while size > 0 {
            let half = size / 2;
            let probe = low + half;
            if intervals[probe].start < start {
                low = probe + 1;
                size -= half + 1;
            } else {
                size = half;
            }
        }
        low
    }
}

/// Iterator over intervals of a [`ChromIndex`] overlapping a query range.
#[derive(Debug)]
pub struct QueryIter<'a, I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync + 'a,
{
    inner: &'a ChromIndex<I, T>,
    off: usize,
    start: I,
    end: I,
}

impl<'a, I, T> Iterator for QueryIter<'a, I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync + 'a,
{
    type Item = &'a Interval<I, T>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        while self.off < self.inner.intervals.len() {
            let interval = &self.inner.intervals[self.off];
            self.off += 1;
            if interval.overlap(self.start, self.end) {
                return Some(interval);
            } else if interval.start >= self.end {
                // sorted by start: nothing past this point can overlap
                break;
            }
        }
        None
    }
}
