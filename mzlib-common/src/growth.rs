/// Strategy to compute the next capacity of a growable buffer.
///
/// `next_capacity` is only consulted when the buffer is full,
/// and the returned value must be no less than `required`.
pub trait GrowthPolicy {
    fn next_capacity(current: usize, required: usize) -> usize;
}

/// Doubles capacity, starting from 2.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Doubling;

impl GrowthPolicy for Doubling {
    #[inline]
    fn next_capacity(current: usize, required: usize) -> usize {
        let doubled = if current == 0 { 2 } else { current * 2 };
        usize::max(doubled, required)
    }
}

/// Doubles capacity plus two, so that zero capacity also grows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DoublePlusTwo;

impl GrowthPolicy for DoublePlusTwo {
    #[inline]
    fn next_capacity(current: usize, required: usize) -> usize {
        usize::max(current * 2 + 2, required)
    }
}

/// Grows to exactly the required capacity.
/// Appends are no longer amortized O(1) with this policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Exact;

impl GrowthPolicy for Exact {
    #[inline]
    fn next_capacity(current: usize, required: usize) -> usize {
        usize::max(current, required)
    }
}
