use crate::core::key::{KeyDomain, RangeKey};

/// Priority of the full-domain default range and of gap fillers.
pub const DEFAULT_PRIORITY: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Empty,
    Ascending,
    Descending,
}

/// Contiguous interval over the key domain.
///
/// The direction is always derived from `begin` and `end`. A range with `begin == end`
/// covers a single key when `include_end` is set and is empty otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range<K> {
    pub begin: K,
    pub end: K,
    pub include_end: bool,
}

impl<K: RangeKey> Range<K> {
    #[inline]
    pub fn new(begin: K, end: K, include_end: bool) -> Self {
        Self {
            begin,
            end,
            include_end,
        }
    }

    #[inline]
    pub fn inclusive(begin: K, end: K) -> Self {
        Self::new(begin, end, true)
    }

    #[inline]
    pub fn exclusive(begin: K, end: K) -> Self {
        Self::new(begin, end, false)
    }

    #[inline]
    pub fn single(key: K) -> Self {
        Self::new(key, key, true)
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        if self.begin < self.end {
            Direction::Ascending
        } else if self.end < self.begin {
            Direction::Descending
        } else if self.include_end {
            Direction::Ascending
        } else {
            Direction::Empty
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.direction() == Direction::Empty
    }

    /// Swaps the bounds, keeping the inclusivity flag.
    #[inline]
    pub fn reversed(self) -> Self {
        Self::new(self.end, self.begin, self.include_end)
    }

    /// Returns the range with ascending bounds.
    #[inline]
    pub fn aligned(self) -> Self {
        match self.direction() {
            Direction::Descending => self.reversed(),
            _ => self,
        }
    }

    /// Returns true if `key` falls inside the range once it is aligned ascending.
    pub fn contains_key(&self, key: K) -> bool {
        if self.is_empty() {
            return false;
        }

        let aligned = self.aligned();
        aligned.begin <= key && (key < aligned.end || (aligned.include_end && key == aligned.end))
    }
}

/// A range paired with the value its keys map to.
///
/// The priority of a declaration is its position in the declared sequence and is not
/// stored here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueRange<K, V> {
    pub range: Range<K>,
    pub value: V,
}

impl<K: RangeKey, V> ValueRange<K, V> {
    #[inline]
    pub fn new(range: Range<K>, value: V) -> Self {
        Self { range, value }
    }

    #[inline]
    pub fn inclusive(begin: K, end: K, value: V) -> Self {
        Self::new(Range::inclusive(begin, end), value)
    }

    #[inline]
    pub fn exclusive(begin: K, end: K, value: V) -> Self {
        Self::new(Range::exclusive(begin, end), value)
    }

    #[inline]
    pub fn single(key: K, value: V) -> Self {
        Self::new(Range::single(key), value)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// End bound of a normalized range.
///
/// `Excluded(k)` stops right before `k`. `Max` includes the domain maximum and compares
/// greater than every `Excluded` end, which stands in for the unrepresentable `max + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum End<K> {
    Excluded(K),
    Max,
}

impl<K: RangeKey> End<K> {
    /// Returns true if a range with this end stops at or before `key`.
    #[inline]
    pub fn at_or_before(self, key: K) -> bool {
        match self {
            End::Excluded(end) => end <= key,
            End::Max => false,
        }
    }

    #[inline]
    pub fn is_inclusive(self) -> bool {
        matches!(self, End::Max)
    }
}

/// Ascending, half-open range with its value and priority.
///
/// Only a range ending at the domain maximum keeps an inclusive end (`End::Max`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRange<K, V> {
    pub begin: K,
    pub end: End<K>,
    pub value: V,
    pub priority: usize,
}

impl<K: RangeKey, V: Clone> NormalizedRange<K, V> {
    /// The range covering the whole domain at the lowest priority.
    pub fn full_domain(domain: &KeyDomain<K>, value: V) -> Self {
        Self {
            begin: domain.min(),
            end: End::Max,
            value,
            priority: DEFAULT_PRIORITY,
        }
    }

    #[inline]
    pub fn include_end(&self) -> bool {
        self.end.is_inclusive()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end.at_or_before(self.begin)
    }

    /// Returns true if `key` lies in `[begin, end)` (or `[begin, max]`).
    #[inline]
    pub fn contains_key(&self, key: K) -> bool {
        self.begin <= key && !self.end.at_or_before(key)
    }

    /// Copies value and priority onto new bounds.
    #[inline]
    pub fn with_bounds(&self, begin: K, end: End<K>) -> Self {
        Self {
            begin,
            end,
            value: self.value.clone(),
            priority: self.priority,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_is_derived_from_bounds() {
        assert_eq!(Range::inclusive(1u8, 5).direction(), Direction::Ascending);
        assert_eq!(Range::exclusive(5u8, 1).direction(), Direction::Descending);
        assert_eq!(Range::exclusive(3u8, 3).direction(), Direction::Empty);
        assert_eq!(Range::single(3u8).direction(), Direction::Ascending);
        assert!(Range::exclusive(3u8, 3).is_empty());
        assert!(!Range::single(3u8).is_empty());
    }

    #[test]
    fn reversed_keeps_inclusivity() {
        let r = Range::inclusive(9u8, 2).reversed();
        assert_eq!(r, Range::inclusive(2, 9));
        assert_eq!(Range::exclusive(9u8, 2).aligned(), Range::exclusive(2, 9));
        assert_eq!(Range::exclusive(2u8, 9).aligned(), Range::exclusive(2, 9));
    }

    #[test]
    fn contains_key_follows_alignment() {
        let r = Range::inclusive(9u8, 2);
        assert!(r.contains_key(2));
        assert!(r.contains_key(9));
        assert!(!r.contains_key(10));

        let r = Range::exclusive(2u8, 9);
        assert!(r.contains_key(8));
        assert!(!r.contains_key(9));

        assert!(!Range::exclusive(4u8, 4).contains_key(4));
    }

    #[test]
    fn end_ordering_puts_max_last() {
        assert!(End::Excluded(u8::MAX) < End::Max);
        assert!(End::Excluded(3u8) < End::Excluded(4));
        assert!(End::Excluded(4u8).at_or_before(4));
        assert!(!End::Excluded(5u8).at_or_before(4));
        assert!(!End::<u8>::Max.at_or_before(u8::MAX));
    }

    #[test]
    fn normalized_emptiness_and_membership() {
        let domain = KeyDomain::<u8>::full();
        let full = NormalizedRange::full_domain(&domain, 'x');
        assert!(full.include_end());
        assert!(full.contains_key(0));
        assert!(full.contains_key(255));

        let piece = full.with_bounds(10, End::Excluded(10));
        assert!(piece.is_empty());
        assert_eq!(piece.priority, DEFAULT_PRIORITY);

        let piece = full.with_bounds(10, End::Excluded(12));
        assert!(piece.contains_key(11));
        assert!(!piece.contains_key(12));
    }
}
