//! Pairwise predicates over normalized ranges.
//!
//! All ends are compared through [`End`], so an exclusive end `e` behaves like the inclusive
//! end `e - 1` and the inclusive end at the domain maximum is larger than any other.

use crate::core::{
    key::RangeKey,
    range::{End, NormalizedRange},
};

#[inline]
pub fn begin_before<K: RangeKey, V>(a: &NormalizedRange<K, V>, b: &NormalizedRange<K, V>) -> bool {
    a.begin < b.begin
}

#[inline]
pub fn end_before<K: RangeKey, V>(a: &NormalizedRange<K, V>, b: &NormalizedRange<K, V>) -> bool {
    a.end < b.end
}

/// Returns true if `a` ends at or before the first key of `b`.
#[inline]
pub fn precedes<K: RangeKey, V>(a: &NormalizedRange<K, V>, b: &NormalizedRange<K, V>) -> bool {
    a.end.at_or_before(b.begin)
}

#[inline]
pub fn overlaps<K: RangeKey, V>(a: &NormalizedRange<K, V>, b: &NormalizedRange<K, V>) -> bool {
    !precedes(a, b) && !precedes(b, a)
}

/// Returns true if `b` starts exactly where `a` ends.
#[inline]
pub fn adjacent<K: RangeKey, V>(a: &NormalizedRange<K, V>, b: &NormalizedRange<K, V>) -> bool {
    a.end == End::Excluded(b.begin)
}

#[inline]
pub fn contains<K: RangeKey, V>(a: &NormalizedRange<K, V>, b: &NormalizedRange<K, V>) -> bool {
    a.begin <= b.begin && b.end <= a.end
}

/// Shared bounds of two overlapping ranges.
#[inline]
pub fn intersection<K: RangeKey, V>(
    a: &NormalizedRange<K, V>,
    b: &NormalizedRange<K, V>,
) -> Option<(K, End<K>)> {
    if !overlaps(a, b) {
        return None;
    }

    Some((a.begin.max(b.begin), a.end.min(b.end)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(begin: u8, end: u8) -> NormalizedRange<u8, ()> {
        NormalizedRange {
            begin,
            end: End::Excluded(end),
            value: (),
            priority: 1,
        }
    }

    fn to_max(begin: u8) -> NormalizedRange<u8, ()> {
        NormalizedRange {
            begin,
            end: End::Max,
            value: (),
            priority: 1,
        }
    }

    #[test]
    fn begin_and_end_ordering() {
        assert!(begin_before(&r(1, 5), &r(2, 3)));
        assert!(!begin_before(&r(2, 5), &r(2, 3)));
        assert!(end_before(&r(2, 3), &r(1, 5)));
        assert!(!end_before(&r(1, 5), &r(4, 5)));
    }

    #[test]
    fn exclusive_end_at_max_is_before_inclusive_max() {
        let del = to_max(127);
        let whole = to_max(0);
        let to_255 = r(0, 255);

        // Equal inclusive ends.
        assert!(!end_before(&whole, &del));
        assert!(!end_before(&del, &whole));

        assert!(end_before(&to_255, &whole));
        assert!(!end_before(&whole, &to_255));
    }

    #[test]
    fn overlap_and_precedence() {
        assert!(precedes(&r(0, 5), &r(5, 9)));
        assert!(!overlaps(&r(0, 5), &r(5, 9)));
        assert!(overlaps(&r(0, 6), &r(5, 9)));
        assert!(overlaps(&r(5, 9), &r(0, 6)));
        assert!(overlaps(&r(0, 9), &r(3, 4)));
        assert!(overlaps(&to_max(200), &r(100, 201)));
        assert!(!overlaps(&to_max(200), &r(100, 200)));
        assert!(!precedes(&to_max(0), &to_max(255)));
    }

    #[test]
    fn adjacency_requires_no_gap() {
        assert!(adjacent(&r(0, 5), &r(5, 9)));
        assert!(!adjacent(&r(0, 5), &r(6, 9)));
        assert!(!adjacent(&r(0, 6), &r(5, 9)));
        assert!(!adjacent(&r(5, 9), &r(0, 5)));
        assert!(!adjacent(&to_max(5), &r(0, 5)));
        assert!(adjacent(&r(0, 200), &to_max(200)));
    }

    #[test]
    fn containment() {
        assert!(contains(&r(0, 9), &r(3, 4)));
        assert!(contains(&r(0, 9), &r(0, 9)));
        assert!(!contains(&r(3, 4), &r(0, 9)));
        assert!(contains(&to_max(0), &r(3, 255)));
        assert!(!contains(&r(0, 255), &to_max(3)));
    }

    #[test]
    fn intersection_bounds() {
        assert_eq!(intersection(&r(0, 6), &r(4, 9)), Some((4, End::Excluded(6))));
        assert_eq!(intersection(&to_max(0), &r(4, 9)), Some((4, End::Excluded(9))));
        assert_eq!(intersection(&to_max(0), &to_max(9)), Some((9, End::Max)));
        assert_eq!(intersection(&r(0, 4), &r(4, 9)), None);
    }
}
