use itertools::Itertools;
use log::{debug, trace};
use smallvec::SmallVec;

use crate::core::{
    error::{RangeError, Result},
    key::{KeyDomain, RangeKey},
    normalizer::normalize,
    range::{DEFAULT_PRIORITY, End, NormalizedRange, ValueRange},
    relations::{adjacent, begin_before, end_before, overlaps},
};

/// Sorted, non-overlapping, contiguous ranges covering a key domain.
pub type Partition<K, V> = Vec<NormalizedRange<K, V>>;

/// At most a left remainder, the contested middle and a right remainder.
type Pieces<K, V> = SmallVec<[NormalizedRange<K, V>; 3]>;

type OverlapIndices = SmallVec<[usize; 8]>;

/// Folds declared ranges into a partition of `domain`.
///
/// - empty declarations are dropped, malformed ones abort with `InvalidRange`
/// - the rest are normalized and stable-sorted by `begin`
/// - the fold starts from a full-domain range holding `default_value`
/// - where ranges overlap, the later declaration wins
pub fn merge_ranges<K, V, I>(domain: &KeyDomain<K>, default_value: V, declared: I) -> Result<Partition<K, V>>
where
    K: RangeKey,
    V: Clone,
    I: IntoIterator<Item = ValueRange<K, V>>,
{
    let normalized = normalize_declarations(declared, domain)?;
    let declared_count = normalized.len();

    let mut partition: Partition<K, V> = Vec::with_capacity(declared_count * 2 + 1);
    partition.push(NormalizedRange::full_domain(domain, default_value.clone()));

    for incoming in normalized {
        merge_into(&mut partition, incoming, &default_value)?;
    }

    debug_assert!(is_partition_of(&partition, domain));
    debug!(
        "Merged {} declared ranges into {} partition entries over [{:?}, {:?}]",
        declared_count,
        partition.len(),
        domain.min(),
        domain.max()
    );

    Ok(partition)
}

fn normalize_declarations<K, V, I>(declared: I, domain: &KeyDomain<K>) -> Result<Vec<NormalizedRange<K, V>>>
where
    K: RangeKey,
    I: IntoIterator<Item = ValueRange<K, V>>,
{
    let mut out = Vec::new();

    for (index, range) in declared.into_iter().enumerate() {
        if range.is_empty() {
            trace!("Dropping empty range #{} at {:?}", index, range.range.begin);
            continue;
        }

        out.push(normalize(range, index, domain)?);
    }

    // Fast-path: declarations are frequently written in ascending order already.
    // `sort_by_key` is stable, so equal begins keep declaration order.
    if !out.is_sorted_by_key(|r| r.begin) {
        out.sort_by_key(|r| r.begin);
    }

    Ok(out)
}

/// Merges one normalized range into an accumulated partition.
///
/// The entries overlapping `incoming` must form one consecutive run of adjacent entries,
/// otherwise the partition is already broken and `AmbiguousOverlap` is returned with the
/// partition left untouched. When nothing overlaps, `incoming` is inserted in order and
/// any gap to its neighbours is filled with `default_value`.
pub fn merge_into<K, V>(
    partition: &mut Partition<K, V>,
    incoming: NormalizedRange<K, V>,
    default_value: &V,
) -> Result<()>
where
    K: RangeKey,
    V: Clone,
{
    let overlapping: OverlapIndices = partition
        .iter()
        .enumerate()
        .filter(|(_, existing)| overlaps(existing, &incoming))
        .map(|(idx, _)| idx)
        .collect();

    let (first, last) = match (overlapping.first(), overlapping.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => {
            insert_disjoint(partition, incoming, default_value);
            return Ok(());
        }
    };

    let contiguous = overlapping
        .iter()
        .tuple_windows()
        .all(|(&a, &b)| b == a + 1 && adjacent(&partition[a], &partition[b]));

    if !contiguous {
        return Err(RangeError::AmbiguousOverlap {
            priority: incoming.priority,
            overlapping: overlapping.len(),
        });
    }

    trace!(
        "Range [{:?}, {:?}) with priority {} overlaps {} entries",
        incoming.begin,
        incoming.end,
        incoming.priority,
        overlapping.len()
    );

    let replaced: Vec<NormalizedRange<K, V>> = partition.drain(first..=last).collect();
    let count = replaced.len();
    let mut pieces: Vec<NormalizedRange<K, V>> = Vec::with_capacity(count * 3);

    for (k, existing) in replaced.iter().enumerate() {
        // Clip the incoming range to this entry's span; only the outer ends keep the
        // incoming bounds.
        let begin = if k == 0 { incoming.begin } else { existing.begin };
        let end = if k + 1 == count { incoming.end } else { existing.end };
        let clipped = incoming.with_bounds(begin, end);

        pieces.extend(split_overlap(existing, &clipped));
    }

    partition.splice(first..first, pieces);
    partition.sort_by_key(|r| r.begin);

    Ok(())
}

/// Resolves two overlapping ranges into ascending, non-overlapping pieces.
///
/// - left: the earlier-starting range before the other begins, with its own value
/// - middle: the intersection, with the value of the higher priority
/// - right: past the earlier end, with the value of the range that extends further
fn split_overlap<K, V>(existing: &NormalizedRange<K, V>, incoming: &NormalizedRange<K, V>) -> Pieces<K, V>
where
    K: RangeKey,
    V: Clone,
{
    let mut pieces = Pieces::new();

    // Ties go to `existing` on both sides.
    let (first, second) = if begin_before(incoming, existing) {
        (incoming, existing)
    } else {
        (existing, incoming)
    };
    let (shorter, longer) = if end_before(incoming, existing) {
        (incoming, existing)
    } else {
        (existing, incoming)
    };
    let winner = if incoming.priority >= existing.priority {
        incoming
    } else {
        existing
    };

    if first.begin != second.begin {
        pieces.push(first.with_bounds(first.begin, End::Excluded(second.begin)));
    }

    pieces.push(winner.with_bounds(second.begin, shorter.end));

    // A `Max` end is never the shorter one unless both ends are `Max`.
    if let End::Excluded(split) = shorter.end {
        if shorter.end != longer.end {
            pieces.push(longer.with_bounds(split, longer.end));
        }
    }

    pieces.retain(|p| !p.is_empty());
    pieces
}

fn insert_disjoint<K, V>(partition: &mut Partition<K, V>, incoming: NormalizedRange<K, V>, default_value: &V)
where
    K: RangeKey,
    V: Clone,
{
    let pos = partition.partition_point(|existing| existing.begin < incoming.begin);
    let mut run: Pieces<K, V> = Pieces::new();

    if let Some(prev) = pos.checked_sub(1).and_then(|i| partition.get(i)) {
        if let End::Excluded(prev_end) = prev.end {
            if prev_end < incoming.begin {
                run.push(gap_filler(prev_end, incoming.begin, default_value));
            }
        }
    }

    let after = match (incoming.end, partition.get(pos)) {
        (End::Excluded(end), Some(next)) if end < next.begin => Some(gap_filler(end, next.begin, default_value)),
        _ => None,
    };

    trace!(
        "Range [{:?}, {:?}) overlaps nothing, inserting at {}",
        incoming.begin,
        incoming.end,
        pos
    );

    run.push(incoming);
    run.extend(after);

    partition.splice(pos..pos, run);
}

#[inline]
fn gap_filler<K: RangeKey, V: Clone>(begin: K, end: K, default_value: &V) -> NormalizedRange<K, V> {
    NormalizedRange {
        begin,
        end: End::Excluded(end),
        value: default_value.clone(),
        priority: DEFAULT_PRIORITY,
    }
}

/// Returns true if `partition` is non-empty, sorted, contiguous and covers `domain`.
pub fn is_partition_of<K: RangeKey, V>(partition: &[NormalizedRange<K, V>], domain: &KeyDomain<K>) -> bool {
    let (Some(first), Some(last)) = (partition.first(), partition.last()) else {
        return false;
    };

    first.begin == domain.min()
        && last.end == End::Max
        && partition.iter().all(|r| !r.end.at_or_before(r.begin))
        && partition.iter().tuple_windows().all(|(a, b)| adjacent(a, b))
}
