use crate::core::{
    error::{RangeError, Result},
    key::{KeyDomain, RangeKey},
    range::{End, NormalizedRange, ValueRange},
};

/// Canonicalizes a declared range into ascending, half-open form.
///
/// - empty ranges and bounds outside `domain` are rejected
/// - descending ranges are swapped
/// - an inclusive end becomes exclusive at its successor, except at the domain maximum
///
/// `index` is the 0-based declaration position, used for errors; the priority is
/// `index + 1`, leaving 0 to the default range.
pub fn normalize<K: RangeKey, V>(
    declared: ValueRange<K, V>,
    index: usize,
    domain: &KeyDomain<K>,
) -> Result<NormalizedRange<K, V>> {
    let ValueRange { range, value } = declared;

    if range.is_empty() {
        return Err(invalid(index, format!("empty range [{:?}, {:?})", range.begin, range.end)));
    }

    for bound in [range.begin, range.end] {
        if !domain.contains(bound) {
            return Err(invalid(
                index,
                format!(
                    "bound {:?} is outside the key domain [{:?}, {:?}]",
                    bound,
                    domain.min(),
                    domain.max()
                ),
            ));
        }
    }

    let aligned = range.aligned();

    let end = if !aligned.include_end {
        End::Excluded(aligned.end)
    } else if aligned.end == domain.max() {
        End::Max
    } else {
        // Below the domain maximum, so the successor exists.
        match aligned.end.successor() {
            Some(next) => End::Excluded(next),
            None => return Err(invalid(index, format!("end {:?} has no successor", aligned.end))),
        }
    };

    Ok(NormalizedRange {
        begin: aligned.begin,
        end,
        value,
        priority: index + 1,
    })
}

#[inline]
fn invalid(index: usize, reason: String) -> RangeError {
    RangeError::InvalidRange {
        index: Some(index),
        reason,
    }
}
