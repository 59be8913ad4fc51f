use std::fmt::Debug;

use crate::core::error::{RangeError, Result};

/// Scalar key type of a range table.
///
/// A key type is totally ordered and bounded. `successor` is the checked `k + 1` used
/// to turn an inclusive end into an exclusive one; it returns `None` only at `MAX`.
pub trait RangeKey: Copy + Ord + Debug {
    const MIN: Self;
    const MAX: Self;

    fn successor(self) -> Option<Self>;
}

macro_rules! impl_range_key_for_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl RangeKey for $t {
                const MIN: Self = <$t>::MIN;
                const MAX: Self = <$t>::MAX;

                #[inline]
                fn successor(self) -> Option<Self> {
                    self.checked_add(1)
                }
            }
        )*
    };
}

impl_range_key_for_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl RangeKey for char {
    const MIN: Self = '\0';
    const MAX: Self = char::MAX;

    #[inline]
    fn successor(self) -> Option<Self> {
        match self {
            // Surrogates are not scalar values.
            '\u{D7FF}' => Some('\u{E000}'),
            c => char::from_u32(c as u32 + 1),
        }
    }
}

/// The closed key interval `[min, max]` a table partitions.
///
/// Defaults to the whole key type. A narrower domain makes declarations outside it invalid
/// and sends lookups outside it to the default value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDomain<K> {
    min: K,
    max: K,
}

impl<K: RangeKey> KeyDomain<K> {
    #[inline]
    pub fn full() -> Self {
        Self {
            min: K::MIN,
            max: K::MAX,
        }
    }

    pub fn new(min: K, max: K) -> Result<Self> {
        if max < min {
            return Err(RangeError::InvalidRange {
                index: None,
                reason: format!("domain maximum {:?} is below its minimum {:?}", max, min),
            });
        }

        Ok(Self { min, max })
    }

    #[inline]
    pub fn min(&self) -> K {
        self.min
    }

    #[inline]
    pub fn max(&self) -> K {
        self.max
    }

    #[inline]
    pub fn contains(&self, key: K) -> bool {
        self.min <= key && key <= self.max
    }
}

impl<K: RangeKey> Default for KeyDomain<K> {
    fn default() -> Self {
        Self::full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_successor_stops_at_max() {
        assert_eq!(7u8.successor(), Some(8));
        assert_eq!(u8::MAX.successor(), None);
        assert_eq!((-1i8).successor(), Some(0));
        assert_eq!(i64::MAX.successor(), None);
    }

    #[test]
    fn char_successor_skips_surrogates() {
        assert_eq!('a'.successor(), Some('b'));
        assert_eq!('\u{D7FF}'.successor(), Some('\u{E000}'));
        assert_eq!(char::MAX.successor(), None);
    }

    #[test]
    fn domain_bounds() {
        let full = KeyDomain::<u8>::full();
        assert_eq!(full.min(), 0);
        assert_eq!(full.max(), 255);

        let ascii = KeyDomain::new(0u8, 127).unwrap();
        assert!(ascii.contains(0));
        assert!(ascii.contains(127));
        assert!(!ascii.contains(128));

        assert!(matches!(
            KeyDomain::new(10u8, 9),
            Err(RangeError::InvalidRange { index: None, .. })
        ));
    }
}
