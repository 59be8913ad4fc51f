use std::fmt::Debug;
use std::iter::{Copied, Zip};
use std::slice::Iter;

use itertools::Itertools;
use log::debug;

use crate::configuration::Configuration;
use crate::core::{
    error::Result,
    key::{KeyDomain, RangeKey},
    range::{Range, ValueRange},
    range_merger::{Partition, merge_ranges},
};

/// Builds a table over the whole key type.
///
/// Later declarations win where ranges overlap, keys nobody declared map to
/// `default_value`, empty ranges are ignored.
pub fn build_range_map<K, V, I>(default_value: V, ranges: I) -> Result<RangeTable<K, V>>
where
    K: RangeKey,
    V: Clone + PartialEq + Debug,
    I: IntoIterator<Item = ValueRange<K, V>>,
{
    RangeTableBuilder::new(default_value).ranges(ranges).build()
}

/// Builds a table over a restricted key domain.
pub fn build_range_map_in<K, V, I>(domain: KeyDomain<K>, default_value: V, ranges: I) -> Result<RangeTable<K, V>>
where
    K: RangeKey,
    V: Clone + PartialEq + Debug,
    I: IntoIterator<Item = ValueRange<K, V>>,
{
    RangeTableBuilder::new(default_value)
        .domain(domain)
        .ranges(ranges)
        .build()
}

/// Frozen partition of a key domain: ascending start keys and the value each start maps to.
///
/// Entry `i` covers `[starts[i], starts[i + 1])`, the last entry runs to the domain maximum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeTable<K, V> {
    starts: Vec<K>,
    values: Vec<V>,
    default_value: V,
    domain: KeyDomain<K>,
}

impl<K: RangeKey, V: Clone + PartialEq> RangeTable<K, V> {
    /// Flattens a merged partition, optionally merging neighbours with equal values.
    pub fn from_partition(
        partition: Partition<K, V>,
        default_value: V,
        domain: KeyDomain<K>,
        coalesce: bool,
    ) -> Self {
        let entries = partition.into_iter().map(|r| (r.begin, r.value));

        let (starts, values): (Vec<K>, Vec<V>) = if coalesce {
            entries
                .coalesce(|prev, next| if prev.1 == next.1 { Ok(prev) } else { Err((prev, next)) })
                .unzip()
        } else {
            entries.unzip()
        };

        debug_assert!(starts.windows(2).all(|w| w[0] < w[1]));

        Self {
            starts,
            values,
            default_value,
            domain,
        }
    }
}

impl<K: RangeKey, V> RangeTable<K, V> {
    /// Value of the entry containing `key`.
    ///
    /// Keys outside the domain resolve to the default value.
    #[inline]
    pub fn lookup(&self, key: K) -> &V {
        self.index_of(key)
            .and_then(|idx| self.values.get(idx))
            .unwrap_or(&self.default_value)
    }

    /// Index of the greatest start `<= key`.
    #[inline]
    pub fn index_of(&self, key: K) -> Option<usize> {
        if !self.domain.contains(key) {
            return None;
        }

        self.starts.partition_point(|start| *start <= key).checked_sub(1)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    #[inline]
    pub fn starts(&self) -> &[K] {
        &self.starts
    }

    #[inline]
    pub fn values(&self) -> &[V] {
        &self.values
    }

    #[inline]
    pub fn default_value(&self) -> &V {
        &self.default_value
    }

    #[inline]
    pub fn domain(&self) -> &KeyDomain<K> {
        &self.domain
    }

    /// `(start, value)` pairs in ascending key order.
    #[inline]
    pub fn iter(&self) -> Zip<Copied<Iter<'_, K>>, Iter<'_, V>> {
        self.starts.iter().copied().zip(self.values.iter())
    }

    /// Entries with their ends recovered: exclusive up to the next start, inclusive up to
    /// the domain maximum for the last one.
    pub fn spans(&self) -> impl Iterator<Item = (Range<K>, &V)> + '_ {
        self.iter().enumerate().map(move |(idx, (start, value))| {
            let range = match self.starts.get(idx + 1) {
                Some(&next) => Range::exclusive(start, next),
                None => Range::inclusive(start, self.domain.max()),
            };
            (range, value)
        })
    }
}

impl<'a, K: RangeKey, V> IntoIterator for &'a RangeTable<K, V> {
    type Item = (K, &'a V);
    type IntoIter = Zip<Copied<Iter<'a, K>>, Iter<'a, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Collects declarations, in priority order, for a single build.
#[derive(Debug, Clone)]
pub struct RangeTableBuilder<K, V> {
    default_value: V,
    domain: KeyDomain<K>,
    declared: Vec<ValueRange<K, V>>,
    configuration: Configuration,
}

impl<K, V> RangeTableBuilder<K, V>
where
    K: RangeKey,
    V: Clone + PartialEq + Debug,
{
    pub fn new(default_value: V) -> Self {
        Self {
            default_value,
            domain: KeyDomain::full(),
            declared: Vec::new(),
            configuration: Configuration::default(),
        }
    }

    pub fn domain(mut self, domain: KeyDomain<K>) -> Self {
        self.domain = domain;
        self
    }

    pub fn configuration(mut self, configuration: Configuration) -> Self {
        self.configuration = configuration;
        self
    }

    pub fn coalesce(mut self, coalesce: bool) -> Self {
        self.configuration.coalesce = Some(coalesce);
        self
    }

    /// Declares a range with a higher priority than everything declared before it.
    pub fn range(mut self, range: ValueRange<K, V>) -> Self {
        self.declared.push(range);
        self
    }

    pub fn ranges(mut self, ranges: impl IntoIterator<Item = ValueRange<K, V>>) -> Self {
        self.declared.extend(ranges);
        self
    }

    pub fn build(self) -> Result<RangeTable<K, V>> {
        let declared_count = self.declared.len();
        let partition = merge_ranges(&self.domain, self.default_value.clone(), self.declared)?;
        let table = RangeTable::from_partition(
            partition,
            self.default_value,
            self.domain,
            self.configuration.coalesce(),
        );

        debug!(
            "Built range table with {} entries from {} declared ranges",
            table.len(),
            declared_count
        );

        if self.configuration.log_entries() {
            for (range, value) in table.spans() {
                debug!("  {:?} => {:?}", range, value);
            }
        }

        Ok(table)
    }
}
