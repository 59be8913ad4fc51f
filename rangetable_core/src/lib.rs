pub mod core;

pub mod configuration;

pub use crate::configuration::Configuration;
pub use crate::core::{
    error::{RangeError, Result},
    key::{KeyDomain, RangeKey},
    range::{Direction, End, NormalizedRange, Range, ValueRange},
    table::{RangeTable, RangeTableBuilder, build_range_map, build_range_map_in},
};
