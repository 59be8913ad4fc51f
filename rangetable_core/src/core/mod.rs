pub mod error;
pub mod key;
pub mod range;
pub mod normalizer;
pub mod relations;
pub mod range_merger;
pub mod table;
pub mod ascii;

#[cfg(test)]
mod range_table_tests {
    include!("range_table_tests.rs");
}
