use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    /// A declaration (by 0-based position, `None` for the domain itself) that cannot be
    /// normalized.
    #[error("Invalid range{}: {reason}", describe_index(.index))]
    InvalidRange {
        index: Option<usize>,
        reason: String,
    },

    /// The entries overlapping an incoming range do not form one contiguous run, so the
    /// accumulated partition is already broken.
    #[error("Ambiguous overlap: range with priority {priority} overlaps {overlapping} partition entries that are not contiguous")]
    AmbiguousOverlap {
        priority: usize,
        overlapping: usize,
    },
}

fn describe_index(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!(" #{}", i),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, RangeError>;
