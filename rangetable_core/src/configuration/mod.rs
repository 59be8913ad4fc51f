#[derive(Clone, Debug, Default)]
pub struct Configuration {
    /// Merge neighbouring table entries holding equal values (default: false)
    pub coalesce: Option<bool>,
    /// Log every table entry after a build at debug level (default: false)
    pub log_entries: Option<bool>,
}

impl Configuration {
    #[inline]
    pub fn coalesce(&self) -> bool {
        self.coalesce.unwrap_or(false)
    }

    #[inline]
    pub fn log_entries(&self) -> bool {
        self.log_entries.unwrap_or(false)
    }
}
