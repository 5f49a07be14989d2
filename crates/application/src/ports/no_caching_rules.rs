/// Decides which resolved host names must stay out of the positive cache.
pub trait NoCachingRules: Send + Sync {
    fn is_excluded(&self, resolved_name: &str) -> bool;

    /// Number of distinct host names found to be excluded so far.
    fn excluded_count(&self) -> usize;
}
