use dashmap::DashSet;
use fancy_regex::Regex;
use hostcache_application::ports::NoCachingRules;
use hostcache_domain::DomainError;
use rustc_hash::FxBuildHasher;
use std::sync::{PoisonError, RwLock};
use tracing::{debug, warn};

/// Host names that must never enter the positive cache.
///
/// Patterns are tried in order against the whole resolved name. Names that
/// matched are remembered so the pattern list is scanned once per excluded
/// name; names that did not match are not remembered.
pub struct NoCachingRegistry {
    patterns: RwLock<Vec<Regex>>,
    excluded: DashSet<Box<str>, FxBuildHasher>,
}

impl NoCachingRegistry {
    pub fn new(patterns: &[String]) -> Result<Self, DomainError> {
        let compiled = patterns
            .iter()
            .map(|p| compile(p))
            .collect::<Result<Vec<_>, _>>()?;

        if !compiled.is_empty() {
            debug!(count = compiled.len(), "Loaded no-caching patterns");
        }

        Ok(Self {
            patterns: RwLock::new(compiled),
            excluded: DashSet::with_hasher(FxBuildHasher),
        })
    }

    pub fn empty() -> Self {
        Self {
            patterns: RwLock::new(Vec::new()),
            excluded: DashSet::with_hasher(FxBuildHasher),
        }
    }

    /// Appends a pattern; it is tried after every existing one.
    pub fn add_pattern(&self, pattern: &str) -> Result<(), DomainError> {
        let regex = compile(pattern)?;
        self.patterns
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(regex);
        Ok(())
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

fn compile(pattern: &str) -> Result<Regex, DomainError> {
    let trimmed = pattern.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: "pattern is empty".to_string(),
        });
    }

    Regex::new(&format!("^(?:{trimmed})$")).map_err(|e| DomainError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

impl NoCachingRules for NoCachingRegistry {
    fn is_excluded(&self, resolved_name: &str) -> bool {
        if self.excluded.contains(resolved_name) {
            return true;
        }

        let patterns = self
            .patterns
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        for regex in patterns.iter() {
            match regex.is_match(resolved_name) {
                Ok(true) => {
                    self.excluded.insert(Box::from(resolved_name));
                    debug!(
                        host = resolved_name,
                        pattern = regex.as_str(),
                        "Host matched no-caching pattern"
                    );
                    return true;
                }
                Ok(false) => {}
                Err(e) => {
                    warn!(
                        host = resolved_name,
                        pattern = regex.as_str(),
                        error = %e,
                        "No-caching pattern failed to evaluate"
                    );
                }
            }
        }
        false
    }

    fn excluded_count(&self) -> usize {
        self.excluded.len()
    }
}
