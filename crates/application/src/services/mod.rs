pub mod address_classifier;
pub mod resolution_facade;

pub use address_classifier::{has_local_prefix, select_public_candidate, AddressClassifier};
pub use resolution_facade::{HostCacheStats, ResolutionFacade};
