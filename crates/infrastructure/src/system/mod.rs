pub mod host_resolver;
pub mod local_addresses;

pub use host_resolver::SystemHostResolver;
pub use local_addresses::SystemLocalAddresses;
