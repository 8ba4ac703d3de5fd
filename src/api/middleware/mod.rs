//! HTTP middleware: device identity, rate limiting, tracing, traffic
//! observation.

pub mod activity;
pub mod device;
pub mod rate_limit;
pub mod tracing;

pub use device::DeviceId;
