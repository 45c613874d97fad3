//! Transport implementations
//!
//! Contains BrokerTransport and LogTransport.

mod broker;
mod log;

pub use self::broker::BrokerTransport;
pub use self::log::LogTransport;
