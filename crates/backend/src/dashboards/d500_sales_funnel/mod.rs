pub mod engine;
pub mod error;
pub mod service;

pub use error::FunnelError;
