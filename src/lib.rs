pub mod channels;
pub mod classify;
pub mod compose;
pub mod config;
pub mod error;
pub mod relay;
pub mod types;

pub use config::Config;
pub use error::RelayError;
pub use relay::{Disposition, MediaFetcher, Relay, RelaySink};
