pub mod config;
pub mod eip1193;
pub mod mock;
pub mod rpc;
pub mod transport;

/// Events each connector keeps until drained; older ones are dropped first.
pub const EVENT_LOG_CAPACITY: usize = 256;

pub use config::{AdapterConfig, ConfigError, RuntimeProfile};
pub use eip1193::Eip1193Connector;
pub use mock::{MockConnector, MockFeatures};
pub use rpc::JsonRpcClient;
pub use transport::{DeterministicTransport, HttpTransport};
