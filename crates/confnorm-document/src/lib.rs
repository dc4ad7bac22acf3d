//! Document-backed configuration model for confnorm.
//!
//! A configuration document describes one cache manager:
//!
//! ```toml
//! [global.transport]
//! clusterName = "ISPN"
//!
//! [default.eviction]
//! strategy = "LRU"
//!
//! [caches.users.expiration]
//! lifespan = 60000
//!
//! [[transport]]
//! name = "TCP"
//! properties = { recv_buf_size = 8192 }
//! ```
//!
//! Sections are exposed through [`confnorm_model::Introspect`]; the transport
//! stack through [`confnorm_model::ProtocolStack`], where only the
//! `properties` table of each component is tagged as configurable.

pub mod document;
pub mod error;
pub mod transport;

pub use document::{ConfigDocument, DEFAULT_CACHE_NAME};
pub use error::{DocumentError, DocumentResult};
pub use transport::{TransportComponent, TransportStack};
