//! Order normalization service library.
//!
//! Wraps the `normalizer` engine in an HTTP API: orders come in as line
//! items with encoded product ids, and go out as merged, renumbered product
//! and accessory records after being handed to the persistence sink.
//!
//! # Example
//!
//! ```ignore
//! use order_service::{create_router, AppState, InMemoryRepository, OrderService};
//!
//! let cleaners = load_cleaner_config(&config.cleaner_config_path)?;
//! let repository = InMemoryRepository::new();
//! let service = OrderService::new(
//!     NormalizerService::with_defaults(cleaners),
//!     Arc::new(repository.clone()),
//! );
//!
//! let router = create_router(AppState { service, repository });
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod repository;
pub mod service;

pub use api::{create_router, AppState, NormalizeRequest};
pub use config::{load_cleaner_config, parse_cleaner_config, ServiceConfig};
pub use error::{Error, Result};
pub use repository::{InMemoryRepository, OrderRepository, RepositoryStats};
pub use service::OrderService;
