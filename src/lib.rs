//! gridsource: race-safe dataset controller for paginated table views.
//!
//! Mediates between a remote, paginated, server-sortable data source and a
//! free-text search mode: debounced input, a client-side fallback sort for
//! fields the backend cannot order by, and generation-stamped request
//! coordination so a slow earlier fetch never overwrites a faster later one.
//!
//! The embedding view drives a [`DatasetController`] from its event loop and
//! reads back rows, the page descriptor, and per-operation loading
//! indicators. Rendering is entirely the embedder's concern.

pub mod config;
pub mod controller;
pub mod debounce;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod pagination;
pub mod sort;
pub mod types;

pub use config::{ControllerConfig, EndpointConfig};
pub use controller::{DatasetController, FetchKind, Indicators};
pub use endpoint::{DatasetEndpoint, WireCustomer, WirePage, WireProduct, WireRow};
pub use error::{GridError, Result};
pub use http::HttpEndpoint;
pub use pagination::{ALLOWED_PAGE_SIZES, DEFAULT_PAGE_SIZE, PageDescriptor};
pub use types::{Mode, Row, SortDescriptor, SortDirection, SortField};
