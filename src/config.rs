//! Controller configuration.

use serde::{Deserialize, Serialize};

use crate::pagination::{ALLOWED_PAGE_SIZES, DEFAULT_PAGE_SIZE};
use crate::types::SortDescriptor;

/// Quiescence window for the search debounce gate.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// How long the search input must be static before a search fires, in
    /// milliseconds.
    pub debounce_ms: u64,
    pub default_page_size: usize,
    /// Page sizes offered to the user.
    pub allowed_page_sizes: Vec<usize>,
    pub default_sort: SortDescriptor,
    pub endpoint: EndpointConfig,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            default_page_size: DEFAULT_PAGE_SIZE,
            allowed_page_sizes: ALLOWED_PAGE_SIZES.to_vec(),
            default_sort: SortDescriptor::default(),
            endpoint: EndpointConfig::default(),
        }
    }
}

/// Remote dataset endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Base URL the sales API is mounted under.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/".to_string(),
            timeout_secs: 30,
        }
    }
}
