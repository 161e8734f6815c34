//! Remote dataset endpoint boundary.
//!
//! The backend serves sales records with customer and product nested as
//! sub-records, in Spring `Page` envelopes for Browse mode and a bare array
//! for Search mode. Flattening a [`WireRow`] into a table-ready
//! [`Row`] is part of the request coordinator's response handling, not of
//! the endpoint contract.

use serde::Deserialize;

use crate::error::Result;
use crate::types::{Row, SortDirection};

/// A sales record as served over the wire.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WireRow {
    pub id: u64,
    #[serde(rename = "dataVenda")]
    pub sale_date: String,
    #[serde(rename = "cliente")]
    pub customer: WireCustomer,
    #[serde(rename = "produto")]
    pub product: WireProduct,
    #[serde(rename = "quantidade")]
    pub quantity: u32,
    #[serde(rename = "valorUnitario")]
    pub unit_value: f64,
    #[serde(rename = "valorTotalVenda")]
    pub total_value: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WireCustomer {
    #[serde(rename = "nome")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WireProduct {
    #[serde(rename = "nome")]
    pub name: String,
}

impl From<WireRow> for Row {
    fn from(wire: WireRow) -> Self {
        Row {
            id: wire.id.to_string(),
            sale_date: wire.sale_date,
            customer_name: wire.customer.name,
            product_name: wire.product.name,
            quantity: wire.quantity,
            unit_value: wire.unit_value,
            total_value: wire.total_value,
        }
    }
}

/// One page of results in the backend's Spring `Page` envelope.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct WirePage {
    #[serde(default)]
    pub content: Vec<WireRow>,
    #[serde(rename = "totalElements", default)]
    pub total_elements: usize,
    #[serde(rename = "totalPages", default)]
    pub total_pages: usize,
    /// True when this is the first page.
    #[serde(default)]
    pub first: bool,
    /// True when this is the last page.
    #[serde(default)]
    pub last: bool,
}

/// Read interface of the remote dataset endpoint.
///
/// `list_page` serves Browse mode; `search` serves Search mode and returns
/// the full, unordered result set.
pub trait DatasetEndpoint: Send + Sync {
    fn list_page(
        &self,
        page_index: usize,
        page_size: usize,
        sort_key: &str,
        sort_dir: SortDirection,
    ) -> impl std::future::Future<Output = Result<WirePage>> + Send;

    fn search(&self, query: &str) -> impl std::future::Future<Output = Result<Vec<WireRow>>> + Send;
}

/// Flatten a batch of wire records for display.
pub fn flatten_rows(rows: Vec<WireRow>) -> Vec<Row> {
    rows.into_iter().map(Row::from).collect()
}
