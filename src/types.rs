use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GridError;

/// A flattened, table-ready sales record.
///
/// Produced from a [`WireRow`](crate::endpoint::WireRow) by lifting the
/// nested customer and product sub-records into plain columns. The
/// controller never re-nests it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub id: String,
    /// ISO 8601 date string as served by the backend.
    pub sale_date: String,
    pub customer_name: String,
    pub product_name: String,
    pub quantity: u32,
    pub unit_value: f64,
    pub total_value: f64,
}

/// Sortable columns of the sales table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    SaleDate,
    CustomerName,
    ProductName,
    Quantity,
    UnitValue,
    TotalValue,
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortField::SaleDate => write!(f, "saleDate"),
            SortField::CustomerName => write!(f, "customerName"),
            SortField::ProductName => write!(f, "productName"),
            SortField::Quantity => write!(f, "quantity"),
            SortField::UnitValue => write!(f, "unitValue"),
            SortField::TotalValue => write!(f, "totalValue"),
        }
    }
}

impl FromStr for SortField {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "saleDate" => Ok(SortField::SaleDate),
            "customerName" => Ok(SortField::CustomerName),
            "productName" => Ok(SortField::ProductName),
            "quantity" => Ok(SortField::Quantity),
            "unitValue" => Ok(SortField::UnitValue),
            "totalValue" => Ok(SortField::TotalValue),
            _ => Err(GridError::Config(format!("unknown sort field '{}'", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Wire value for the `sortDir` query parameter.
    pub fn as_param(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_param())
    }
}

/// The single active sort: one field, one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortDescriptor {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortDescriptor {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Apply a header click: clicking the active field flips direction,
    /// clicking a new field selects it ascending.
    pub fn toggled(self, field: SortField) -> Self {
        if self.field == field {
            Self {
                field,
                direction: self.direction.flipped(),
            }
        } else {
            Self {
                field,
                direction: SortDirection::Asc,
            }
        }
    }
}

impl Default for SortDescriptor {
    /// Newest sales first.
    fn default() -> Self {
        Self {
            field: SortField::SaleDate,
            direction: SortDirection::Desc,
        }
    }
}

/// Dataset presentation mode, a pure function of the settled search query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Paginated, server-truth page descriptors.
    #[default]
    Browse,
    /// Unpaginated full result set from the search endpoint.
    Search,
}

impl Mode {
    pub fn for_query(settled: &str) -> Self {
        if settled.trim().is_empty() {
            Mode::Browse
        } else {
            Mode::Search
        }
    }
}
