//! Sort resolution for the sales table.
//!
//! The backend orders pages natively for most columns, but the two columns
//! produced by flattening a nested relation (customer name, product name)
//! cannot be ordered server-side. For those the request is ordered by the
//! surrogate key instead, keeping pagination stable, and the fetched rows
//! are re-ordered here with a locale-aware comparator so the sort indicator
//! shown to the user is never misleading.

use std::cmp::Ordering;

use crate::types::{Row, SortDescriptor, SortDirection, SortField};

/// Stable surrogate key the endpoint can always order by.
pub const SURROGATE_SORT_KEY: &str = "id";

/// How a sort field is satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedSort {
    /// Endpoint orders natively by this wire key.
    Server(&'static str),
    /// Endpoint orders by the surrogate key; rows are re-ordered client-side
    /// after fetch.
    ClientSide,
}

/// Capability map from sort field to server orderability.
///
/// Customer and product names live on nested relations in the backend model
/// and are the fixed set of fields requiring the client-side path.
pub fn resolve(field: SortField) -> ResolvedSort {
    match field {
        SortField::SaleDate => ResolvedSort::Server("dataVenda"),
        SortField::Quantity => ResolvedSort::Server("quantidade"),
        SortField::UnitValue => ResolvedSort::Server("valorUnitario"),
        SortField::TotalValue => ResolvedSort::Server("valorTotalVenda"),
        SortField::CustomerName | SortField::ProductName => ResolvedSort::ClientSide,
    }
}

/// Wire key actually sent with the page request for this field.
pub fn wire_sort_key(field: SortField) -> &'static str {
    match resolve(field) {
        ResolvedSort::Server(key) => key,
        ResolvedSort::ClientSide => SURROGATE_SORT_KEY,
    }
}

pub fn is_server_orderable(field: SortField) -> bool {
    matches!(resolve(field), ResolvedSort::Server(_))
}

/// Compare two rows on a field, ascending. Text columns use locale-aware
/// collation, numeric columns use numeric order.
pub fn compare(a: &Row, b: &Row, field: SortField) -> Ordering {
    match field {
        SortField::SaleDate => a.sale_date.cmp(&b.sale_date),
        SortField::CustomerName => collate(&a.customer_name, &b.customer_name),
        SortField::ProductName => collate(&a.product_name, &b.product_name),
        SortField::Quantity => a.quantity.cmp(&b.quantity),
        SortField::UnitValue => a.unit_value.total_cmp(&b.unit_value),
        SortField::TotalValue => a.total_value.total_cmp(&b.total_value),
    }
}

/// Re-order rows in place according to the active sort descriptor.
///
/// Used for the fallback path in Browse mode (one page) and for the full
/// result set in Search mode. The sort is stable, so rows equal under the
/// comparator keep their fetched order.
pub fn apply_client_sort(rows: &mut [Row], sort: SortDescriptor) {
    rows.sort_by(|a, b| {
        let ordering = compare(a, b, sort.field);
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// Locale-aware string comparison, pt-BR style: accents and case are
/// ignored at primary strength ("Á" sorts adjacent to "A", "ç" to "c"),
/// with the raw string as a deterministic tiebreak.
pub fn collate(a: &str, b: &str) -> Ordering {
    let folded = iter_folded(a).cmp(iter_folded(b));
    if folded != Ordering::Equal {
        return folded;
    }
    a.cmp(b)
}

fn iter_folded(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().map(fold_char)
}

/// Primary-strength fold for Latin letters: lowercase and strip diacritics.
fn fold_char(c: char) -> char {
    let lower = c.to_lowercase().next().unwrap_or(c);
    match lower {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}
