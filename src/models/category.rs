use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Job title suggestions grouped by trade, as served by `/api/jobs/categories`.
pub type CategoryCatalog = BTreeMap<String, Vec<String>>;

/// Every suggested title across all groups, in group order.
pub fn flatten_catalog(catalog: &CategoryCatalog) -> Vec<String> {
    catalog.values().flatten().cloned().collect()
}
