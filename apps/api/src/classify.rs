//! Query classification and context building.
//!
//! Classification is an ordered list of (category, keywords) rules evaluated
//! top-to-bottom on the lowercased query; the first rule with any keyword
//! present wins. The priority order is load-bearing business logic: a query
//! containing both "stock" and "profit" is an inventory query, full stop.

use serde::{Deserialize, Serialize};

use crate::dataset::{
    DatasetStore, InventoryItem, ItemTotals, SaleRecord, LOW_STOCK_THRESHOLD,
};
use chrono::NaiveDate;

/// The five fixed query categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Inventory,
    Sales,
    LowStock,
    TopSelling,
    Overview,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Inventory => "inventory",
            Category::Sales => "sales",
            Category::LowStock => "low_stock",
            Category::TopSelling => "top_selling",
            Category::Overview => "overview",
        }
    }
}

/// Keyword rules in priority order. `Overview` is the default when nothing
/// matches, so it carries no rule here.
const RULES: &[(Category, &[&str])] = &[
    (
        Category::Inventory,
        &["inventory", "stock", "left", "remaining", "available"],
    ),
    (Category::Sales, &["profit", "sales", "revenue", "earnings"]),
    (Category::LowStock, &["low", "running", "out", "shortage"]),
    (
        Category::TopSelling,
        &["top", "best", "popular", "selling"],
    ),
];

/// Classifies a query by substring keyword membership, first match wins.
pub fn classify(query: &str) -> Category {
    let query = query.to_lowercase();
    for (category, keywords) in RULES {
        if keywords.iter().any(|keyword| query.contains(keyword)) {
            return *category;
        }
    }
    Category::Overview
}

/// Inventory queries resolve to a single named item or the whole list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InventoryPayload {
    Item(InventoryItem),
    All(Vec<InventoryItem>),
}

/// Sales for one day (`date` present) or all-time (`date` absent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub records: Vec<SaleRecord>,
    pub total_profit: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewPayload {
    pub inventory: Vec<InventoryItem>,
    pub recent_sales: Vec<SaleRecord>,
    pub total_profit: i64,
}

/// The data subset retrieved for one request, tagged with its category.
/// Serializes as `{"category": "...", "payload": ...}` with exactly one
/// payload shape per category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", content = "payload", rename_all = "snake_case")]
pub enum QueryContext {
    Inventory(InventoryPayload),
    Sales(SalesSummary),
    LowStock(Vec<InventoryItem>),
    TopSelling(Vec<ItemTotals>),
    Overview(OverviewPayload),
}

impl QueryContext {
    pub fn category(&self) -> Category {
        match self {
            QueryContext::Inventory(_) => Category::Inventory,
            QueryContext::Sales(_) => Category::Sales,
            QueryContext::LowStock(_) => Category::LowStock,
            QueryContext::TopSelling(_) => Category::TopSelling,
            QueryContext::Overview(_) => Category::Overview,
        }
    }
}

/// Classifies `query` and materializes the matching data subset.
///
/// Pure in (query, dataset): repeated calls with an unchanged dataset yield
/// an identical context.
pub fn build_context(query: &str, dataset: &DatasetStore) -> QueryContext {
    let query_lower = query.to_lowercase();
    match classify(query) {
        Category::Inventory => {
            // First dataset-order item whose name appears in the query.
            let named = dataset
                .inventory()
                .iter()
                .find(|item| query_lower.contains(&item.name.to_lowercase()));
            match named {
                Some(item) => QueryContext::Inventory(InventoryPayload::Item(item.clone())),
                None => {
                    QueryContext::Inventory(InventoryPayload::All(dataset.inventory().to_vec()))
                }
            }
        }
        Category::Sales => {
            let today = dataset.reference_date();
            if query_lower.contains("today") || query_lower.contains(&today.to_string()) {
                QueryContext::Sales(SalesSummary {
                    date: Some(today),
                    records: dataset.sales_on(today),
                    total_profit: dataset.profit_on(today),
                })
            } else {
                QueryContext::Sales(SalesSummary {
                    date: None,
                    records: dataset.sales().to_vec(),
                    total_profit: dataset.total_profit(),
                })
            }
        }
        Category::LowStock => QueryContext::LowStock(dataset.low_stock(LOW_STOCK_THRESHOLD)),
        Category::TopSelling => QueryContext::TopSelling(dataset.top_selling()),
        Category::Overview => {
            let today = dataset.reference_date();
            QueryContext::Overview(OverviewPayload {
                inventory: dataset.inventory().to_vec(),
                recent_sales: dataset.sales_on(today),
                total_profit: dataset.total_profit(),
            })
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
