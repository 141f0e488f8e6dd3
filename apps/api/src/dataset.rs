//! In-memory dataset: inventory and sales records with pure read queries.
//!
//! The store is fixed at process start and shared behind an `Arc`; nothing in
//! the request path mutates it, so queries need no synchronization.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stock level below which an item counts as running low.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// A stocked menu item. `name` is the unique, case-insensitive key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub name: String,
    pub quantity: u32,
    pub unit_price: u32,
}

/// One sales line: how much of a single item sold on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub date: NaiveDate,
    pub item_name: String,
    pub quantity_sold: u32,
    pub total_profit: i64,
}

/// Per-item sales aggregate produced by the top-selling ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemTotals {
    pub item_name: String,
    pub total_sold: u32,
    pub total_profit: i64,
}

/// Read-only store over the two static collections.
#[derive(Debug, Clone)]
pub struct DatasetStore {
    inventory: Vec<InventoryItem>,
    sales: Vec<SaleRecord>,
    reference_date: NaiveDate,
}

impl DatasetStore {
    pub fn new(
        inventory: Vec<InventoryItem>,
        sales: Vec<SaleRecord>,
        reference_date: NaiveDate,
    ) -> Self {
        Self {
            inventory,
            sales,
            reference_date,
        }
    }

    /// The fixed dataset the service ships with.
    pub fn seed() -> Self {
        let inventory = vec![
            item("Burger", 24, 120),
            item("Pizza", 10, 250),
            item("Fries", 40, 60),
            item("Sandwich", 15, 90),
            item("Pasta", 8, 180),
            item("Salad", 20, 100),
        ];
        let sales = vec![
            sale(day(2025, 9, 9), "Burger", 15, 1800),
            sale(day(2025, 9, 9), "Pizza", 3, 750),
            sale(day(2025, 9, 9), "Fries", 22, 1320),
            sale(day(2025, 9, 8), "Burger", 20, 2400),
            sale(day(2025, 9, 8), "Pizza", 5, 1250),
            sale(day(2025, 9, 7), "Sandwich", 12, 1080),
        ];
        Self::new(inventory, sales, day(2025, 9, 9))
    }

    pub fn inventory(&self) -> &[InventoryItem] {
        &self.inventory
    }

    pub fn sales(&self) -> &[SaleRecord] {
        &self.sales
    }

    /// The date the dataset treats as "today".
    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    pub fn inventory_count(&self) -> usize {
        self.inventory.len()
    }

    pub fn sales_count(&self) -> usize {
        self.sales.len()
    }

    /// Case-insensitive exact lookup by item name.
    pub fn item_by_name(&self, name: &str) -> Option<&InventoryItem> {
        self.inventory
            .iter()
            .find(|item| item.name.eq_ignore_ascii_case(name))
    }

    /// Items with stock strictly below `threshold`, dataset order preserved.
    pub fn low_stock(&self, threshold: u32) -> Vec<InventoryItem> {
        self.inventory
            .iter()
            .filter(|item| item.quantity < threshold)
            .cloned()
            .collect()
    }

    /// Sales recorded on `date`, original order preserved.
    pub fn sales_on(&self, date: NaiveDate) -> Vec<SaleRecord> {
        self.sales
            .iter()
            .filter(|sale| sale.date == date)
            .cloned()
            .collect()
    }

    /// Total profit over sales recorded on `date`.
    pub fn profit_on(&self, date: NaiveDate) -> i64 {
        self.sales
            .iter()
            .filter(|sale| sale.date == date)
            .map(|sale| sale.total_profit)
            .sum()
    }

    /// Total profit over all sales records.
    pub fn total_profit(&self) -> i64 {
        self.sales.iter().map(|sale| sale.total_profit).sum()
    }

    /// Per-item totals sorted by quantity sold, descending.
    ///
    /// Grouping follows first appearance in the sales log and the sort is
    /// stable, so ties keep that order. Repeated calls yield the same ranking.
    pub fn top_selling(&self) -> Vec<ItemTotals> {
        let mut totals: Vec<ItemTotals> = Vec::new();
        for sale in &self.sales {
            match totals.iter_mut().find(|t| t.item_name == sale.item_name) {
                Some(t) => {
                    t.total_sold += sale.quantity_sold;
                    t.total_profit += sale.total_profit;
                }
                None => totals.push(ItemTotals {
                    item_name: sale.item_name.clone(),
                    total_sold: sale.quantity_sold,
                    total_profit: sale.total_profit,
                }),
            }
        }
        totals.sort_by(|a, b| b.total_sold.cmp(&a.total_sold));
        totals
    }
}

fn item(name: &str, quantity: u32, unit_price: u32) -> InventoryItem {
    InventoryItem {
        name: name.to_string(),
        quantity,
        unit_price,
    }
}

fn sale(date: NaiveDate, item_name: &str, quantity_sold: u32, total_profit: i64) -> SaleRecord {
    SaleRecord {
        date,
        item_name: item_name.to_string(),
        quantity_sold,
        total_profit,
    }
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid calendar date")
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_counts() {
        let dataset = DatasetStore::seed();
        assert_eq!(dataset.inventory_count(), 6);
        assert_eq!(dataset.sales_count(), 6);
        assert_eq!(dataset.reference_date(), day(2025, 9, 9));
    }

    #[test]
    fn test_item_lookup_is_case_insensitive() {
        let dataset = DatasetStore::seed();
        let burger = dataset.item_by_name("burger").unwrap();
        assert_eq!(burger.name, "Burger");
        assert_eq!(burger.quantity, 24);
        assert_eq!(burger.unit_price, 120);
        assert!(dataset.item_by_name("BURGER").is_some());
    }

    #[test]
    fn test_item_lookup_not_found() {
        let dataset = DatasetStore::seed();
        assert!(dataset.item_by_name("Samosa").is_none());
    }

    #[test]
    fn test_low_stock_default_threshold() {
        let dataset = DatasetStore::seed();
        let low = dataset.low_stock(LOW_STOCK_THRESHOLD);
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].name, "Pasta");
        assert_eq!(low[0].quantity, 8);
    }

    #[test]
    fn test_low_stock_preserves_dataset_order() {
        let dataset = DatasetStore::seed();
        let low = dataset.low_stock(16);
        let names: Vec<&str> = low.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Pizza", "Sandwich", "Pasta"]);
    }

    #[test]
    fn test_sales_on_reference_date() {
        let dataset = DatasetStore::seed();
        let sales = dataset.sales_on(day(2025, 9, 9));
        let items: Vec<&str> = sales.iter().map(|s| s.item_name.as_str()).collect();
        assert_eq!(items, vec!["Burger", "Pizza", "Fries"]);
    }

    #[test]
    fn test_profit_on_date() {
        let dataset = DatasetStore::seed();
        assert_eq!(dataset.profit_on(day(2025, 9, 9)), 3870);
        assert_eq!(dataset.profit_on(day(2025, 9, 7)), 1080);
        assert_eq!(dataset.profit_on(day(2025, 1, 1)), 0);
    }

    #[test]
    fn test_total_profit_all_time() {
        let dataset = DatasetStore::seed();
        assert_eq!(dataset.total_profit(), 8600);
    }

    #[test]
    fn test_top_selling_ranking() {
        let dataset = DatasetStore::seed();
        let ranking = dataset.top_selling();
        let names: Vec<&str> = ranking.iter().map(|t| t.item_name.as_str()).collect();
        assert_eq!(names, vec!["Burger", "Fries", "Sandwich", "Pizza"]);
        assert_eq!(ranking[0].total_sold, 35);
        assert_eq!(ranking[0].total_profit, 4200);
        assert_eq!(ranking[3].total_sold, 8);
        assert_eq!(ranking[3].total_profit, 2000);
    }

    #[test]
    fn test_top_selling_ties_keep_first_appearance_order() {
        let dataset = DatasetStore::new(
            vec![],
            vec![
                sale(day(2025, 9, 9), "Chai", 5, 50),
                sale(day(2025, 9, 9), "Lassi", 5, 150),
                sale(day(2025, 9, 8), "Kulfi", 9, 270),
            ],
            day(2025, 9, 9),
        );
        let ranking = dataset.top_selling();
        let names: Vec<&str> = ranking.iter().map(|t| t.item_name.as_str()).collect();
        assert_eq!(names, vec!["Kulfi", "Chai", "Lassi"]);
    }

    #[test]
    fn test_top_selling_is_deterministic() {
        let dataset = DatasetStore::seed();
        assert_eq!(dataset.top_selling(), dataset.top_selling());
    }

    #[test]
    fn test_sale_record_date_serializes_as_calendar_string() {
        let record = sale(day(2025, 9, 9), "Burger", 15, 1800);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["date"], "2025-09-09");
        assert_eq!(json["total_profit"], 1800);
    }
}
