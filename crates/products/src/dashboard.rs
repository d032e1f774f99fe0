//! Numbers shown on the dashboard cards.

use std::collections::HashSet;

use crate::product::Product;

/// How many records the "recent" panel shows.
pub const RECENT_LIMIT: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub total_products: usize,
    /// Distinct category labels (posting period, legacy category, or "Uncategorized").
    pub unique_categories: usize,
    /// Sum of legacy prices.
    pub total_value: f64,
    pub recent: Vec<Product>,
}

impl DashboardSummary {
    /// Summarise `products` in API order; the first records count as most recent.
    pub fn from_products(products: &[Product]) -> Self {
        let unique_categories = products
            .iter()
            .map(Product::category_label)
            .collect::<HashSet<_>>()
            .len();

        Self {
            total_products: products.len(),
            unique_categories,
            total_value: products.iter().map(Product::price_or_zero).sum(),
            recent: products.iter().take(RECENT_LIMIT).cloned().collect(),
        }
    }

    /// Total value rounded to whole currency units, as the cards display it.
    pub fn total_value_label(&self) -> String {
        format!("₩{:.0}", self.total_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::PostingPeriodType;

    fn product(id: &str, period: Option<PostingPeriodType>, price: Option<f64>) -> Product {
        Product {
            id: id.to_string(),
            posting_period_type: period,
            price,
            ..Product::default()
        }
    }

    #[test]
    fn empty_list_summarises_to_zero() {
        let summary = DashboardSummary::from_products(&[]);
        assert_eq!(summary.total_products, 0);
        assert_eq!(summary.unique_categories, 0);
        assert_eq!(summary.total_value, 0.0);
        assert!(summary.recent.is_empty());
        assert_eq!(summary.total_value_label(), "₩0");
    }

    #[test]
    fn counts_categories_and_sums_prices() {
        let products = vec![
            product("1", Some(PostingPeriodType::Daily), Some(10.0)),
            product("2", Some(PostingPeriodType::Daily), None),
            product("3", Some(PostingPeriodType::Permanent), Some(19.99)),
            product("4", None, None),
        ];

        let summary = DashboardSummary::from_products(&products);
        assert_eq!(summary.total_products, 4);
        // DAILY, PERMANENT, Uncategorized
        assert_eq!(summary.unique_categories, 3);
        assert!((summary.total_value - 29.99).abs() < 1e-9);
        assert_eq!(summary.total_value_label(), "₩30");
    }

    #[test]
    fn recent_keeps_first_six() {
        let products: Vec<Product> = (0..9).map(|i| product(&i.to_string(), None, None)).collect();
        let summary = DashboardSummary::from_products(&products);
        let ids: Vec<&str> = summary.recent.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["0", "1", "2", "3", "4", "5"]);
    }
}
