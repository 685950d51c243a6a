use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Product — Catalogue entry with prices and stock level
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Purchase price per unit, used for imports.
    #[serde(default)]
    pub unit_price: f64,
    /// Selling price per unit, used for orders.
    #[serde(default)]
    pub sale_price: f64,
    #[serde(default)]
    pub stock_quantity: i64,
}

impl Product {
    pub fn is_out_of_stock(&self) -> bool {
        self.stock_quantity <= 0
    }

    /// Stock value at purchase price.
    pub fn stock_value(&self) -> f64 {
        self.stock_quantity.max(0) as f64 * self.unit_price
    }
}

// ---------------------------------------------------------------------------
// Customer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
}
