use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ImportSubmission — Body of POST /api/v1/import
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportLineInput {
    #[serde(rename = "productId")]
    pub product_id: i64,
    pub quantity: u32,
    pub unit_price: f64,
    pub total_line_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportSubmission {
    pub import_lines: Vec<ImportLineInput>,
    pub import_date: NaiveDate,
    pub other_expenses: f64,
}

impl ImportSubmission {
    /// Sum of line totals plus other expenses.
    pub fn total(&self) -> f64 {
        self.import_lines
            .iter()
            .map(|l| l.total_line_price)
            .sum::<f64>()
            + self.other_expenses
    }
}

// ---------------------------------------------------------------------------
// OrderSubmission — Body of POST /api/v1/order
// ---------------------------------------------------------------------------

/// Either an existing customer by id or a new one by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomerRef {
    Existing { id: i64 },
    New { name: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineInput {
    pub product_id: i64,
    pub quantity: u32,
    pub sale_price: f64,
    pub discount: f64,
}

impl OrderLineInput {
    pub fn total(&self) -> f64 {
        self.quantity as f64 * self.sale_price - self.discount
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSubmission {
    pub customer: CustomerRef,
    pub ordered_date: NaiveDate,
    pub order_lines: Vec<OrderLineInput>,
}

impl OrderSubmission {
    pub fn total(&self) -> f64 {
        self.order_lines.iter().map(OrderLineInput::total).sum()
    }
}
