//! Client-side state for the import and order forms.
//!
//! A draft holds one line per catalogue product. Quantities start at zero;
//! only lines with a positive quantity are submitted. Totals are derived on
//! every call, never cached.

use chrono::NaiveDate;

use crate::error::{DashboardError, Result};
use crate::models::{
    CustomerRef, ImportLineInput, ImportSubmission, OrderLineInput, OrderSubmission, Product,
};

const NOTHING_TO_SUBMIT: &str = "no lines with a quantity greater than 0";

fn unknown_product(product_id: i64) -> DashboardError {
    DashboardError::InvalidArgument(format!("product {} is not part of this draft", product_id))
}

// ---------------------------------------------------------------------------
// ImportDraft
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ImportDraftLine {
    pub product_id: i64,
    pub unit_price: f64,
    pub quantity: u32,
}

impl ImportDraftLine {
    pub fn total(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

/// Stock purchase being assembled before `POST /api/v1/import`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDraft {
    pub import_date: NaiveDate,
    pub other_expenses: f64,
    lines: Vec<ImportDraftLine>,
}

impl ImportDraft {
    pub fn new(import_date: NaiveDate, products: &[Product]) -> Self {
        Self {
            import_date,
            other_expenses: 0.0,
            lines: products
                .iter()
                .map(|p| ImportDraftLine {
                    product_id: p.id,
                    unit_price: p.unit_price,
                    quantity: 0,
                })
                .collect(),
        }
    }

    pub fn lines(&self) -> &[ImportDraftLine] {
        &self.lines
    }

    pub fn set_quantity(&mut self, product_id: i64, quantity: u32) -> Result<()> {
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product_id)
            .ok_or_else(|| unknown_product(product_id))?;
        line.quantity = quantity;
        Ok(())
    }

    /// Line total for a product; zero if the product is not in the draft.
    pub fn line_total(&self, product_id: i64) -> f64 {
        self.lines
            .iter()
            .find(|l| l.product_id == product_id)
            .map(ImportDraftLine::total)
            .unwrap_or(0.0)
    }

    /// Sum of line totals plus other expenses.
    pub fn total(&self) -> f64 {
        self.lines.iter().map(ImportDraftLine::total).sum::<f64>() + self.other_expenses
    }

    /// Zero every quantity and the other expenses, keeping the date.
    pub fn reset(&mut self) {
        for line in &mut self.lines {
            line.quantity = 0;
        }
        self.other_expenses = 0.0;
    }

    pub fn to_submission(&self) -> Result<ImportSubmission> {
        if !self.other_expenses.is_finite() || self.other_expenses < 0.0 {
            return Err(DashboardError::Validation(
                "other expenses cannot be negative".into(),
            ));
        }

        let mut import_lines = Vec::new();
        for line in self.lines.iter().filter(|l| l.quantity > 0) {
            if line.unit_price <= 0.0 {
                return Err(DashboardError::Validation(format!(
                    "unit price of product {} must be greater than 0",
                    line.product_id
                )));
            }
            import_lines.push(ImportLineInput {
                product_id: line.product_id,
                quantity: line.quantity,
                unit_price: line.unit_price,
                total_line_price: line.total(),
            });
        }

        if import_lines.is_empty() {
            return Err(DashboardError::Validation(NOTHING_TO_SUBMIT.into()));
        }

        Ok(ImportSubmission {
            import_lines,
            import_date: self.import_date,
            other_expenses: self.other_expenses,
        })
    }
}

// ---------------------------------------------------------------------------
// OrderDraft
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraftLine {
    pub product_id: i64,
    pub sale_price: f64,
    pub quantity: u32,
    pub discount: f64,
}

impl OrderDraftLine {
    /// `quantity * sale_price - discount`. The discount applies to the
    /// whole line, not per unit.
    pub fn total(&self) -> f64 {
        self.quantity as f64 * self.sale_price - self.discount
    }
}

/// Sale being recorded before `POST /api/v1/order`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub ordered_date: NaiveDate,
    customer: Option<CustomerRef>,
    lines: Vec<OrderDraftLine>,
}

impl OrderDraft {
    pub fn new(ordered_date: NaiveDate, products: &[Product]) -> Self {
        Self {
            ordered_date,
            customer: None,
            lines: products
                .iter()
                .map(|p| OrderDraftLine {
                    product_id: p.id,
                    sale_price: p.sale_price,
                    quantity: 0,
                    discount: 0.0,
                })
                .collect(),
        }
    }

    pub fn lines(&self) -> &[OrderDraftLine] {
        &self.lines
    }

    pub fn customer(&self) -> Option<&CustomerRef> {
        self.customer.as_ref()
    }

    pub fn select_customer(&mut self, id: i64) {
        self.customer = Some(CustomerRef::Existing { id });
    }

    /// Order for a customer not yet known to the backend. A blank name
    /// clears the selection.
    pub fn new_customer(&mut self, name: &str) {
        let name = name.trim();
        self.customer = if name.is_empty() {
            None
        } else {
            Some(CustomerRef::New {
                name: name.to_string(),
            })
        };
    }

    fn line_mut(&mut self, product_id: i64) -> Result<&mut OrderDraftLine> {
        self.lines
            .iter_mut()
            .find(|l| l.product_id == product_id)
            .ok_or_else(|| unknown_product(product_id))
    }

    pub fn set_quantity(&mut self, product_id: i64, quantity: u32) -> Result<()> {
        self.line_mut(product_id)?.quantity = quantity;
        Ok(())
    }

    pub fn set_discount(&mut self, product_id: i64, discount: f64) -> Result<()> {
        if !discount.is_finite() || discount < 0.0 {
            return Err(DashboardError::Validation(
                "discount cannot be negative".into(),
            ));
        }
        self.line_mut(product_id)?.discount = discount;
        Ok(())
    }

    pub fn line_total(&self, product_id: i64) -> f64 {
        self.lines
            .iter()
            .find(|l| l.product_id == product_id)
            .map(OrderDraftLine::total)
            .unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.lines.iter().map(OrderDraftLine::total).sum()
    }

    /// Clear quantities, discounts and the customer, keeping the date.
    pub fn reset(&mut self) {
        for line in &mut self.lines {
            line.quantity = 0;
            line.discount = 0.0;
        }
        self.customer = None;
    }

    pub fn to_submission(&self) -> Result<OrderSubmission> {
        let customer = self.customer.clone().ok_or_else(|| {
            DashboardError::Validation(
                "select a customer or enter a new customer name".into(),
            )
        })?;

        let mut order_lines = Vec::new();
        for line in self.lines.iter().filter(|l| l.quantity > 0) {
            if line.sale_price <= 0.0 {
                return Err(DashboardError::Validation(format!(
                    "sale price of product {} must be greater than 0",
                    line.product_id
                )));
            }
            order_lines.push(OrderLineInput {
                product_id: line.product_id,
                quantity: line.quantity,
                sale_price: line.sale_price,
                discount: line.discount,
            });
        }

        if order_lines.is_empty() {
            return Err(DashboardError::Validation(NOTHING_TO_SUBMIT.into()));
        }

        Ok(OrderSubmission {
            customer,
            ordered_date: self.ordered_date,
            order_lines,
        })
    }
}
