//! Product catalogue and customer lookups.

use crate::config;
use crate::connection::Connection;
use crate::error::Result;
use crate::models::{Customer, Product};

/// Query interface for the product catalogue.
pub struct ProductQuery<'a> {
    conn: &'a Connection,
}

impl<'a> ProductQuery<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn list(&self) -> Result<Vec<Product>> {
        self.conn.get(config::PRODUCTS, &[])
    }

    /// Products with no stock left.
    pub fn out_of_stock(&self) -> Result<Vec<Product>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(Product::is_out_of_stock)
            .collect())
    }

    /// Total stock value at purchase price.
    pub fn inventory_value(&self) -> Result<f64> {
        Ok(self.list()?.iter().map(Product::stock_value).sum())
    }
}

/// Query interface for customers.
pub struct CustomerQuery<'a> {
    conn: &'a Connection,
}

impl<'a> CustomerQuery<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn list(&self) -> Result<Vec<Customer>> {
        self.conn.get(config::CUSTOMERS, &[])
    }

    /// Case-insensitive exact name lookup.
    pub fn find_by_name(&self, name: &str) -> Result<Option<Customer>> {
        let needle = name.trim().to_lowercase();
        Ok(self
            .list()?
            .into_iter()
            .find(|c| c.name.trim().to_lowercase() == needle))
    }
}
