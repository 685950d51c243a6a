use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DailySales — One entry of `order_at_list`
// ---------------------------------------------------------------------------

/// Per-day sales totals as returned by the metrics endpoint.
///
/// `order_at` is an ISO date (`2024-03-01`) or date-time string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySales {
    pub order_at: String,
    #[serde(default)]
    pub total_revenue: f64,
    #[serde(default)]
    pub total_profit: f64,
}

// ---------------------------------------------------------------------------
// DashboardMetrics — Payload of GET /api/v1/dashboard/metrics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesMetrics {
    #[serde(default)]
    pub total_orders: i64,
    #[serde(default)]
    pub total_revenue: f64,
    #[serde(default)]
    pub total_items_sold: i64,
    #[serde(default)]
    pub total_profit: f64,
    #[serde(default)]
    pub order_at_list: Vec<DailySales>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportMetrics {
    #[serde(default)]
    pub total_imports: i64,
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub total_items_imported: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductMetrics {
    #[serde(default)]
    pub total_products: i64,
    #[serde(default)]
    pub low_stock_products: i64,
    #[serde(default)]
    pub out_of_stock_products: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    #[serde(default)]
    pub sales: SalesMetrics,
    #[serde(default)]
    pub imports: Option<ImportMetrics>,
    #[serde(default)]
    pub products: Option<ProductMetrics>,
}

/// `{success, metrics}` or `{success: false, message}` wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsEnvelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub metrics: Option<DashboardMetrics>,
}

// ---------------------------------------------------------------------------
// DashboardStats — Headline counters for the stat cards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub total_products: i64,
    #[serde(default)]
    pub total_imports: i64,
    #[serde(default)]
    pub total_orders: i64,
}

// ---------------------------------------------------------------------------
// SalesSummary — Range totals shown beside the chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub total_revenue: f64,
    pub total_profit: f64,
}

impl From<&SalesMetrics> for SalesSummary {
    fn from(sales: &SalesMetrics) -> Self {
        Self {
            total_revenue: sales.total_revenue,
            total_profit: sales.total_profit,
        }
    }
}
