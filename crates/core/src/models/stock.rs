use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Quick-lookup snapshot from `GET /stock/{symbol}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockQuote {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub summary: String,
}

/// Extended payload from `GET /stock/{symbol}/details`, backing the
/// detail/chart modal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockDetails {
    pub name: String,
    pub current_price: Option<f64>,
    pub performance_metrics: PerformanceMetrics,
    pub chart_data: Vec<ChartPoint>,
}

/// Provider data is best-effort; every metric is nullable and renders
/// as "N/A" when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub market_cap: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub one_year_return: Option<f64>,
    pub beta: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub price_to_book: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
}

/// One point of price/volume history for the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub price: f64,
    pub volume: u64,
}
