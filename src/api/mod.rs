pub mod handlers;

pub use handlers::{health_check, monthly_bill, monthly_bill_csv};

use axum::{
    routing::{get, post},
    Router,
};

/// 路由表
pub fn router() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/bill/monthly", post(monthly_bill))
        .route("/api/bill/monthly/csv", post(monthly_bill_csv))
}
