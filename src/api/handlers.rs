use crate::error::BillingError;
use crate::export::write_bill_csv;
use crate::models::RawItem;
use crate::service::generate_monthly_bill;
use axum::{
    extract::Json,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// 请求体: 目标月份 + 原始明细
#[derive(Debug, Deserialize)]
pub struct MonthlyBillRequest {
    pub target_month: String,
    #[serde(default)]
    pub items: Vec<RawItem>,
}

/// 失败响应体
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 生成月度账单 (JSON)
pub async fn monthly_bill(Json(req): Json<MonthlyBillRequest>) -> Response {
    match generate_monthly_bill(&req.items, &req.target_month) {
        Ok(bill) => (StatusCode::OK, Json(bill)).into_response(),
        Err(e) => rejected(&req.target_month, e),
    }
}

/// 生成月度账单 (CSV)
pub async fn monthly_bill_csv(Json(req): Json<MonthlyBillRequest>) -> Response {
    let bill = match generate_monthly_bill(&req.items, &req.target_month) {
        Ok(bill) => bill,
        Err(e) => return rejected(&req.target_month, e),
    };

    let mut body = Vec::new();
    if let Err(e) = write_bill_csv(&bill, &mut body) {
        tracing::error!("CSV export for {} failed: {}", req.target_month, e);
        let response = ErrorResponse {
            success: false,
            message: format!("Error: {}", e),
        };
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response();
    }

    (StatusCode::OK, [(header::CONTENT_TYPE, "text/csv; charset=utf-8")], body).into_response()
}

fn rejected(target_month: &str, e: BillingError) -> Response {
    tracing::warn!("Bill for {} rejected: {}", target_month, e);
    let response = ErrorResponse {
        success: false,
        message: format!("Error: {}", e),
    };
    (StatusCode::BAD_REQUEST, Json(response)).into_response()
}
