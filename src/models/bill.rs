use bigdecimal::BigDecimal;
use serde::Serialize;

use super::money::serialize_as_f64;

/// 账单明细行 (由一个分组汇总而来)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillLineItem {
    pub item_code: String,
    #[serde(serialize_with = "serialize_as_f64")]
    pub rate: BigDecimal,
    pub qty: i128,
    #[serde(serialize_with = "serialize_as_f64")]
    pub amount: BigDecimal,
    pub billing_period: String,
}

/// 月度账单
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bill {
    pub line_items: Vec<BillLineItem>,
    #[serde(serialize_with = "serialize_as_f64")]
    pub total_revenue: BigDecimal,
}
