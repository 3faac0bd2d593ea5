use bigdecimal::{BigDecimal, Zero};
use std::hash::{Hash, Hasher};

use super::period::ActivePeriod;

/// 分组键：商品编码 + 单价 + 计费区间
///
/// 单价按数值比较 (`"1080"`、`1080`、`"1080.0"` 视为同一单价)，
/// 相等与哈希都基于规范化后的十进制文本。
#[derive(Debug, Clone)]
pub struct AggregationKey {
    pub item_code: String,
    pub rate: BigDecimal,
    pub billing_period: String,
    rate_repr: String,
}

impl AggregationKey {
    pub fn new(item_code: &str, rate: &BigDecimal, period: &ActivePeriod) -> Self {
        Self {
            item_code: item_code.to_string(),
            rate: rate.clone(),
            billing_period: period.billing_period(),
            rate_repr: canonical_decimal(rate),
        }
    }
}

impl PartialEq for AggregationKey {
    fn eq(&self, other: &Self) -> bool {
        self.item_code == other.item_code
            && self.rate_repr == other.rate_repr
            && self.billing_period == other.billing_period
    }
}

impl Eq for AggregationKey {}

impl Hash for AggregationKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.item_code.hash(state);
        self.rate_repr.hash(state);
        self.billing_period.hash(state);
    }
}

/// 去掉小数部分末尾的 0
fn canonical_decimal(value: &BigDecimal) -> String {
    let text = value.to_string();
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

/// 分组累加器
#[derive(Debug, Clone)]
pub struct AggregationBucket {
    pub qty: i128,
    pub amount: BigDecimal,
}

impl AggregationBucket {
    /// 累加一条明细 (金额已按分取整)；数量溢出时返回 `None` 且不修改分组
    pub fn add(&mut self, qty: i128, rounded_amount: &BigDecimal) -> Option<()> {
        self.qty = self.qty.checked_add(qty)?;
        self.amount += rounded_amount.clone();
        Some(())
    }
}

impl Default for AggregationBucket {
    fn default() -> Self {
        Self {
            qty: 0,
            amount: BigDecimal::zero(),
        }
    }
}
