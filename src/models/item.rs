use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::str::FromStr;

/// 松散类型的数值字段 (数字 / 字符串 / 布尔 / null / 其他)
///
/// 上游数据里数量和单价既可能是 `10` 也可能是 `"10"`，
/// 转换函数永不失败，无法识别的值一律按 0 处理。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
    Number(Number),
    Text(String),
    Flag(bool),
    #[default]
    Missing,
    Other(Value),
}

/// 单价文本长度上限
const MAX_RATE_TEXT_LEN: usize = 128;

/// 单价的十进制指数上限 (与 f64 可表示范围一致)
const MAX_RATE_EXPONENT: i64 = 308;

impl NumericField {
    /// 转为整数数量；小数向零截断，字符串必须是整数，超出 i128 的值按 0 处理
    pub fn coerce_to_int(&self) -> i128 {
        match self {
            NumericField::Number(n) => {
                if let Some(v) = n.as_i64() {
                    i128::from(v)
                } else if let Some(v) = n.as_u64() {
                    i128::from(v)
                } else {
                    n.as_f64()
                        .map(f64::trunc)
                        .filter(|v| v.is_finite() && v.abs() < i128::MAX as f64)
                        .map(|v| v as i128)
                        .unwrap_or(0)
                }
            }
            NumericField::Text(s) => s.trim().parse::<i128>().unwrap_or(0),
            NumericField::Flag(b) => i128::from(*b),
            NumericField::Missing | NumericField::Other(_) => 0,
        }
    }

    /// 转为十进制单价；超出 f64 范围的指数 (如 `1e400`) 与非数字一样按 0 处理
    pub fn coerce_to_decimal(&self) -> BigDecimal {
        let parsed = match self {
            NumericField::Number(n) => BigDecimal::from_str(&n.to_string()).ok(),
            NumericField::Text(s) => {
                let s = s.trim();
                if s.len() > MAX_RATE_TEXT_LEN {
                    None
                } else {
                    BigDecimal::from_str(s).ok()
                }
            }
            NumericField::Flag(b) => Some(BigDecimal::from(i64::from(*b))),
            NumericField::Missing | NumericField::Other(_) => None,
        };
        parsed.filter(within_rate_range).unwrap_or_else(BigDecimal::zero)
    }
}

/// 只看系数位数和 scale，不展开 10^exp
fn within_rate_range(value: &BigDecimal) -> bool {
    let (digits, scale) = value.as_bigint_and_exponent();
    let len = digits.to_string().trim_start_matches('-').len() as i64;
    scale.abs() <= MAX_RATE_EXPONENT && len - scale <= MAX_RATE_EXPONENT
}

impl From<i64> for NumericField {
    fn from(v: i64) -> Self {
        NumericField::Number(Number::from(v))
    }
}

impl From<i32> for NumericField {
    fn from(v: i32) -> Self {
        NumericField::from(i64::from(v))
    }
}

impl From<f64> for NumericField {
    fn from(v: f64) -> Self {
        Number::from_f64(v).map(NumericField::Number).unwrap_or_default()
    }
}

impl From<&str> for NumericField {
    fn from(v: &str) -> Self {
        NumericField::Text(v.to_string())
    }
}

/// 原始计费明细 (来自上游的订阅行)
///
/// 只保留计费需要的字段，`sales_description`、`amount` 等其余字段反序列化时忽略。
/// 日期允许缺省，由计费引擎报告具体是哪一行缺了日期。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idx: Option<i64>,
    pub item_code: String,
    #[serde(default)]
    pub qty: NumericField,
    #[serde(default)]
    pub rate: NumericField,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub stop_date: Option<String>,
}

impl RawItem {
    pub fn new(
        item_code: impl Into<String>,
        qty: impl Into<NumericField>,
        rate: impl Into<NumericField>,
        start_date: &str,
        stop_date: &str,
    ) -> Self {
        Self {
            idx: None,
            item_code: item_code.into(),
            qty: qty.into(),
            rate: rate.into(),
            start_date: Some(start_date.to_string()),
            stop_date: Some(stop_date.to_string()),
        }
    }

    pub fn with_idx(mut self, idx: i64) -> Self {
        self.idx = Some(idx);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field(v: Value) -> NumericField {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn qty_accepts_numbers_and_integer_strings() {
        assert_eq!(field(json!(15)).coerce_to_int(), 15);
        assert_eq!(field(json!("10")).coerce_to_int(), 10);
        assert_eq!(field(json!(" 8 ")).coerce_to_int(), 8);
        assert_eq!(field(json!(-3)).coerce_to_int(), -3);
        assert_eq!(field(json!(10.7)).coerce_to_int(), 10);
        assert_eq!(field(json!(true)).coerce_to_int(), 1);
    }

    #[test]
    fn qty_beyond_i64_is_kept_exact() {
        assert_eq!(field(json!(18446744073709551615u64)).coerce_to_int(), 18446744073709551615);
        assert_eq!(
            field(json!("170141183460469231731687303715884105727")).coerce_to_int(),
            i128::MAX
        );
        assert_eq!(field(json!(1e300)).coerce_to_int(), 0);
    }

    #[test]
    fn malformed_qty_degrades_to_zero() {
        assert_eq!(field(json!("10.5")).coerce_to_int(), 0);
        assert_eq!(field(json!("ten")).coerce_to_int(), 0);
        assert_eq!(field(json!("")).coerce_to_int(), 0);
        assert_eq!(field(json!(null)).coerce_to_int(), 0);
        assert_eq!(field(json!([1, 2])).coerce_to_int(), 0);
        assert_eq!(NumericField::Missing.coerce_to_int(), 0);
    }

    #[test]
    fn rate_accepts_numbers_and_numeric_strings() {
        assert_eq!(field(json!("1080")).coerce_to_decimal(), BigDecimal::from(1080));
        assert_eq!(field(json!(5000)).coerce_to_decimal(), BigDecimal::from(5000));
        assert_eq!(
            field(json!(12.5)).coerce_to_decimal(),
            BigDecimal::from_str("12.5").unwrap()
        );
        assert_eq!(
            field(json!(" 99.90 ")).coerce_to_decimal(),
            BigDecimal::from_str("99.9").unwrap()
        );
    }

    #[test]
    fn malformed_rate_degrades_to_zero() {
        assert_eq!(field(json!("1,000")).coerce_to_decimal(), BigDecimal::zero());
        assert_eq!(field(json!("abc")).coerce_to_decimal(), BigDecimal::zero());
        assert_eq!(field(json!(null)).coerce_to_decimal(), BigDecimal::zero());
        assert_eq!(field(json!({"v": 1})).coerce_to_decimal(), BigDecimal::zero());
    }

    #[test]
    fn non_finite_rate_text_degrades_to_zero() {
        for text in ["inf", "-inf", "Infinity", "nan", "NaN"] {
            assert_eq!(field(json!(text)).coerce_to_decimal(), BigDecimal::zero(), "{text}");
        }
    }

    #[test]
    fn rate_with_out_of_range_exponent_degrades_to_zero() {
        assert_eq!(field(json!("1e400")).coerce_to_decimal(), BigDecimal::zero());
        assert_eq!(field(json!("1e1000000000")).coerce_to_decimal(), BigDecimal::zero());
        assert_eq!(field(json!("1e-1000000000")).coerce_to_decimal(), BigDecimal::zero());
        assert_eq!(field(json!("1".repeat(400))).coerce_to_decimal(), BigDecimal::zero());

        assert_eq!(field(json!("1e3")).coerce_to_decimal(), BigDecimal::from(1000));
        assert_eq!(
            field(json!("1e300")).coerce_to_decimal(),
            BigDecimal::from_str("1e300").unwrap()
        );
    }

    #[test]
    fn raw_item_ignores_extra_fields_and_tolerates_missing_numbers() {
        let item: RawItem = serde_json::from_value(json!({
            "idx": 1,
            "item_code": "Executive Desk (4*2)",
            "sales_description": "Dedicated Executive Desk",
            "amount": "10000",
            "start_date": "2023-11-01",
            "stop_date": "2024-10-17"
        }))
        .unwrap();

        assert_eq!(item.idx, Some(1));
        assert_eq!(item.qty, NumericField::Missing);
        assert_eq!(item.rate.coerce_to_decimal(), BigDecimal::zero());
        assert_eq!(item.stop_date.as_deref(), Some("2024-10-17"));
    }

    #[test]
    fn raw_item_allows_missing_dates() {
        let item: RawItem = serde_json::from_value(json!({
            "item_code": "Parking (2S)",
            "qty": 1,
            "rate": 1000
        }))
        .unwrap();

        assert!(item.start_date.is_none());
        assert!(item.stop_date.is_none());
    }
}
