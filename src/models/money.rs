use bigdecimal::BigDecimal;
use serde::Serializer;

/// 金额保留两位小数
pub const MONEY_SCALE: i64 = 2;

/// 四舍五入到分，结果固定两位小数
pub fn round_money(value: &BigDecimal) -> BigDecimal {
    value.round(MONEY_SCALE).with_scale(MONEY_SCALE)
}

/// 十进制转 f64，经由十进制字符串以保证 `4693.33` 不会变成 `4693.330000000001`
pub fn to_f64(value: &BigDecimal) -> f64 {
    value.to_string().parse().unwrap_or(0.0)
}

/// 能否作为有限的 JSON 数字输出
pub fn is_representable(value: &BigDecimal) -> bool {
    to_f64(value).is_finite()
}

/// serde 输出为 JSON 数字而不是字符串
pub fn serialize_as_f64<S>(value: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(to_f64(value))
}
