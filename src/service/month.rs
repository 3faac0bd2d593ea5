use chrono::{Months, NaiveDate};

use crate::error::{BillingError, Result};
use crate::models::MonthWindow;

/// 解析 `YYYY-MM`，返回该月 1 号到月末 (闰年二月为 29 日)
pub fn resolve_month(token: &str) -> Result<MonthWindow> {
    let invalid = |reason: &str| BillingError::InvalidMonth {
        token: token.to_string(),
        reason: reason.to_string(),
    };

    let parts: Vec<&str> = token.split('-').collect();
    let [year, month] = parts.as_slice() else {
        return Err(invalid("expected YYYY-MM"));
    };

    let year: i32 = year.trim().parse().map_err(|_| invalid("year is not an integer"))?;
    let month: u32 = month.trim().parse().map_err(|_| invalid("month is not an integer"))?;
    if !(1..=12).contains(&month) {
        return Err(invalid("month must be between 1 and 12"));
    }

    let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| invalid("year out of range"))?;
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(|| invalid("year out of range"))?;

    Ok(MonthWindow { start, end })
}
