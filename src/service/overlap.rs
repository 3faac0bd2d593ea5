use chrono::NaiveDate;

use crate::models::{ActivePeriod, MonthWindow};

/// 计算明细区间与目标月的交集，首尾两天都计入
///
/// 无交集返回 `None`，调用方应跳过该明细。
pub fn active_period(item_start: NaiveDate, item_end: NaiveDate, window: &MonthWindow) -> Option<ActivePeriod> {
    let start = item_start.max(window.start);
    let end = item_end.min(window.end);
    if start > end {
        return None;
    }

    Some(ActivePeriod {
        days: (end - start).num_days() + 1,
        start,
        end,
    })
}
