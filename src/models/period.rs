use chrono::NaiveDate;

/// 目标月份窗口 (1 号到月末，闭区间)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl MonthWindow {
    /// 当月天数 (含首尾)
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// 明细在目标月内的有效计费区间
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePeriod {
    pub days: i64,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ActivePeriod {
    /// 形如 `2024-11-15 to 2024-11-30`
    pub fn billing_period(&self) -> String {
        format!("{} to {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_days_are_inclusive() {
        let november = MonthWindow {
            start: date(2024, 11, 1),
            end: date(2024, 11, 30),
        };
        assert_eq!(november.days(), 30);
    }

    #[test]
    fn billing_period_uses_iso_dates() {
        let period = ActivePeriod {
            days: 16,
            start: date(2024, 11, 15),
            end: date(2024, 11, 30),
        };
        assert_eq!(period.billing_period(), "2024-11-15 to 2024-11-30");
    }
}
