use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDate;
use indexmap::IndexMap;
use std::str::FromStr;

use crate::error::{BillingError, ItemRef, Result};
use crate::models::money::{is_representable, round_money};
use crate::models::{AggregationBucket, AggregationKey, Bill, BillLineItem, MonthWindow, RawItem};
use crate::service::{active_period, resolve_month};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// 生成目标月份的按天折算账单
///
/// 任一明细日期缺失或格式错误则整体失败，不返回部分账单。
pub fn generate_monthly_bill(items: &[RawItem], target_month: &str) -> Result<Bill> {
    let window = resolve_month(target_month)?;
    let mut accumulator = BillAccumulator::new(window);

    for (position, item) in items.iter().enumerate() {
        accumulator.add_item(position, item)?;
    }

    let bill = accumulator.finish()?;
    tracing::info!(
        "Monthly bill {}: {} items -> {} line items, total {}",
        target_month,
        items.len(),
        bill.line_items.len(),
        bill.total_revenue
    );
    Ok(bill)
}

/// 单次计费的累加上下文
///
/// 分组按首次出现顺序保存，保证同一输入每次输出顺序一致。
#[derive(Debug)]
pub struct BillAccumulator {
    window: MonthWindow,
    days_in_month: BigDecimal,
    buckets: IndexMap<AggregationKey, AggregationBucket>,
}

impl BillAccumulator {
    pub fn new(window: MonthWindow) -> Self {
        Self {
            window,
            days_in_month: BigDecimal::from(window.days()),
            buckets: IndexMap::new(),
        }
    }

    /// 折算一条明细并并入分组；与目标月无交集的明细直接跳过
    pub fn add_item(&mut self, position: usize, item: &RawItem) -> Result<()> {
        let start = parse_item_date(position, item, "start_date", item.start_date.as_deref())?;
        let stop = parse_item_date(position, item, "stop_date", item.stop_date.as_deref())?;

        let Some(period) = active_period(start, stop, &self.window) else {
            tracing::debug!(
                "跳过明细 #{} {:?}: {} ~ {} 不在 {} ~ {} 内",
                position,
                item.item_code,
                start,
                stop,
                self.window.start,
                self.window.end
            );
            return Ok(());
        };

        let qty = item.qty.coerce_to_int();
        let rate = item.rate.coerce_to_decimal();

        // 先乘后除
        let prorated = &rate * qty_decimal(qty) * BigDecimal::from(period.days) / &self.days_in_month;
        let rounded = round_money(&prorated);
        if !is_representable(&rounded) {
            return Err(BillingError::AmountOutOfRange(item_ref(position, item).to_string()));
        }

        let key = AggregationKey::new(&item.item_code, &rate, &period);
        self.buckets
            .entry(key)
            .or_default()
            .add(qty, &rounded)
            .ok_or_else(|| BillingError::QuantityOverflow {
                item: item_ref(position, item),
            })
    }

    /// 当前分组数
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// 汇总为账单：分组金额再取整一次，累加后总额再取整
    pub fn finish(self) -> Result<Bill> {
        let mut total_revenue = BigDecimal::zero();
        let mut line_items = Vec::with_capacity(self.buckets.len());

        for (key, bucket) in self.buckets {
            let amount = round_money(&bucket.amount);
            if !is_representable(&amount) {
                return Err(BillingError::AmountOutOfRange(format!(
                    "{:?} ({})",
                    key.item_code, key.billing_period
                )));
            }
            total_revenue += amount.clone();
            line_items.push(BillLineItem {
                item_code: key.item_code,
                rate: key.rate,
                qty: bucket.qty,
                amount,
                billing_period: key.billing_period,
            });
        }

        let total_revenue = round_money(&total_revenue);
        if !is_representable(&total_revenue) {
            return Err(BillingError::AmountOutOfRange("total_revenue".to_string()));
        }

        Ok(Bill {
            line_items,
            total_revenue,
        })
    }
}

/// i128 的十进制文本总能被解析
fn qty_decimal(qty: i128) -> BigDecimal {
    BigDecimal::from_str(&qty.to_string()).unwrap_or_else(|_| BigDecimal::zero())
}

fn item_ref(position: usize, item: &RawItem) -> ItemRef {
    ItemRef {
        position,
        idx: item.idx,
        item_code: item.item_code.clone(),
    }
}

fn parse_item_date(position: usize, item: &RawItem, field: &'static str, value: Option<&str>) -> Result<NaiveDate> {
    let Some(value) = value else {
        return Err(BillingError::MissingDate {
            item: item_ref(position, item),
            field,
        });
    };

    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|source| BillingError::InvalidDate {
        item: item_ref(position, item),
        field,
        value: value.to_string(),
        source,
    })
}
