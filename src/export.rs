use std::io::Write;

use crate::error::Result;
use crate::models::money::MONEY_SCALE;
use crate::models::Bill;

/// 导出账单为 CSV：表头 + 每个明细一行 + 末尾 TOTAL 行
pub fn write_bill_csv<W: Write>(bill: &Bill, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["item_code", "rate", "qty", "amount", "billing_period"])?;

    for line in &bill.line_items {
        writer.write_record(&[
            line.item_code.clone(),
            line.rate.to_string(),
            line.qty.to_string(),
            line.amount.with_scale(MONEY_SCALE).to_string(),
            line.billing_period.clone(),
        ])?;
    }

    writer.write_record(&[
        "TOTAL".to_string(),
        String::new(),
        String::new(),
        bill.total_revenue.with_scale(MONEY_SCALE).to_string(),
        String::new(),
    ])?;

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawItem;
    use crate::service::generate_monthly_bill;

    #[test]
    fn writes_header_rows_and_total() {
        let items = vec![
            RawItem::new("Executive Desk (4*2)", "10", "1080", "2024-10-18", "2025-10-31"),
            RawItem::new("Conference Table", 1, "20000", "2024-11-05", "2024-11-20"),
        ];
        let bill = generate_monthly_bill(&items, "2024-11").unwrap();

        let mut out = Vec::new();
        write_bill_csv(&bill, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "item_code,rate,qty,amount,billing_period",
                "Executive Desk (4*2),1080,10,10800.00,2024-11-01 to 2024-11-30",
                "Conference Table,20000,1,10666.67,2024-11-05 to 2024-11-20",
                "TOTAL,,,21466.67,",
            ]
        );
    }

    #[test]
    fn empty_bill_still_has_total_row() {
        let bill = generate_monthly_bill(&[], "2024-11").unwrap();
        let mut out = Vec::new();
        write_bill_csv(&bill, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "item_code,rate,qty,amount,billing_period\nTOTAL,,,0.00,\n"
        );
    }
}
