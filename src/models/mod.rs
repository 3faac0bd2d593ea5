pub mod aggregation;
pub mod bill;
pub mod item;
pub mod money;
pub mod period;

pub use aggregation::{AggregationBucket, AggregationKey};
pub use bill::{Bill, BillLineItem};
pub use item::{NumericField, RawItem};
pub use period::{ActivePeriod, MonthWindow};
