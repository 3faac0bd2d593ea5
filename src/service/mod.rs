pub mod month;
pub mod overlap;
pub mod proration;

pub use month::resolve_month;
pub use overlap::active_period;
pub use proration::{generate_monthly_bill, BillAccumulator};
