pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod service;

pub use config::AppConfig;
pub use error::{BillingError, Result};
pub use models::{Bill, BillLineItem, RawItem};
pub use service::generate_monthly_bill;
