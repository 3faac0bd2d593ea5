use std::fmt;
use thiserror::Error;

/// 出错明细的定位信息 (输入位置 + idx + 商品编码)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRef {
    pub position: usize,
    pub idx: Option<i64>,
    pub item_code: String,
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.idx {
            Some(idx) => write!(f, "item #{} (idx {}, {:?})", self.position, idx, self.item_code),
            None => write!(f, "item #{} ({:?})", self.position, self.item_code),
        }
    }
}

/// 账单计算错误
#[derive(Debug, Error)]
pub enum BillingError {
    #[error("invalid month {token:?}: {reason}")]
    InvalidMonth { token: String, reason: String },

    #[error("{item}: missing {field}")]
    MissingDate { item: ItemRef, field: &'static str },

    #[error("{item}: invalid {field} {value:?}: {source}")]
    InvalidDate {
        item: ItemRef,
        field: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("{item}: accumulated qty overflows")]
    QuantityOverflow { item: ItemRef },

    #[error("{0} exceeds the representable amount range")]
    AmountOutOfRange(String),

    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BillingError>;
