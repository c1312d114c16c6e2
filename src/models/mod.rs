pub mod client;
pub mod customer;
pub mod point_of_sale;
pub mod result;
pub mod trace;

pub use client::{ClientId, ClientRecord};
pub use customer::{Customer, CustomerRecord, Document, DocumentData};
pub use point_of_sale::{LedgerEntry, PointOfSale, DEFAULT_POINT_OF_SALE_CODE};
pub use result::{
    FatalLookupFailure, LookupResult, RecoveredClient, RetryInput, RetryOutcome,
    RETRY_FAILED_ERROR_TYPE, RETRY_FAILED_MESSAGE,
};
pub use trace::{LookupStep, StepOutcome, Trace, TraceEntry};

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// null 按默认值处理
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 接受字符串或数字，统一为字符串
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
