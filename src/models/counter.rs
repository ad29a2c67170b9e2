//! Counter Model

use serde::{Deserialize, Serialize};

/// Singleton sequence record, one per sequence name (`invoice`).
/// `value` is the next integer to hand out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Counter {
    pub id: String,
    pub value: u64,
}
