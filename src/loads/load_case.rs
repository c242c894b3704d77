//! Load cases

use serde::{Deserialize, Serialize};

/// A named raw load case. The model keeps an ordered list of these; their position
/// in that list is the load-case index `n` referenced by the combination evaluator
/// and by the `case` field on `NodeLoad`/`MemberLoad`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadCase {
    pub name: String,
}

impl LoadCase {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string() }
    }
}

impl Default for LoadCase {
    fn default() -> Self {
        Self::new("Case 1")
    }
}
