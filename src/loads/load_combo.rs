//! Load combinations

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named linear combination of raw load cases.
///
/// Internally factors are kept by case name rather than as a bare positional
/// vector — it reads better at the call site (`with_case("Dead", 1.2)`) and the
/// combination evaluator resolves it against the model's load-case order only
/// once, at solve time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadCombination {
    pub name: String,
    pub factors: HashMap<String, f64>,
}

impl LoadCombination {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            factors: HashMap::new(),
        }
    }

    pub fn with_case(mut self, case: &str, factor: f64) -> Self {
        self.factors.insert(case.to_string(), factor);
        self
    }

    /// Coefficient for a raw load case by name; 0 if the combination doesn't reference it
    pub fn factor(&self, case: &str) -> f64 {
        *self.factors.get(case).unwrap_or(&0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreferenced_case_has_zero_factor() {
        let combo = LoadCombination::new("C1").with_case("Dead", 1.2);
        assert_eq!(combo.factor("Dead"), 1.2);
        assert_eq!(combo.factor("Live"), 0.0);
    }
}
