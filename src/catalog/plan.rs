//! Call plans: the backend calls one operation performs.

use crate::client::{Backend, BackendCall};
use crate::error::{CrmApiError, CrmApiResult};
use serde_json::Value;

/// A primary call plus follow-up calls merged into its result.
///
/// Calls run sequentially in declaration order. The first failure aborts the
/// plan; nothing is merged from a partial run.
#[derive(Debug, Clone, PartialEq)]
pub struct CallPlan {
    primary: BackendCall,
    merges: Vec<(&'static str, BackendCall)>,
}

impl CallPlan {
    pub fn single(call: BackendCall) -> Self {
        Self {
            primary: call,
            merges: Vec::new(),
        }
    }

    /// Run `call` after the primary and store its result under `key`.
    pub fn merge_under(mut self, key: &'static str, call: BackendCall) -> Self {
        self.merges.push((key, call));
        self
    }

    pub fn primary(&self) -> &BackendCall {
        &self.primary
    }

    /// All calls in execution order.
    pub fn calls(&self) -> impl Iterator<Item = &BackendCall> {
        std::iter::once(&self.primary).chain(self.merges.iter().map(|(_, call)| call))
    }

    /// Execute the plan against a backend.
    pub fn execute(&self, backend: &dyn Backend) -> CrmApiResult<Value> {
        let mut result = backend.execute(&self.primary)?;
        if self.merges.is_empty() {
            return Ok(result);
        }

        let object = result.as_object_mut().ok_or_else(|| {
            CrmApiError::UnexpectedResponse(format!(
                "{} returned a non-object body; cannot attach related data",
                self.primary
            ))
        })?;
        for (key, call) in &self.merges {
            let related = backend.execute(call)?;
            object.insert((*key).to_string(), related);
        }

        Ok(result)
    }
}
