use serde::Serialize;

use crate::error_handling::types::{RecordError, StorageError};
use crate::records::{Item, User};

/// The `{success, user?, item?, error?}` value handed to presentation code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Item>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A successful operation's value, placed in its field of the result.
pub trait ResultPayload {
    fn attach(self, result: &mut OperationResult);
}

impl ResultPayload for () {
    fn attach(self, _result: &mut OperationResult) {}
}

impl ResultPayload for User {
    fn attach(self, result: &mut OperationResult) {
        result.user = Some(self);
    }
}

impl ResultPayload for Item {
    fn attach(self, result: &mut OperationResult) {
        result.item = Some(self);
    }
}

impl OperationResult {
    fn empty(success: bool) -> Self {
        Self {
            success,
            user: None,
            item: None,
            error: None,
        }
    }

    pub fn ok<T: ResultPayload>(payload: T) -> Self {
        let mut result = Self::empty(true);
        payload.attach(&mut result);
        result
    }

    pub fn failed(error: &RecordError) -> Self {
        let mut result = Self::empty(false);
        result.error = Some(error.to_string());
        result
    }

    /// Folds business errors into `success: false`; storage failures are returned as errors.
    pub fn from_outcome<T: ResultPayload>(
        outcome: Result<T, RecordError>,
    ) -> Result<Self, StorageError> {
        match outcome {
            Ok(payload) => Ok(Self::ok(payload)),
            Err(RecordError::Storage(e)) => Err(e),
            Err(e) => Ok(Self::failed(&e)),
        }
    }
}
