//! Run state threaded between dependent scenarios

use crate::error::{SuiteError, SuiteResult};

/// Values captured by producer scenarios within one suite run
///
/// Each field is written once; a second write is rejected so a stale value
/// can never be overwritten silently.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunState {
    created_user_id: Option<i64>,
    access_token: Option<String>,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_id(&self) -> SuiteResult<i64> {
        self.created_user_id.ok_or_else(|| {
            SuiteError::StatePrecondition(
                "no user id was captured; registration did not succeed".to_string(),
            )
        })
    }

    pub fn access_token(&self) -> SuiteResult<&str> {
        self.access_token.as_deref().ok_or_else(|| {
            SuiteError::StatePrecondition(
                "no access token was captured; login did not succeed".to_string(),
            )
        })
    }

    pub fn created_user_id(&self) -> Option<i64> {
        self.created_user_id
    }

    pub fn record_user_id(&mut self, id: i64) -> SuiteResult<()> {
        if let Some(existing) = self.created_user_id {
            return Err(SuiteError::StatePrecondition(format!(
                "user id already captured ({existing})"
            )));
        }
        self.created_user_id = Some(id);
        Ok(())
    }

    pub fn record_access_token(&mut self, token: impl Into<String>) -> SuiteResult<()> {
        if self.access_token.is_some() {
            return Err(SuiteError::StatePrecondition(
                "access token already captured".to_string(),
            ));
        }
        self.access_token = Some(token.into());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_state_is_precondition_error() {
        let state = RunState::new();
        assert!(matches!(
            state.user_id(),
            Err(SuiteError::StatePrecondition(_))
        ));
        assert!(matches!(
            state.access_token(),
            Err(SuiteError::StatePrecondition(_))
        ));
    }

    #[test]
    fn test_fields_are_written_once() {
        let mut state = RunState::new();
        state.record_user_id(5).unwrap();
        state.record_access_token("abc").unwrap();

        assert!(state.record_user_id(6).is_err());
        assert!(state.record_access_token("def").is_err());
        assert_eq!(state.user_id().unwrap(), 5);
        assert_eq!(state.access_token().unwrap(), "abc");
    }
}
