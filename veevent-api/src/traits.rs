use crate::{ApiError, ApiErrorKind};

pub trait Validator {
    fn validate(&self) -> Result<(), ApiError> {
        Ok(())
    }

    fn has_work(&self) -> bool {
        true
    }

    fn assert_ok(&self) -> Result<(), ApiError> {
        self.validate()?;

        if !self.has_work() {
            Err(ApiError::from(ApiErrorKind::NoWork))
        } else {
            Ok(())
        }
    }
}

/// collects the names of invalid fields and fails if any were found
#[derive(Debug, Default)]
pub struct InvalidKeys(Vec<String>);

impl InvalidKeys {
    pub fn new() -> Self {
        InvalidKeys(Vec::new())
    }

    pub fn check(&mut self, valid: bool, key: &str) -> &mut Self {
        if !valid {
            self.0.push(key.to_owned());
        }

        self
    }

    pub fn finish(self) -> Result<(), ApiError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ApiError::from((ApiErrorKind::ValidationFailed, crate::Detail::Keys(self.0))))
        }
    }
}
