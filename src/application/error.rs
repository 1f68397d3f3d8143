#[derive(Debug)]
pub enum ApplicationError {
    BadRequest(String),
    UnsupportedFormat(String),
    PayloadTooLarge,
    /// Request input failed parsing or schema validation.
    Validation(String),
    TransferInterrupted(String),
    InternalError(String),
}

impl From<validator::ValidationErrors> for ApplicationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApplicationError::Validation(errors.to_string())
    }
}
