/// Input rejected before any network call is made
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Word is required")]
    EmptyQuery,
}

impl ValidationError {
    pub fn status_code(&self) -> u16 {
        match self {
            ValidationError::EmptyQuery => 400,
        }
    }
}
