#[derive(Debug, thiserror::Error)]
pub enum ClinicError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("seed data error: {0}")]
    Data(#[from] clinic_data::DataError),

    #[error("invalid date-time '{0}': expected YYYY-MM-DD or YYYY-MM-DDTHH:MM[:SS]")]
    InvalidDateTime(String),
}

pub type ClinicResult<T> = std::result::Result<T, ClinicError>;
