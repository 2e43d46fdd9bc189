use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("an extraction job is already running")]
    Busy,

    #[error("CSV input is missing a \"handle\" or \"link\" column")]
    CsvMissingColumn,

    #[error("synthesis failed for {username}: {reason}")]
    Synthesis { username: String, reason: String },
}
