/// Client-side validation failures. An operation that fails validation is
/// never sent to the backend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("invalid {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("file must be an image (got {0})")]
    NotAnImage(String),

    #[error("image must not exceed {limit} bytes (got {actual})")]
    FileTooLarge { actual: u64, limit: u64 },

    #[error("invalid time {0:?}, expected HH:MM")]
    InvalidTime(String),

    #[error("invalid color {0:?}, expected #RGB or #RRGGBB")]
    InvalidColor(String),

    #[error("rating must be between 1 and 5 (got {0})")]
    RatingOutOfRange(u8),

    #[error("weekday must be between 0 and 6 (got {0})")]
    WeekdayOutOfRange(u8),
}
