use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    TooManyRecipients { max: usize, actual: usize },
    InvalidPhoneNumber { input: String },
    LimitOutOfRange { min: u32, actual: u32 },
    InvalidUrl { input: String },
    UnsupportedFileType { filename: String },
    NoPhoneNumbers,
    NoPhoneNumbersInFile,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} cannot be empty"),
            Self::TooManyRecipients { max, actual } => {
                write!(f, "too many recipients: {actual} (max {max})")
            }
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::LimitOutOfRange { min, actual } => {
                write!(f, "limit out of range: {actual} (expected at least {min})")
            }
            Self::InvalidUrl { input } => write!(f, "invalid base url: {input}"),
            Self::UnsupportedFileType { filename } => write!(
                f,
                "unsupported file type: {filename} (only .txt and .csv files are allowed)"
            ),
            Self::NoPhoneNumbers => write!(f, "no phone numbers provided"),
            Self::NoPhoneNumbersInFile => write!(f, "no phone numbers found in file"),
        }
    }
}

impl std::error::Error for ValidationError {}
