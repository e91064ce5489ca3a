use std::fmt;

use serde::Serialize;

use crate::domain::validation::ValidationError;

/// Characters ignored when checking a phone number.
const PHONE_SEPARATORS: [char; 5] = ['+', '-', ' ', '(', ')'];

/// Shortest accepted phone number, in digits.
pub const PHONE_MIN_DIGITS: usize = 7;
/// Longest accepted phone number, in digits (E.164 maximum).
pub const PHONE_MAX_DIGITS: usize = 15;

/// Coarse syntactic phone number check.
///
/// Strips `+`, `-`, spaces and parentheses; what remains must be 7 to 15 ASCII
/// digits. No country-code or numbering-plan validation is performed.
pub fn is_valid_phone_number(raw: &str) -> bool {
    let digits: String = raw
        .chars()
        .filter(|c| !PHONE_SEPARATORS.contains(c))
        .collect();

    !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_digit())
        && (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits.len())
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// API key sent as `Authorization: App <key>`.
///
/// Invariant: non-empty after trimming. `Debug` never prints the key.
pub struct ApiKey(String);

impl ApiKey {
    /// Field name used in validation errors.
    pub const FIELD: &'static str = "api key";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender id (`from`), alphanumeric or numeric as registered with the provider.
///
/// Invariant: non-empty after trimming.
pub struct SenderId(String);

impl SenderId {
    /// JSON field name used by the provider (`from`).
    pub const FIELD: &'static str = "from";

    /// Create a validated [`SenderId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sender id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message text.
///
/// Invariant: non-empty after trimming. The original value is preserved; the
/// trimmed form is what gets sent.
pub struct MessageText(String);

impl MessageText {
    /// Field name used in validation errors.
    pub const FIELD: &'static str = "text";

    /// Length above which the provider may split the text into several segments.
    pub const SINGLE_SEGMENT_CHARS: usize = 160;

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Text with surrounding whitespace removed.
    pub fn trimmed(&self) -> &str {
        self.0.trim()
    }

    /// Number of characters in the text as provided.
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    /// Whether the text is longer than a single SMS segment.
    pub fn exceeds_single_segment(&self) -> bool {
        self.char_count() > Self::SINGLE_SEGMENT_CHARS
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Destination phone number (`to`).
///
/// Invariant: trimmed and accepted by [`is_valid_phone_number`]. The value is
/// sent as written; no E.164 normalization happens.
pub struct Recipient(String);

impl Recipient {
    /// JSON field name used by the provider (`to`).
    pub const FIELD: &'static str = "to";

    /// Create a validated recipient.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if !is_valid_phone_number(trimmed) {
            return Err(ValidationError::InvalidPhoneNumber { input: value });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as sent to the provider.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
/// Provider-assigned id shared by all messages of one send call.
///
/// Invariant: non-empty after trimming.
pub struct BulkId(String);

impl BulkId {
    /// Query parameter name used by the provider (`bulkId`).
    pub const FIELD: &'static str = "bulkId";

    /// Create a validated [`BulkId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated bulk id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
/// Provider-assigned id of a single message.
///
/// Invariant: non-empty after trimming.
pub struct MessageId(String);

impl MessageId {
    /// Query parameter name used by the provider (`messageId`).
    pub const FIELD: &'static str = "messageId";

    /// Create a validated [`MessageId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated message id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Maximum number of delivery reports to fetch (`limit`).
///
/// Invariant: at least 1.
pub struct ReportLimit(u32);

impl ReportLimit {
    /// Query parameter name used by the provider (`limit`).
    pub const FIELD: &'static str = "limit";

    /// Smallest accepted limit.
    pub const MIN: u32 = 1;
    /// Limit used when the caller does not pass one.
    pub const DEFAULT: u32 = 50;

    /// Create a validated limit.
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if value < Self::MIN {
            return Err(ValidationError::LimitOutOfRange {
                min: Self::MIN,
                actual: value,
            });
        }
        Ok(Self(value))
    }

    /// Get the underlying limit.
    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for ReportLimit {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
/// Provider's coarse classification of a message's delivery state.
pub enum StatusGroup {
    Pending,
    Undeliverable,
    Delivered,
    Expired,
    Rejected,
    /// Missing or unrecognised group name.
    #[default]
    Unknown,
}

impl StatusGroup {
    /// Map a provider `groupName` to a known group.
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "PENDING" => Self::Pending,
            "UNDELIVERABLE" => Self::Undeliverable,
            "DELIVERED" => Self::Delivered,
            "EXPIRED" => Self::Expired,
            "REJECTED" => Self::Rejected,
            _ => Self::Unknown,
        }
    }

    /// Provider spelling of the group.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Undeliverable => "UNDELIVERABLE",
            Self::Delivered => "DELIVERED",
            Self::Expired => "EXPIRED",
            Self::Rejected => "REJECTED",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// A freshly submitted message is accepted when the provider reports it as
    /// pending. Anything else counts as a failed submission.
    pub fn is_accepted(self) -> bool {
        self == Self::Pending
    }
}

impl fmt::Display for StatusGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
