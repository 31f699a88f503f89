//! Build request validation.

use thiserror::Error;

use crate::country::Country;
use crate::i18n::MessageKey;
use crate::report::DateRange;

/// Reasons a build request is refused before any work starts.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no country selected")]
    MissingCountry,
    #[error("start or end date missing")]
    MissingDateRange,
}

impl ValidationError {
    /// Both cases share one user-facing message.
    pub fn message_key(&self) -> MessageKey {
        MessageKey::ErrorCountryDates
    }
}

/// Checks that a request names a country and both dates, returning them.
///
/// The chronological order of the dates is not checked.
pub fn validate_build_request<'a>(
    country: Option<&'a Country>,
    date_range: Option<&'a DateRange>,
) -> Result<(&'a Country, &'a DateRange), ValidationError> {
    let Some(country) = country else {
        return Err(ValidationError::MissingCountry);
    };
    match date_range {
        Some(range) if range.is_complete() => Ok((country, range)),
        _ => Err(ValidationError::MissingDateRange),
    }
}
