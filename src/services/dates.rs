use chrono::NaiveDate;

/// Typed failures of the French date parser.
///
/// Callers treat every variant as non-fatal and fall back to the current
/// time.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum DateParseError {
    #[error("not enough tokens in '{0}'")]
    NotEnoughTokens(String),
    #[error("unknown French month '{0}'")]
    UnknownMonth(String),
    #[error("invalid calendar date '{0}'")]
    InvalidDate(String),
}

const MONTHS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Parse a blog date of the form "19 mai 2025".
pub fn parse_french_date(text: &str) -> Result<NaiveDate, DateParseError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() < 3 {
        return Err(DateParseError::NotEnoughTokens(text.to_string()));
    }

    let month_name = tokens[1].to_lowercase();
    let month = MONTHS
        .iter()
        .position(|name| *name == month_name)
        .map(|index| index as u32 + 1)
        .ok_or_else(|| DateParseError::UnknownMonth(tokens[1].to_string()))?;

    let day: u32 = tokens[0]
        .parse()
        .map_err(|_| DateParseError::InvalidDate(text.to_string()))?;
    let year: i32 = tokens[2]
        .parse()
        .map_err(|_| DateParseError::InvalidDate(text.to_string()))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| DateParseError::InvalidDate(text.to_string()))
}
