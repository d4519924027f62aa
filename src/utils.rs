use crate::error::{AppError, Result};
use crate::model::{SortKey, SortOrder};
use crate::constants::MESSAGE_INVALID_DATA;

/// Path ids must be positive integers; anything else is rejected with `message`.
pub fn parse_id(raw: &str, message: &'static str) -> Result<i64> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::InvalidInput(message)),
    }
}

pub fn require_text<'a>(value: &'a str, message: &'static str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::InvalidInput(message));
    }
    Ok(value)
}

pub fn parse_sort_key(raw: Option<&str>) -> Result<SortKey> {
    match raw {
        Some("date") => Ok(SortKey::Date),
        Some("alphabet") => Ok(SortKey::Alphabet),
        _ => Err(AppError::InvalidInput(MESSAGE_INVALID_DATA)),
    }
}

pub fn parse_sort_order(raw: Option<&str>, default: SortOrder) -> Result<SortOrder> {
    match raw.map(|s| s.to_ascii_lowercase()).as_deref() {
        None => Ok(default),
        Some("asc") => Ok(SortOrder::Asc),
        Some("desc") => Ok(SortOrder::Desc),
        Some(_) => Err(AppError::InvalidInput(MESSAGE_INVALID_DATA)),
    }
}
