use crate::errors::ValidationError;
use crate::models::{LimitRequest, Record, RecordRequest};
use serde_json::Value;

/// Turns a form submission into a new record with a fresh id.
pub fn record_from_request(request: RecordRequest) -> Result<Record, ValidationError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingName);
    }
    let calories =
        whole_number(request.calories, "calories")?.ok_or(ValidationError::MissingCalories)?;
    if calories < 0 {
        return Err(ValidationError::NegativeCalories);
    }
    let calories = u32::try_from(calories).map_err(|_| ValidationError::CaloriesTooLarge)?;

    Ok(Record::new(name, calories))
}

pub fn limit_from_request(request: LimitRequest) -> Result<i64, ValidationError> {
    match whole_number(request.limit, "limit")? {
        None => Err(ValidationError::MissingLimit),
        Some(limit) if limit <= 0 => Err(ValidationError::NonPositiveLimit),
        Some(limit) if limit > i64::from(u32::MAX) => Err(ValidationError::LimitTooLarge),
        Some(limit) => Ok(limit),
    }
}

/// Reads an integer from a JSON number or a numeric string. Null and blank
/// strings count as absent.
fn whole_number(value: Option<Value>, field: &'static str) -> Result<Option<i64>, ValidationError> {
    let invalid = ValidationError::NotANumber { field };
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => match number.as_i64() {
            Some(n) => Ok(Some(n)),
            None => Err(invalid),
        },
        Some(Value::String(text)) if text.trim().is_empty() => Ok(None),
        Some(Value::String(text)) => text.trim().parse().map(Some).map_err(|_| invalid),
        Some(_) => Err(invalid),
    }
}
