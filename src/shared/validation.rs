use validator::{Validate, ValidationErrors};

use crate::core::error::AppError;

/// Flatten field errors into a single human-readable message.
///
/// Messages are ordered by field name so the output is stable.
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let messages: Vec<String> = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} tidak valid", field))
            })
        })
        .collect();

    messages.join("; ")
}

/// Run derive-based validation, mapping failures to `AppError::Validation`
pub fn validate_dto<T: Validate>(dto: &T) -> Result<(), AppError> {
    dto.validate()
        .map_err(|e| AppError::Validation(validation_message(&e)))
}
