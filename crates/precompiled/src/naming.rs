use std::collections::BTreeSet;

use types::StatusCode;

use crate::error::{NameViolation, PrecompiledError};
use crate::global::Config;

const TABLE_NAME_EXTRA_CHARS: [char; 5] = ['$', '_', '@', '/', '-'];
const FIELD_NAME_EXTRA_CHARS: [char; 3] = ['$', '_', '@'];

/// Canonical name of a user-created table.
pub fn user_table_name(name: &str) -> String {
    format!("{}{}", Config::USER_TABLE_PREFIX, name)
}

/// Canonical name of the table backing a deployed contract.
pub fn contract_table_name(contract_address: &str) -> String {
    format!("{}{}", Config::CONTRACT_TABLE_PREFIX, contract_address)
}

fn invalid(name: &str, reason: NameViolation) -> PrecompiledError {
    PrecompiledError::InvalidName {
        name: name.to_string(),
        reason,
    }
}

pub fn check_table_name(name: &str) -> Result<(), PrecompiledError> {
    if name.is_empty() {
        return Err(invalid(name, NameViolation::Empty));
    }
    if name.len() > Config::USER_TABLE_NAME_MAX_LENGTH {
        return Err(invalid(name, NameViolation::TableNameTooLong));
    }
    if let Some(c) = name
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && !TABLE_NAME_EXTRA_CHARS.contains(c))
    {
        return Err(invalid(name, NameViolation::IllegalCharacter(c)));
    }
    Ok(())
}

pub fn check_field_name(name: &str) -> Result<(), PrecompiledError> {
    if name.is_empty() {
        return Err(invalid(name, NameViolation::Empty));
    }
    if name.len() > Config::USER_TABLE_FIELD_NAME_MAX_LENGTH {
        return Err(invalid(name, NameViolation::FieldNameTooLong));
    }
    if name.starts_with('_') {
        return Err(invalid(name, NameViolation::LeadingUnderscore));
    }
    if let Some(c) = name
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && !FIELD_NAME_EXTRA_CHARS.contains(c))
    {
        return Err(invalid(name, NameViolation::IllegalCharacter(c)));
    }
    Ok(())
}

/// Validates a table schema before it is handed to the store.
///
/// Field names are compared after trimming surrounding whitespace, and must
/// be unique across the key and value lists together.
pub fn check_name_validate(
    table_name: &str,
    key_fields: &[&str],
    value_fields: &[&str],
) -> Result<(), PrecompiledError> {
    check_table_name(table_name)?;

    let mut seen = BTreeSet::new();
    for field in key_fields.iter().chain(value_fields) {
        let field = field.trim();
        check_field_name(field)?;
        if !seen.insert(field) {
            return Err(PrecompiledError::DuplicateField(field.to_string()));
        }
    }
    Ok(())
}

/// Length check that reports through a status code instead of an error,
/// for handlers that embed the outcome in their return data.
pub fn check_length_validate(value: &str, max_length: usize, error: StatusCode) -> StatusCode {
    if value.len() > max_length {
        error
    } else {
        StatusCode::Success
    }
}
