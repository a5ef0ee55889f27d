//! Typed user and task records validated from raw API JSON.
//!
//! The API hands back loosely shaped objects. Each record is validated on its
//! own so that one malformed entry never takes down the rest of the run.

use serde_json::{Map, Value};

use crate::error::RecordError;

/// A user as returned by the users endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Numeric user id, matched against [`Task::user_id`].
    pub id: i64,
    /// Login name; also the report file stem.
    pub username: String,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Value of `company.name`.
    pub company: String,
}

impl User {
    /// Validates a raw user record.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordError`] naming the first field that is missing or
    /// mistyped, or [`RecordError::UnsafeUsername`] when the username cannot be
    /// used as a file name.
    pub fn from_value(value: &Value) -> Result<Self, RecordError> {
        let obj = value.as_object().ok_or(RecordError::NotAnObject)?;

        let username = string_field(obj, "username", "username")?;
        let id = int_field(obj, "id", "id")?;
        let name = string_field(obj, "name", "name")?;
        let email = string_field(obj, "email", "email")?;
        let company = match obj.get("company") {
            None | Some(Value::Null) => {
                return Err(RecordError::MissingField { field: "company" })
            }
            Some(Value::Object(company)) => string_field(company, "name", "company.name")?,
            Some(_) => {
                return Err(RecordError::InvalidField { field: "company", expected: "an object" })
            }
        };

        validate_username(&username)?;

        Ok(Self { id, username, name, email, company })
    }
}

/// A task as returned by the todos endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Id of the owning user.
    pub user_id: i64,
    /// Task title, untruncated.
    pub title: String,
    /// Whether the task is done.
    pub completed: bool,
}

impl Task {
    /// Validates a raw task record.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordError`] naming the first field that is missing or
    /// mistyped.
    pub fn from_value(value: &Value) -> Result<Self, RecordError> {
        let obj = value.as_object().ok_or(RecordError::NotAnObject)?;

        let user_id = int_field(obj, "userId", "userId")?;
        let title = string_field(obj, "title", "title")?;
        let completed = match obj.get("completed") {
            None | Some(Value::Null) => {
                return Err(RecordError::MissingField { field: "completed" })
            }
            Some(Value::Bool(b)) => *b,
            Some(_) => {
                return Err(RecordError::InvalidField { field: "completed", expected: "a boolean" })
            }
        };

        Ok(Self { user_id, title, completed })
    }
}

fn string_field(
    obj: &Map<String, Value>,
    key: &str,
    field: &'static str,
) -> Result<String, RecordError> {
    match obj.get(key) {
        None | Some(Value::Null) => Err(RecordError::MissingField { field }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(RecordError::InvalidField { field, expected: "a string" }),
    }
}

fn int_field(
    obj: &Map<String, Value>,
    key: &str,
    field: &'static str,
) -> Result<i64, RecordError> {
    match obj.get(key) {
        None | Some(Value::Null) => Err(RecordError::MissingField { field }),
        Some(v) => v.as_i64().ok_or(RecordError::InvalidField { field, expected: "an integer" }),
    }
}

fn validate_username(username: &str) -> Result<(), RecordError> {
    if username.trim().is_empty() || username.contains('/') || username.contains('\\') {
        return Err(RecordError::UnsafeUsername(username.to_string()));
    }
    Ok(())
}
