//! Request validation: raw JSON body in, typed post input or a validation error out.

use crate::error::AppError;
use crate::model::{NewPost, PostPatch};
use serde_json::{Map, Value};

/// Constraints on one string field of a request body.
#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    pub required: bool,
    /// Minimum length in characters.
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

pub const POST_RULES: &[(&str, FieldRule)] = &[
    (
        "title",
        FieldRule {
            required: true,
            min_length: Some(1),
            max_length: None,
        },
    ),
    (
        "content",
        FieldRule {
            required: true,
            min_length: Some(1),
            max_length: None,
        },
    ),
];

pub struct RequestValidator;

impl RequestValidator {
    /// Validate body against per-field rules. All required fields must be present.
    pub fn validate(body: &Map<String, Value>, rules: &[(&str, FieldRule)]) -> Result<(), AppError> {
        for (field, rule) in rules {
            match body.get(*field) {
                None | Some(Value::Null) if rule.required => {
                    return Err(AppError::Validation(format!("{} is required", field)));
                }
                None | Some(Value::Null) => {}
                Some(v) => validate_field(field, v, rule)?,
            }
        }
        Ok(())
    }

    /// Validate only the fields present in body (for PATCH). Required is not enforced for
    /// missing fields, but a present field may not be null.
    pub fn validate_partial(body: &Map<String, Value>, rules: &[(&str, FieldRule)]) -> Result<(), AppError> {
        for (field, rule) in rules {
            if let Some(v) = body.get(*field) {
                validate_field(field, v, rule)?;
            }
        }
        Ok(())
    }
}

fn validate_field(field: &str, v: &Value, rule: &FieldRule) -> Result<(), AppError> {
    let s = v
        .as_str()
        .ok_or_else(|| AppError::Validation(format!("{} must be a string", field)))?;
    if let Some(min) = rule.min_length {
        if s.chars().count() < min {
            return Err(AppError::Validation(if min == 1 {
                format!("{} should not be empty", field)
            } else {
                format!("{} must be at least {} characters", field, min)
            }));
        }
    }
    if let Some(max) = rule.max_length {
        if s.chars().count() > max {
            return Err(AppError::Validation(format!(
                "{} must be at most {} characters",
                field, max
            )));
        }
    }
    Ok(())
}

fn body_to_map(value: Value) -> Result<Map<String, Value>, AppError> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

fn take_string(body: &mut Map<String, Value>, field: &str) -> Option<String> {
    match body.remove(field) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

/// Body of POST /posts. Unknown fields are ignored.
pub fn parse_new_post(body: Value) -> Result<NewPost, AppError> {
    let mut body = body_to_map(body)?;
    RequestValidator::validate(&body, POST_RULES)?;
    match (take_string(&mut body, "title"), take_string(&mut body, "content")) {
        (Some(title), Some(content)) => Ok(NewPost { title, content }),
        _ => Err(AppError::Validation("title and content are required".into())),
    }
}

/// Body of PATCH /posts/:id. Absent fields stay unchanged.
pub fn parse_post_patch(body: Value) -> Result<PostPatch, AppError> {
    let mut body = body_to_map(body)?;
    RequestValidator::validate_partial(&body, POST_RULES)?;
    Ok(PostPatch {
        title: take_string(&mut body, "title"),
        content: take_string(&mut body, "content"),
    })
}
