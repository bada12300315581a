//! Validated JSON extractor - Combines deserialization with validation.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use common::AppError;

/// Validated JSON extractor that automatically validates requests.
///
/// Both malformed bodies and rule violations are rejected with
/// `AppError::Validation` (422).
///
/// ```rust,ignore
/// async fn create_zone(ValidatedJson(payload): ValidatedJson<CreateZoneRequest>) {
///     // payload is already validated
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

        Ok(ValidatedJson(value))
    }
}

/// Flatten field errors, including those of nested structs and list items,
/// into `field: message` pairs sorted by path. Paths use the camelCase
/// names clients send.
fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut messages = Vec::new();
    collect_errors(errors, "", &mut messages);
    messages.sort();
    messages.join(", ")
}

fn collect_errors(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let field = camel_case(field);
        let path = if prefix.is_empty() {
            field
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(errs) => {
                out.extend(errs.iter().map(|e| match &e.message {
                    Some(message) => format!("{}: {}", path, message),
                    None => format!("{} is invalid", path),
                }));
            }
            ValidationErrorsKind::Struct(nested) => collect_errors(nested, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_errors(nested, &format!("{}[{}]", path, index), out);
                }
            }
        }
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Part {
        #[validate(range(min = 1, message = "must be at least 1"))]
        quantity: u32,
    }

    #[derive(Debug, Deserialize, Validate)]
    struct Order {
        #[validate(length(min = 5, message = "must be 5-50 characters"))]
        order_number: String,
        #[validate(nested)]
        items: Vec<Part>,
    }

    #[test]
    fn reports_nested_list_errors_with_their_path() {
        let order = Order {
            order_number: "PO1".to_string(),
            items: vec![Part { quantity: 2 }, Part { quantity: 0 }],
        };

        let message = format_validation_errors(&order.validate().unwrap_err());

        assert_eq!(
            message,
            "items[1].quantity: must be at least 1, orderNumber: must be 5-50 characters"
        );
    }
}
