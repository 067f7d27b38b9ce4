use crate::domain::{NewUser, RegistryError};
use serde::Serialize;
use serde_json::Value;

// Request payload for creating a user. Fields hold whatever JSON value the
// client sent; missing fields stay absent.
#[derive(Debug, Default)]
pub struct CreateUserRequest {
    pub name: Option<Value>,
    pub email: Option<Value>,
}

impl CreateUserRequest {
    // Interpret a raw create body.
    //
    // Bodies without a JSON content type are not read, so they create a user
    // with no fields. A JSON body must be an object or an array; arrays carry
    // no named fields. Anything else is rejected.
    pub fn from_request(content_type: Option<&str>, body: &[u8]) -> Result<Self, RegistryError> {
        if !content_type.is_some_and(is_json_content_type) {
            return Ok(Self::default());
        }
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let value: Value = serde_json::from_slice(body)
            .map_err(|err| RegistryError::MalformedBody(err.to_string()))?;

        match value {
            Value::Object(mut fields) => Ok(Self {
                name: fields.remove("name"),
                email: fields.remove("email"),
            }),
            Value::Array(_) => Ok(Self::default()),
            other => Err(RegistryError::MalformedBody(format!(
                "expected an object or array, got {other}"
            ))),
        }
    }
}

impl From<CreateUserRequest> for NewUser {
    fn from(request: CreateUserRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
        }
    }
}

// `application/json` and any `+json` media type, parameters ignored.
fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

// Response payload for delete, sent whether or not a user matched.
#[derive(Debug, Serialize)]
pub struct DeleteUserResponse {
    pub message: String,
}

impl DeleteUserResponse {
    pub fn deleted() -> Self {
        Self {
            message: "User deleted".to_string(),
        }
    }
}

// Simple error envelope for JSON responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}
