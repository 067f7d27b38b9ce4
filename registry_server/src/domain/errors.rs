// Domain-level errors for registry workflows.
#[derive(Debug)]
pub enum RegistryError {
    // The create payload was not a JSON object with string-or-null fields.
    MalformedBody(String),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::MalformedBody(reason) => write!(f, "malformed request body: {reason}"),
        }
    }
}

impl std::error::Error for RegistryError {}
