use crate::use_cases::UserRegistry;
use std::sync::Arc;
use tokio::sync::Mutex;

// Shared application state for the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    // One lock covers id assignment and insertion so concurrent creates cannot interleave.
    pub registry: Arc<Mutex<UserRegistry>>,
}

impl AppState {
    pub fn new(registry: UserRegistry) -> Self {
        Self {
            registry: Arc::new(Mutex::new(registry)),
        }
    }
}
