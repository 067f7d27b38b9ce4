// Domain layer: user records and registry errors.

pub mod entities;
pub mod errors;

pub use entities::{IdStrategy, NewUser, User};
pub use errors::RegistryError;
