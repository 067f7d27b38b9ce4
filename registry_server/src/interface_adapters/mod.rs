// Interface adapters: HTTP handlers, routes and wire DTOs.

pub mod handlers;
pub mod protocol;
pub mod routes;
pub mod state;
