// Network adapter for the sketch WebSocket.

pub mod client;

pub use client::{world_update_serializer, ws_handler};
