mod room_api;
mod room_client;

pub use room_api::*;
pub use room_client::*;
