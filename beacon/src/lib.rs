pub use beacon_core::model::{MessageCodec, SignalMessage};

pub mod model {
    pub use beacon_core::model::*;
}

pub mod error {
    pub use beacon_core::error::*;
}

#[cfg(feature = "client")]
pub mod client {
    pub use beacon_client::*;
}

#[cfg(feature = "webrtc")]
pub mod engine {
    pub use beacon_webrtc::*;
}
