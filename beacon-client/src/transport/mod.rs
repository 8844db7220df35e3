mod signal_transport;
mod transport_event;
mod ws_transport;

pub use signal_transport::*;
pub use transport_event::*;
pub use ws_transport::*;
