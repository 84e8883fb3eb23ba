pub mod frames;
pub mod session;
pub mod ws;

pub use frames::{Inbound, Outbound};
pub use session::Session;
pub use ws::{router, ServerState};
