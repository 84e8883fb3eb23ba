pub mod apps;
pub mod clock;
pub mod dispatcher;
pub mod jokes;
pub mod net;
pub mod provider_trait;
pub mod screenshot;
pub mod system;

pub use dispatcher::{ActionSet, Dispatcher, UNRECOGNIZED};
pub use provider_trait::ActionProvider;
