pub mod collection;
pub mod config;
pub mod party;
pub mod pending;
pub mod session;
pub mod stats;
pub mod task;

pub use collection::*;
pub use config::*;
pub use party::*;
pub use pending::*;
pub use session::*;
pub use stats::*;
pub use task::*;
