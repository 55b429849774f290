pub mod address;
pub mod agent;
pub mod chain;
pub mod intent;
pub mod interval;

pub use address::*;
pub use agent::*;
pub use chain::*;
pub use intent::*;
pub use interval::*;
