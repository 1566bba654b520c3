pub mod axis;
pub mod config;
pub mod drawable;
pub mod histogram;
pub mod state;

pub use axis::*;
pub use config::*;
pub use drawable::*;
pub use histogram::*;
pub use state::*;
