pub mod config;
pub mod constants;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod host;
pub mod smoothing;
pub mod target;

pub use config::*;
pub use controller::*;
pub use debounce::*;
pub use error::*;
pub use host::*;
pub use smoothing::*;
pub use target::*;
