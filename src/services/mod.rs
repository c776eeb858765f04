//! External service interactions
//!
//! - HTTP gateways for the data API and the compiler service
//! - Background execution of gateway calls

pub mod gateway;
pub mod request_runner;

pub use gateway::{CompilerApi, DataApi, HttpCompilerApi, HttpDataApi};
