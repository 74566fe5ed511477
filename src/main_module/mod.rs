//! Server wiring split from main.rs: router, health, CORS and shutdown

mod cors;
mod health;
mod server;
mod shutdown;

pub use cors::*;
pub use health::*;
pub use server::*;
pub use shutdown::*;
