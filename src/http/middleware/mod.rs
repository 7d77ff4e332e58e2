//! Sample middleware built on the router's middleware contract.

pub mod logging;
pub mod request_id;

pub use logging::logging;
pub use request_id::request_id;
