pub mod attendance;
pub mod auth;
pub mod employee;
pub mod macros;
pub mod report;

pub use attendance::*;
pub use auth::*;
pub use employee::*;
pub use report::*;
