pub mod auth;
pub mod clock;
pub mod ledger;
pub mod reports;
pub mod user_context;

pub use auth::{AuthService, Claims};
pub use clock::{Clock, ManualClock, SystemClock};
pub use ledger::{Ledger, LedgerError};
pub use user_context::UserContext;
