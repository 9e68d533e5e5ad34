//! Business services containing domain logic and use cases.

pub mod auth;
pub mod clock;
pub mod password;
pub mod token;

// Re-export commonly used types
pub use auth::{AccountLockPolicy, AuthService, AuthServiceConfig, LoginAttempt, NewAccount};
pub use clock::{Clock, ManualClock, SystemClock};
pub use token::{TokenService, TokenServiceConfig};
