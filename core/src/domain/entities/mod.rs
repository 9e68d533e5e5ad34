//! Domain entities representing core business objects.

pub mod token;
pub mod user;

// Re-export commonly used types
pub use token::{AccessToken, Claims, TokenPair};
pub use user::{UserAccount, UserProfile, DEFAULT_ROLE};
