//! Process-local credential store
//!
//! Used when no `DATABASE_URL` is configured and by the HTTP tests. Data is
//! lost when the process exits.

pub mod user_repository_impl;

pub use user_repository_impl::InMemoryUserRepository;
