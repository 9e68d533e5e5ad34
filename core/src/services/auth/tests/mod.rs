//! Tests for authentication service

use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::Algorithm;
use re_shared::config::LockoutConfig;

use crate::repositories::MockUserRepository;
use crate::services::auth::{AuthService, AuthServiceConfig, LoginAttempt, NewAccount};
use crate::services::clock::ManualClock;
use crate::services::password::MIN_COST;
use crate::services::token::{TokenService, TokenServiceConfig};


pub(super) const PASSWORD: &str = "Passw0rd!";

pub(super) struct Harness {
    pub service: AuthService<MockUserRepository>,
    pub repo: Arc<MockUserRepository>,
    pub clock: ManualClock,
}

pub(super) fn harness() -> Harness {
    harness_with(LockoutConfig {
        enabled: true,
        max_failed_attempts: 3,
        lockout_duration_minutes: 15,
    })
}

pub(super) fn harness_with(lockout: LockoutConfig) -> Harness {
    let clock = ManualClock::new(Utc::now());
    let token_config = TokenServiceConfig {
        jwt_secret: "test-secret-key-that-is-long-enough-for-hs256".to_string(),
        algorithm: Algorithm::HS256,
        issuer: "RealEstateAPI".to_string(),
        audience: "RealEstateClient".to_string(),
        access_token_expiry_minutes: 60,
        refresh_token_expiry_days: 7,
    };
    let token_service =
        Arc::new(TokenService::with_clock(token_config, Arc::new(clock.clone())).unwrap());
    let repo = Arc::new(MockUserRepository::new());
    let config = AuthServiceConfig {
        lockout,
        bcrypt_cost: MIN_COST,
    };

    Harness {
        service: AuthService::new(Arc::clone(&repo), token_service, config),
        repo,
        clock,
    }
}

pub(super) fn bob() -> NewAccount {
    NewAccount {
        email: "bob@example.com".to_string(),
        password: PASSWORD.to_string(),
        confirm_password: PASSWORD.to_string(),
        first_name: "Bob".to_string(),
        last_name: "Lee".to_string(),
        role: None,
    }
}

pub(super) fn login(email: &str, password: &str, remember_me: bool) -> LoginAttempt {
    LoginAttempt {
        email: email.to_string(),
        password: password.to_string(),
        remember_me,
    }
}
