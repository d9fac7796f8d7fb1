use std::fmt;

use serde::Serialize;

use super::{Checker, ValidationErrors};

#[derive(Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginCredentials, ValidationErrors> {
        let mut checker = Checker::default();

        let email = checker.required("email", &self.email, "Email is required");
        checker.email("email", email);

        // Passwords are sent as typed; only emptiness ignores whitespace.
        let password = checker
            .required("password", &self.password, "Password is required")
            .map(|_| self.password.as_str());
        checker.min_chars(
            "password",
            password,
            6,
            "Password must be at least 6 characters",
        );

        checker.finish()?;
        Ok(LoginCredentials {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

/// Body of `POST /auth/login`.
#[derive(Clone, Serialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
