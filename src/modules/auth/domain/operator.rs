use std::env;

/// The single privileged account allowed to edit the portfolio. There is
/// no user table; the credentials live in the environment as an email and
/// an argon2 PHC hash.
#[derive(Debug, Clone)]
pub struct OperatorAccount {
    pub email: String,
    pub password_hash: String,
}

impl OperatorAccount {
    pub fn new(email: &str, password_hash: &str) -> Self {
        Self {
            email: email.trim().to_lowercase(),
            password_hash: password_hash.to_string(),
        }
    }

    pub fn from_env() -> Self {
        let email = env::var("OPERATOR_EMAIL").expect("OPERATOR_EMAIL must be set");
        let password_hash =
            env::var("OPERATOR_PASSWORD_HASH").expect("OPERATOR_PASSWORD_HASH must be set");

        if !password_hash.starts_with("$argon2") {
            panic!("OPERATOR_PASSWORD_HASH must be an argon2 PHC string");
        }

        Self::new(&email, &password_hash)
    }

    pub fn matches_email(&self, email: &str) -> bool {
        self.email == email.trim().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_normalized() {
        let operator = OperatorAccount::new("  Admin@Example.COM ", "$argon2id$fake");

        assert_eq!(operator.email, "admin@example.com");
        assert!(operator.matches_email("ADMIN@example.com"));
        assert!(!operator.matches_email("other@example.com"));
    }
}
