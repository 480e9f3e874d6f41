//! Confirmation token handlers.

use crate::domain::foundation::Timestamp;
use crate::domain::integration::{ConfirmationTokens, IntegrationError};

/// Mints a confirmation token for an authorization id.
pub struct IssueConfirmationTokenHandler {
    tokens: ConfirmationTokens,
}

impl IssueConfirmationTokenHandler {
    pub fn new(tokens: ConfirmationTokens) -> Self {
        Self { tokens }
    }

    pub fn handle(&self, authorization_id: &str) -> Result<String, IntegrationError> {
        self.tokens.issue(authorization_id, Timestamp::now())
    }
}

/// Resolves a confirmation token back to its authorization id.
pub struct VerifyConfirmationTokenHandler {
    tokens: ConfirmationTokens,
}

impl VerifyConfirmationTokenHandler {
    pub fn new(tokens: ConfirmationTokens) -> Self {
        Self { tokens }
    }

    pub fn handle(&self, token: &str) -> Result<String, IntegrationError> {
        self.tokens.verify(token, Timestamp::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    #[test]
    fn issued_token_round_trips_through_verify() {
        let tokens = ConfirmationTokens::new(&Secret::new("secret".to_string()), 60);
        let issue = IssueConfirmationTokenHandler::new(tokens.clone());
        let verify = VerifyConfirmationTokenHandler::new(tokens);

        let token = issue.handle("auth-7").unwrap();

        assert_eq!(verify.handle(&token).unwrap(), "auth-7");
    }
}
