//! Bulk lookups used by the voucher import.
//!
//! Each import resolves every referenced email and hashtag with exactly one
//! call per port, never one query per row.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::voucher::{TaskRef, UserRef};

/// Finds users by email address.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Returns every user whose email is in `emails`. Matching is exact.
    ///
    /// Unknown emails are simply absent from the result.
    async fn find_by_emails(&self, emails: &[String]) -> Result<Vec<UserRef>, DomainError>;
}

/// Finds tasks by hashtag.
#[async_trait]
pub trait TaskCatalog: Send + Sync {
    /// Returns every task whose hashtag is in `hashtags`.
    async fn find_by_hashtags(&self, hashtags: &[String]) -> Result<Vec<TaskRef>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ports_are_object_safe() {
        fn _users(_: &dyn UserDirectory) {}
        fn _tasks(_: &dyn TaskCatalog) {}
    }
}
