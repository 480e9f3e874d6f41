//! Integration credential lookup.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::integration::Integration;

#[async_trait]
pub trait IntegrationRepository: Send + Sync {
    /// The integration registered under `name`, if any.
    async fn find_by_name(&self, name: &str) -> Result<Option<Integration>, DomainError>;
}
