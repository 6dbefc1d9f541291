use crate::domain::entities::{LocalPackage, SearchPackage};
use anyhow::Result;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

#[async_trait]
pub trait PackageRepository: Send + Sync {
    async fn search_packages(
        &self,
        term: &str,
        token: &CancellationToken,
    ) -> Result<Vec<SearchPackage>>;
    async fn installed_packages(&self, token: &CancellationToken) -> Result<Vec<LocalPackage>>;
    async fn install_package(&self, package_id: &str) -> Result<()>;
    async fn uninstall_package(&self, package_id: &str) -> Result<()>;
    async fn upgrade_package(&self, package_id: &str) -> Result<()>;
}
