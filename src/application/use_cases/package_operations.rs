use crate::domain::repositories::PackageRepository;
use anyhow::Result;
use std::sync::Arc;

pub struct InstallPackage {
    repository: Arc<dyn PackageRepository>,
}

impl InstallPackage {
    pub fn new(repository: Arc<dyn PackageRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, package_id: &str) -> Result<()> {
        self.repository.install_package(package_id).await
    }
}

pub struct UninstallPackage {
    repository: Arc<dyn PackageRepository>,
}

impl UninstallPackage {
    pub fn new(repository: Arc<dyn PackageRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, package_id: &str) -> Result<()> {
        self.repository.uninstall_package(package_id).await
    }
}

pub struct UpgradePackage {
    repository: Arc<dyn PackageRepository>,
}

impl UpgradePackage {
    pub fn new(repository: Arc<dyn PackageRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, package_id: &str) -> Result<()> {
        self.repository.upgrade_package(package_id).await
    }
}
