use crate::application::use_cases::*;
use crate::domain::repositories::PackageRepository;
use std::sync::Arc;

pub struct UseCaseContainer {
    pub query: Arc<QueryPackages>,
    pub install: Arc<InstallPackage>,
    pub uninstall: Arc<UninstallPackage>,
    pub upgrade: Arc<UpgradePackage>,
}

impl UseCaseContainer {
    pub fn new(package_repository: Arc<dyn PackageRepository>) -> Self {
        Self {
            query: Arc::new(QueryPackages::new(Arc::clone(&package_repository))),
            install: Arc::new(InstallPackage::new(Arc::clone(&package_repository))),
            uninstall: Arc::new(UninstallPackage::new(Arc::clone(&package_repository))),
            upgrade: Arc::new(UpgradePackage::new(Arc::clone(&package_repository))),
        }
    }
}
