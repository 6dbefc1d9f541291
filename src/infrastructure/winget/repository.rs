use crate::domain::{
    entities::{LocalPackage, OperationKind, SearchPackage},
    repositories::PackageRepository,
};
use crate::infrastructure::winget::command::WingetCommand;
use crate::infrastructure::winget::parser;
use anyhow::Result;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

pub struct WingetPackageRepository {
    tool: String,
}

impl WingetPackageRepository {
    pub fn new(tool: impl Into<String>) -> Self {
        Self { tool: tool.into() }
    }

    async fn run_operation(&self, kind: OperationKind, package_id: &str) -> Result<()> {
        let command = WingetCommand::operation_command(&self.tool, kind, package_id);
        // Operations are fire-and-forget from the query path; they run to
        // completion and are never cancelled mid-flight.
        WingetCommand::execute(&command, &CancellationToken::new()).await?;
        Ok(())
    }
}

#[async_trait]
impl PackageRepository for WingetPackageRepository {
    async fn search_packages(
        &self,
        term: &str,
        token: &CancellationToken,
    ) -> Result<Vec<SearchPackage>> {
        let command = WingetCommand::search_command(&self.tool, term);
        let output = WingetCommand::execute(&command, token).await?;
        let packages = parser::parse_search_output(&output);
        tracing::debug!("search \"{}\" returned {} packages", term, packages.len());
        Ok(packages)
    }

    async fn installed_packages(&self, token: &CancellationToken) -> Result<Vec<LocalPackage>> {
        let command = WingetCommand::list_command(&self.tool);
        let output = WingetCommand::execute(&command, token).await?;
        let packages = parser::parse_local_output(&output);
        tracing::debug!("list returned {} installed packages", packages.len());
        Ok(packages)
    }

    async fn install_package(&self, package_id: &str) -> Result<()> {
        self.run_operation(OperationKind::Install, package_id).await
    }

    async fn uninstall_package(&self, package_id: &str) -> Result<()> {
        self.run_operation(OperationKind::Uninstall, package_id).await
    }

    async fn upgrade_package(&self, package_id: &str) -> Result<()> {
        self.run_operation(OperationKind::Upgrade, package_id).await
    }
}
