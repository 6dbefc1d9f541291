use crate::domain::{
    entities::SearchPackage, repositories::PackageRepository, services::PackageMerger,
};
use anyhow::Result;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub struct QueryPackages {
    repository: Arc<dyn PackageRepository>,
}

impl QueryPackages {
    pub fn new(repository: Arc<dyn PackageRepository>) -> Self {
        Self { repository }
    }

    /// Fetch search results and the installed list concurrently, then join
    /// them into one merged, display-ordered view. If either fetch fails or
    /// is cancelled the other one is dropped with it.
    pub async fn execute(
        &self,
        term: &str,
        token: &CancellationToken,
    ) -> Result<Vec<SearchPackage>> {
        let (search, local) = tokio::try_join!(
            self.repository.search_packages(term, token),
            self.repository.installed_packages(token),
        )?;

        Ok(PackageMerger::merge(search, &local))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::LocalPackage;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubRepository {
        search_calls: AtomicUsize,
        list_calls: AtomicUsize,
    }

    #[async_trait]
    impl PackageRepository for StubRepository {
        async fn search_packages(
            &self,
            _term: &str,
            _token: &CancellationToken,
        ) -> Result<Vec<SearchPackage>> {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![
                SearchPackage::new(
                    "7-Zip".to_string(),
                    "7zip.7zip".to_string(),
                    "24.07".to_string(),
                    "winget".to_string(),
                ),
                SearchPackage::new(
                    "Git".to_string(),
                    "Git.Git".to_string(),
                    "2.45".to_string(),
                    "winget".to_string(),
                ),
            ])
        }

        async fn installed_packages(
            &self,
            _token: &CancellationToken,
        ) -> Result<Vec<LocalPackage>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![LocalPackage {
                name: "Git".to_string(),
                id: "git.git".to_string(),
                version: "2.40".to_string(),
                available: "2.45".to_string(),
                source: "winget".to_string(),
            }])
        }

        async fn install_package(&self, _package_id: &str) -> Result<()> {
            Ok(())
        }

        async fn uninstall_package(&self, _package_id: &str) -> Result<()> {
            Ok(())
        }

        async fn upgrade_package(&self, _package_id: &str) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn fetches_both_listings_once_and_merges_them() {
        let repository = Arc::new(StubRepository {
            search_calls: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
        });
        let use_case = QueryPackages::new(repository.clone());

        let packages = use_case
            .execute("git", &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(repository.search_calls.load(Ordering::SeqCst), 1);
        assert_eq!(repository.list_calls.load(Ordering::SeqCst), 1);
        assert_eq!(packages.len(), 2);
        // The installed package sorts ahead of the uninstalled one.
        assert_eq!(packages[0].id, "Git.Git");
        assert!(packages[0].installed);
        assert!(packages[0].upgradable);
        assert_eq!(packages[0].installed_version, "2.40");
        assert!(!packages[1].installed);
    }
}
