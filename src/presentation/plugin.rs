use crate::application::UseCaseContainer;
use crate::domain::entities::{AppConfig, OperationKind, OperationRequest};
use crate::infrastructure::winget::CommandError;
use crate::presentation::host::PluginHost;
use crate::presentation::icons;
use crate::presentation::results::{self, ResultItem};
use crate::presentation::services::OperationTracker;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Launcher-facing entry point: debounces incoming queries, runs the
/// search/list fetch pair, and dispatches package operations. At most one
/// query session and one package operation are in flight at any time.
pub struct WingetPlugin {
    config: AppConfig,
    use_cases: Arc<UseCaseContainer>,
    host: Arc<dyn PluginHost>,
    tracker: Arc<OperationTracker>,
    session: Mutex<Option<CancellationToken>>,
}

impl WingetPlugin {
    pub fn new(
        config: AppConfig,
        use_cases: Arc<UseCaseContainer>,
        host: Arc<dyn PluginHost>,
    ) -> Self {
        Self {
            config,
            use_cases,
            host,
            tracker: Arc::new(OperationTracker::new()),
            session: Mutex::new(None),
        }
    }

    /// Handle one query keystroke. Waits out the debounce delay, then
    /// fetches and merges both listings. A newer query, or the caller's
    /// token, cancels the session; cancellation and failures both yield an
    /// empty list so the host never renders a raw error.
    pub async fn query(&self, query: &str, token: &CancellationToken) -> Vec<ResultItem> {
        let term = query.trim();
        if term.chars().count() < self.config.min_query_chars {
            return results::prompt_results();
        }

        if let Some(status) = self.tracker.status_line() {
            return results::in_progress_results(&status);
        }

        let session = self.begin_session(token);
        tokio::select! {
            _ = session.cancelled() => {
                tracing::debug!("query \"{}\" superseded while waiting", term);
                return Vec::new();
            }
            _ = tokio::time::sleep(Duration::from_millis(self.config.debounce_ms)) => {}
        }

        match self.use_cases.query.execute(term, &session).await {
            Ok(packages) if packages.is_empty() => results::no_results(term),
            Ok(packages) => results::build_package_results(&packages),
            Err(err) => {
                if matches!(
                    err.downcast_ref::<CommandError>(),
                    Some(CommandError::Cancelled)
                ) {
                    tracing::debug!("query \"{}\" cancelled mid-fetch", term);
                } else {
                    tracing::warn!("query \"{}\" failed: {}", term, err);
                }
                Vec::new()
            }
        }
    }

    /// Supersede the previous query session. Only the newest session's
    /// timer survives; the caller's token is linked in so host-side
    /// cancellation still propagates.
    fn begin_session(&self, token: &CancellationToken) -> CancellationToken {
        let mut slot = self.session.lock().unwrap();
        if let Some(previous) = slot.take() {
            previous.cancel();
        }
        let session = token.child_token();
        *slot = Some(session.clone());
        session
    }

    pub fn context_menu(&self, item: &ResultItem) -> Vec<ResultItem> {
        match &item.package {
            Some(package) => results::build_context_menu(package),
            None => Vec::new(),
        }
    }

    /// Activate a result: spawn its operation detached from the query path.
    /// Returns whether the activation was handled.
    pub fn activate(self: &Arc<Self>, item: &ResultItem) -> bool {
        let Some(request) = item.action.clone() else {
            return false;
        };
        let plugin = Arc::clone(self);
        tokio::spawn(async move {
            plugin.run_operation(request).await;
        });
        true
    }

    /// Run one install/uninstall/upgrade to completion. Serialized through
    /// the tracker: a second request is refused with a notification while
    /// one is running. The query box is reset on the way in and out so the
    /// launcher returns to a neutral browsing state.
    pub async fn run_operation(&self, request: OperationRequest) {
        let Some(_guard) = self.tracker.try_begin(request.kind, &request.package_name) else {
            let status = self
                .tracker
                .status_line()
                .unwrap_or_else(|| "Another operation is running".to_string());
            tracing::warn!(
                "{} refused for {}: {}",
                request.kind,
                request.package_name,
                status
            );
            self.host
                .show_message("Operation in progress", &status, &self.icon(icons::ERROR));
            return;
        };

        let kind = request.kind;
        self.host.change_query("");
        self.host.show_message(
            &format!("{} started", kind.noun()),
            &request.package_name,
            &self.icon(icons::START),
        );

        let result = match kind {
            OperationKind::Install => self.use_cases.install.execute(&request.package_id).await,
            OperationKind::Uninstall => self.use_cases.uninstall.execute(&request.package_id).await,
            OperationKind::Upgrade => self.use_cases.upgrade.execute(&request.package_id).await,
        };

        match result {
            Ok(()) => {
                tracing::info!("{} finished for {}", kind, request.package_name);
                self.host.show_message(
                    &format!("{} complete", kind.noun()),
                    &format!("{} {}", request.package_name, kind.success_message()),
                    &self.icon(icons::SUCCESS),
                );
            }
            Err(err) => {
                tracing::error!("{} failed for {}: {}", kind, request.package_name, err);
                self.host.show_message(
                    &format!("Error {}", kind.noun().to_lowercase()),
                    &format!(
                        "{} failed for {}: {}",
                        kind.noun().to_lowercase(),
                        request.package_name,
                        err
                    ),
                    &self.icon(icons::ERROR),
                );
            }
        }

        self.host.change_query("");
        // _guard drops here and frees the operation slot.
    }

    fn icon(&self, name: &str) -> String {
        icons::resolve(self.config.plugin_dir.as_deref(), name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{LocalPackage, SearchPackage};
    use crate::domain::repositories::PackageRepository;
    use anyhow::{Result, anyhow};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeRepository {
        search_results: Vec<SearchPackage>,
        local_packages: Vec<LocalPackage>,
        fetch_delay_ms: u64,
        operation_delay_ms: u64,
        fail_operations: bool,
        search_calls: AtomicUsize,
        install_calls: AtomicUsize,
        last_term: Mutex<String>,
    }

    impl FakeRepository {
        async fn wait_or_cancel(&self, delay_ms: u64, token: &CancellationToken) -> Result<()> {
            if delay_ms == 0 {
                return Ok(());
            }
            tokio::select! {
                _ = token.cancelled() => Err(CommandError::Cancelled.into()),
                _ = tokio::time::sleep(Duration::from_millis(delay_ms)) => Ok(()),
            }
        }
    }

    #[async_trait]
    impl PackageRepository for FakeRepository {
        async fn search_packages(
            &self,
            term: &str,
            token: &CancellationToken,
        ) -> Result<Vec<SearchPackage>> {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_term.lock().unwrap() = term.to_string();
            self.wait_or_cancel(self.fetch_delay_ms, token).await?;
            Ok(self.search_results.clone())
        }

        async fn installed_packages(
            &self,
            token: &CancellationToken,
        ) -> Result<Vec<LocalPackage>> {
            self.wait_or_cancel(self.fetch_delay_ms, token).await?;
            Ok(self.local_packages.clone())
        }

        async fn install_package(&self, _package_id: &str) -> Result<()> {
            self.install_calls.fetch_add(1, Ordering::SeqCst);
            if self.operation_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.operation_delay_ms)).await;
            }
            if self.fail_operations {
                return Err(anyhow!("installer exited with an error"));
            }
            Ok(())
        }

        async fn uninstall_package(&self, _package_id: &str) -> Result<()> {
            Ok(())
        }

        async fn upgrade_package(&self, _package_id: &str) -> Result<()> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingHost {
        messages: Mutex<Vec<(String, String)>>,
        queries: Mutex<Vec<String>>,
    }

    impl PluginHost for RecordingHost {
        fn show_message(&self, title: &str, message: &str, _icon_path: &str) {
            self.messages
                .lock()
                .unwrap()
                .push((title.to_string(), message.to_string()));
        }

        fn change_query(&self, query: &str) {
            self.queries.lock().unwrap().push(query.to_string());
        }
    }

    fn search_package(id: &str) -> SearchPackage {
        SearchPackage::new(
            "7-Zip".to_string(),
            id.to_string(),
            "24.07".to_string(),
            "winget".to_string(),
        )
    }

    fn test_config(debounce_ms: u64) -> AppConfig {
        AppConfig {
            debounce_ms,
            ..AppConfig::default()
        }
    }

    fn build_plugin(
        repository: Arc<FakeRepository>,
        host: Arc<RecordingHost>,
        debounce_ms: u64,
    ) -> Arc<WingetPlugin> {
        let use_cases = Arc::new(UseCaseContainer::new(repository));
        Arc::new(WingetPlugin::new(test_config(debounce_ms), use_cases, host))
    }

    #[tokio::test]
    async fn short_queries_show_the_prompt_without_fetching() {
        let repository = Arc::new(FakeRepository::default());
        let plugin = build_plugin(repository.clone(), Arc::new(RecordingHost::default()), 10);

        let items = plugin.query("  ab ", &CancellationToken::new()).await;

        assert_eq!(items[0].title, "Type to search winget packages");
        assert_eq!(repository.search_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn two_rapid_queries_run_one_fetch_with_the_second_term() {
        let repository = Arc::new(FakeRepository {
            search_results: vec![search_package("7zip.7zip")],
            ..FakeRepository::default()
        });
        let plugin = build_plugin(repository.clone(), Arc::new(RecordingHost::default()), 80);

        let early = Arc::clone(&plugin);
        let first = tokio::spawn(async move {
            early.query("fire", &CancellationToken::new()).await
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        let second = plugin.query("firefox", &CancellationToken::new()).await;

        assert!(first.await.unwrap().is_empty());
        assert!(!second.is_empty());
        assert_eq!(repository.search_calls.load(Ordering::SeqCst), 1);
        assert_eq!(*repository.last_term.lock().unwrap(), "firefox");
    }

    #[tokio::test]
    async fn cancelling_the_caller_mid_fetch_yields_empty_results() {
        let repository = Arc::new(FakeRepository {
            search_results: vec![search_package("7zip.7zip")],
            fetch_delay_ms: 10_000,
            ..FakeRepository::default()
        });
        let plugin = build_plugin(repository.clone(), Arc::new(RecordingHost::default()), 10);

        let token = CancellationToken::new();
        let trigger = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let items = plugin.query("firefox", &token).await;

        assert!(items.is_empty());
        assert_eq!(repository.search_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn fetch_failures_degrade_to_an_empty_list() {
        struct FailingRepository;

        #[async_trait]
        impl PackageRepository for FailingRepository {
            async fn search_packages(
                &self,
                _term: &str,
                _token: &CancellationToken,
            ) -> Result<Vec<SearchPackage>> {
                Err(CommandError::Execution("No package found".to_string()).into())
            }

            async fn installed_packages(
                &self,
                _token: &CancellationToken,
            ) -> Result<Vec<LocalPackage>> {
                Ok(Vec::new())
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

        let use_cases = Arc::new(UseCaseContainer::new(Arc::new(FailingRepository)));
        let plugin = WingetPlugin::new(
            test_config(10),
            use_cases,
            Arc::new(RecordingHost::default()),
        );

        let items = plugin.query("firefox", &CancellationToken::new()).await;
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn empty_fetch_shows_the_no_results_item() {
        let repository = Arc::new(FakeRepository::default());
        let plugin = build_plugin(repository, Arc::new(RecordingHost::default()), 10);

        let items = plugin.query("zzzz", &CancellationToken::new()).await;

        assert_eq!(items[0].title, "No packages found");
        assert_eq!(items[0].subtitle, "No results found for \"zzzz\"");
    }

    #[tokio::test]
    async fn queries_during_an_operation_report_its_status() {
        let repository = Arc::new(FakeRepository {
            operation_delay_ms: 150,
            ..FakeRepository::default()
        });
        let host = Arc::new(RecordingHost::default());
        let plugin = build_plugin(repository.clone(), host, 10);

        let runner = Arc::clone(&plugin);
        let operation = tokio::spawn(async move {
            runner
                .run_operation(OperationRequest::new(
                    "7zip.7zip".to_string(),
                    "7-Zip".to_string(),
                    OperationKind::Install,
                ))
                .await;
        });
        tokio::time::sleep(Duration::from_millis(30)).await;

        let items = plugin.query("firefox", &CancellationToken::new()).await;

        assert_eq!(items[0].title, "Installing 7-Zip...");
        assert_eq!(repository.search_calls.load(Ordering::SeqCst), 0);
        operation.await.unwrap();
    }

    #[tokio::test]
    async fn a_second_operation_is_refused_while_one_runs() {
        let repository = Arc::new(FakeRepository {
            operation_delay_ms: 150,
            ..FakeRepository::default()
        });
        let host = Arc::new(RecordingHost::default());
        let plugin = build_plugin(repository.clone(), host.clone(), 10);

        let runner = Arc::clone(&plugin);
        let operation = tokio::spawn(async move {
            runner
                .run_operation(OperationRequest::new(
                    "7zip.7zip".to_string(),
                    "7-Zip".to_string(),
                    OperationKind::Install,
                ))
                .await;
        });
        tokio::time::sleep(Duration::from_millis(30)).await;

        plugin
            .run_operation(OperationRequest::new(
                "Git.Git".to_string(),
                "Git".to_string(),
                OperationKind::Install,
            ))
            .await;

        assert_eq!(repository.install_calls.load(Ordering::SeqCst), 1);
        let messages = host.messages.lock().unwrap();
        assert!(
            messages
                .iter()
                .any(|(title, _)| title == "Operation in progress")
        );
        drop(messages);
        operation.await.unwrap();
    }

    #[tokio::test]
    async fn successful_operations_notify_and_reset_the_query() {
        let repository = Arc::new(FakeRepository::default());
        let host = Arc::new(RecordingHost::default());
        let plugin = build_plugin(repository, host.clone(), 10);

        plugin
            .run_operation(OperationRequest::new(
                "7zip.7zip".to_string(),
                "7-Zip".to_string(),
                OperationKind::Install,
            ))
            .await;

        let messages = host.messages.lock().unwrap();
        assert_eq!(
            messages[0],
            ("Installation started".to_string(), "7-Zip".to_string())
        );
        assert_eq!(
            messages[1],
            (
                "Installation complete".to_string(),
                "7-Zip was successfully installed".to_string()
            )
        );
        assert_eq!(*host.queries.lock().unwrap(), vec!["", ""]);
        assert!(plugin.tracker.status_line().is_none());
    }

    #[tokio::test]
    async fn failed_operations_notify_the_error_and_free_the_slot() {
        let repository = Arc::new(FakeRepository {
            fail_operations: true,
            ..FakeRepository::default()
        });
        let host = Arc::new(RecordingHost::default());
        let plugin = build_plugin(repository, host.clone(), 10);

        plugin
            .run_operation(OperationRequest::new(
                "7zip.7zip".to_string(),
                "7-Zip".to_string(),
                OperationKind::Install,
            ))
            .await;

        let messages = host.messages.lock().unwrap();
        let (title, message) = &messages[1];
        assert_eq!(title, "Error installation");
        assert!(message.contains("installation failed for 7-Zip"));
        assert!(message.contains("installer exited with an error"));
        assert!(plugin.tracker.status_line().is_none());
    }

    #[tokio::test]
    async fn activation_dispatches_the_item_operation() {
        let repository = Arc::new(FakeRepository::default());
        let host = Arc::new(RecordingHost::default());
        let plugin = build_plugin(repository.clone(), host, 10);

        let items = results::build_package_results(&[search_package("7zip.7zip")]);
        assert!(plugin.activate(&items[0]));

        // The spawned operation runs detached; give it a moment.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(repository.install_calls.load(Ordering::SeqCst), 1);

        let prompt = results::prompt_results();
        assert!(!plugin.activate(&prompt[0]));
    }
}
