use crate::domain::entities::{OperationKind, OperationRequest, SearchPackage};
use crate::presentation::icons;

/// One entry in the launcher's result list. `package` carries the merged
/// record along so a context menu can be built for the selected entry.
#[derive(Debug, Clone)]
pub struct ResultItem {
    pub title: String,
    pub subtitle: String,
    pub icon_path: String,
    pub action: Option<OperationRequest>,
    pub package: Option<SearchPackage>,
}

impl ResultItem {
    fn plain(title: String, subtitle: String, icon_path: &str) -> Self {
        Self {
            title,
            subtitle,
            icon_path: icon_path.to_string(),
            action: None,
            package: None,
        }
    }
}

pub fn build_package_results(packages: &[SearchPackage]) -> Vec<ResultItem> {
    packages.iter().map(package_result).collect()
}

fn package_result(package: &SearchPackage) -> ResultItem {
    let (title, subtitle, icon, kind) = if package.upgradable {
        (
            format!("{} | New version available", package.name),
            format!(
                "ID: {} | Version: {} -> {} | Source: {}",
                package.id, package.installed_version, package.version, package.source
            ),
            icons::UPLOAD,
            OperationKind::Upgrade,
        )
    } else if package.installed {
        (
            format!("{} | Installed", package.name),
            format!(
                "ID: {} | Version: {} | Source: {}",
                package.id, package.installed_version, package.source
            ),
            icons::SUCCESS,
            OperationKind::Uninstall,
        )
    } else {
        (
            package.name.clone(),
            format!(
                "ID: {} | Version: {} | Source: {}",
                package.id, package.version, package.source
            ),
            icons::DOWNLOAD,
            OperationKind::Install,
        )
    };

    ResultItem {
        title,
        subtitle,
        icon_path: icon.to_string(),
        action: Some(OperationRequest::new(
            package.id.clone(),
            package.name.clone(),
            kind,
        )),
        package: Some(package.clone()),
    }
}

/// Context menu for a selected result: upgradable packages offer an update,
/// everything else offers install or uninstall depending on local state.
pub fn build_context_menu(package: &SearchPackage) -> Vec<ResultItem> {
    let mut menus = Vec::new();

    if package.upgradable {
        menus.push(ResultItem {
            title: "Update".to_string(),
            subtitle: format!("Update to {}", package.version),
            icon_path: icons::UPLOAD.to_string(),
            action: Some(OperationRequest::new(
                package.id.clone(),
                package.name.clone(),
                OperationKind::Upgrade,
            )),
            package: Some(package.clone()),
        });
    }

    if !package.installed {
        menus.push(ResultItem {
            title: "Install".to_string(),
            subtitle: format!("Install {}", package.name),
            icon_path: icons::DOWNLOAD.to_string(),
            action: Some(OperationRequest::new(
                package.id.clone(),
                package.name.clone(),
                OperationKind::Install,
            )),
            package: Some(package.clone()),
        });
    } else {
        menus.push(ResultItem {
            title: "Uninstall".to_string(),
            subtitle: format!("Uninstall {}", package.name),
            icon_path: icons::DELETE.to_string(),
            action: Some(OperationRequest::new(
                package.id.clone(),
                package.name.clone(),
                OperationKind::Uninstall,
            )),
            package: Some(package.clone()),
        });
    }

    menus
}

pub fn prompt_results() -> Vec<ResultItem> {
    vec![ResultItem::plain(
        "Type to search winget packages".to_string(),
        "At least 3 characters".to_string(),
        icons::SEARCH,
    )]
}

pub fn no_results(term: &str) -> Vec<ResultItem> {
    vec![ResultItem::plain(
        "No packages found".to_string(),
        format!("No results found for \"{}\"", term),
        icons::SEARCH,
    )]
}

pub fn in_progress_results(status: &str) -> Vec<ResultItem> {
    vec![ResultItem::plain(
        status.to_string(),
        "Another package operation is still running".to_string(),
        icons::START,
    )]
}
