use std::fmt;

/// A package row from `winget search`, enriched by the merge step with the
/// locally installed state.
#[derive(Debug, Clone)]
pub struct SearchPackage {
    pub name: String,
    pub id: String,
    pub version: String,
    pub source: String,
    pub installed: bool,
    pub upgradable: bool,
    pub installed_version: String,
}

impl SearchPackage {
    pub fn new(name: String, id: String, version: String, source: String) -> Self {
        Self {
            name,
            id,
            version,
            source,
            installed: false,
            upgradable: false,
            installed_version: String::new(),
        }
    }

    /// Fold a matching locally installed package into this search result.
    /// An empty `available` field means winget knows no newer version.
    pub fn mark_installed(&mut self, local: &LocalPackage) {
        self.installed = true;
        self.installed_version = local.version.clone();
        self.upgradable = !local.available.is_empty();
    }
}

/// A package row from `winget list`. `available` is empty when no upgrade
/// is offered for the package.
#[derive(Debug, Clone)]
pub struct LocalPackage {
    pub name: String,
    pub id: String,
    pub version: String,
    pub available: String,
    pub source: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Install,
    Uninstall,
    Upgrade,
}

impl OperationKind {
    /// The winget subcommand for this operation.
    pub fn verb(&self) -> &'static str {
        match self {
            OperationKind::Install => "install",
            OperationKind::Uninstall => "uninstall",
            OperationKind::Upgrade => "upgrade",
        }
    }

    pub fn noun(&self) -> &'static str {
        match self {
            OperationKind::Install => "Installation",
            OperationKind::Uninstall => "Uninstallation",
            OperationKind::Upgrade => "Update",
        }
    }

    pub fn progressive(&self) -> &'static str {
        match self {
            OperationKind::Install => "Installing",
            OperationKind::Uninstall => "Uninstalling",
            OperationKind::Upgrade => "Updating",
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            OperationKind::Install => "was successfully installed",
            OperationKind::Uninstall => "was successfully uninstalled",
            OperationKind::Upgrade => "was successfully updated",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.verb())
    }
}

/// A request to run one package operation. Transient, never persisted.
#[derive(Debug, Clone)]
pub struct OperationRequest {
    pub package_id: String,
    pub package_name: String,
    pub kind: OperationKind,
}

impl OperationRequest {
    pub fn new(package_id: String, package_name: String, kind: OperationKind) -> Self {
        Self {
            package_id,
            package_name,
            kind,
        }
    }
}
