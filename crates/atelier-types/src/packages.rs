use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Pip,
    Npm,
}

/// A package installed in the project's preview workspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstalledPackage {
    pub name: String,
    pub version: String,
    pub package_manager: PackageManager,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Installed packages split by package manager.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstalledPackages {
    pub python_packages: Vec<InstalledPackage>,
    pub npm_packages: Vec<InstalledPackage>,
    pub total_count: usize,
}
