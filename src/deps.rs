//! Build-time capability check.
//!
//! Every backend is a Rust crate, so "installed" means "compiled in". The
//! PDFium shared library itself is only looked up when pages are rendered.

/// A library the analyzer relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dependency {
    /// Crate name
    pub name: &'static str,
    /// Cargo feature that enables it, `None` when always built
    pub feature: Option<&'static str>,
    pub available: bool,
}

impl Dependency {
    const fn builtin(name: &'static str) -> Self {
        Self {
            name,
            feature: None,
            available: true,
        }
    }
}

/// The libraries a full run needs, with their availability in this build.
pub fn required_dependencies() -> Vec<Dependency> {
    vec![
        Dependency::builtin("lopdf"),
        Dependency::builtin("image"),
        Dependency {
            name: "pdfium-render",
            feature: Some("render"),
            available: cfg!(feature = "render"),
        },
    ]
}

/// Outcome of [`check_dependencies`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyReport {
    pub missing: Vec<Dependency>,
}

impl DependencyReport {
    pub fn all_present(&self) -> bool {
        self.missing.is_empty()
    }

    /// Names of the missing crates, in check order.
    pub fn missing_names(&self) -> Vec<&'static str> {
        self.missing.iter().map(|d| d.name).collect()
    }

    /// A single command that installs a build with every missing feature.
    pub fn install_command(&self) -> Option<String> {
        let features: Vec<&str> = self.missing.iter().filter_map(|d| d.feature).collect();
        if features.is_empty() {
            return None;
        }
        Some(format!(
            "cargo install pdfharvest-cli --features {}",
            features.join(",")
        ))
    }
}

/// Collect the dependencies that are not available.
pub fn check_dependencies(deps: &[Dependency]) -> DependencyReport {
    DependencyReport {
        missing: deps.iter().filter(|d| !d.available).copied().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_always_present() {
        let deps = required_dependencies();
        assert!(deps
            .iter()
            .filter(|d| d.feature.is_none())
            .all(|d| d.available));
    }

    #[test]
    fn test_missing_feature_reported() {
        let deps = [
            Dependency::builtin("lopdf"),
            Dependency {
                name: "pdfium-render",
                feature: Some("render"),
                available: false,
            },
        ];
        let report = check_dependencies(&deps);

        assert!(!report.all_present());
        assert_eq!(report.missing_names(), vec!["pdfium-render"]);
        assert_eq!(
            report.install_command().as_deref(),
            Some("cargo install pdfharvest-cli --features render")
        );
    }

    #[test]
    fn test_all_present() {
        let report = check_dependencies(&[Dependency::builtin("image")]);
        assert!(report.all_present());
        assert!(report.install_command().is_none());
    }

    #[cfg(feature = "render")]
    #[test]
    fn test_render_build_is_complete() {
        assert!(check_dependencies(&required_dependencies()).all_present());
    }
}
