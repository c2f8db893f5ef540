//! Configuration management for mdsite.
//!
//! Parses `mdsite.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! Path values support `${VAR}` and `${VAR:-default}` expansion:
//!
//! - `site.content_dir`
//! - `site.static_dir`
//! - `site.template`
//! - `site.output_dir`

mod expand;

use serde::Deserialize;
use std::path::{Component, Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override Markdown content directory.
    pub content_dir: Option<PathBuf>,
    /// Override static assets directory.
    pub static_dir: Option<PathBuf>,
    /// Override page template path.
    pub template: Option<PathBuf>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Override clean-before-build flag.
    pub clean: Option<bool>,
    /// Override worker thread count.
    pub jobs: Option<usize>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdsite.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site layout (paths are relative strings from TOML).
    site: SiteConfigRaw,
    /// Build behaviour.
    pub build: BuildConfig,

    /// Resolved site layout (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw site configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    content_dir: Option<String>,
    static_dir: Option<String>,
    template: Option<String>,
    output_dir: Option<String>,
}

/// Resolved site layout with absolute paths.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Directory of Markdown documents.
    pub content_dir: PathBuf,
    /// Directory copied verbatim into the output.
    pub static_dir: PathBuf,
    /// HTML template with `{{ Title }}` and `{{ Content }}` placeholders.
    pub template: PathBuf,
    /// Directory the site is generated into.
    pub output_dir: PathBuf,
}

/// Build configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Remove the output directory before building.
    pub clean: bool,
    /// Number of worker threads for page generation (default: rayon's choice).
    pub jobs: Option<usize>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            clean: true,
            jobs: None,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.output_dir`").
        field: String,
        /// Error message (e.g., "${`OUT`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdsite.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values. The final
    /// configuration is validated.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(content_dir) = &settings.content_dir {
            self.site_resolved.content_dir.clone_from(content_dir);
        }
        if let Some(static_dir) = &settings.static_dir {
            self.site_resolved.static_dir.clone_from(static_dir);
        }
        if let Some(template) = &settings.template {
            self.site_resolved.template.clone_from(template);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.site_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(clean) = settings.clean {
            self.build.clean = clean;
        }
        if let Some(jobs) = settings.jobs {
            self.build.jobs = Some(jobs);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        let mut config = Self {
            site: SiteConfigRaw::default(),
            build: BuildConfig::default(),
            site_resolved: SiteConfig::default(),
            config_path: None,
        };
        config.resolve_paths(base);
        config
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// The output directory is wiped on clean builds, so it must not contain
    /// the content or static directories.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let site = &self.site_resolved;
        require_non_empty(&site.template, "site.template")?;
        require_non_empty(&site.output_dir, "site.output_dir")?;

        let output_dir = normalize_path(&site.output_dir);
        for (dir, field) in [
            (&site.content_dir, "site.content_dir"),
            (&site.static_dir, "site.static_dir"),
        ] {
            if normalize_path(dir).starts_with(&output_dir) {
                return Err(ConfigError::Validation(format!(
                    "{field} cannot be inside site.output_dir ({})",
                    site.output_dir.display()
                )));
            }
        }

        if self.build.jobs == Some(0) {
            return Err(ConfigError::Validation(
                "build.jobs must be greater than 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let site = &mut self.site;
        for (value, field) in [
            (&mut site.content_dir, "site.content_dir"),
            (&mut site.static_dir, "site.static_dir"),
            (&mut site.template, "site.template"),
            (&mut site.output_dir, "site.output_dir"),
        ] {
            if let Some(raw) = value {
                *raw = expand::expand_env(raw, field)?;
            }
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.site_resolved = SiteConfig {
            content_dir: resolve(self.site.content_dir.as_deref(), "content"),
            static_dir: resolve(self.site.static_dir.as_deref(), "static"),
            template: resolve(self.site.template.as_deref(), "template.html"),
            output_dir: resolve(self.site.output_dir.as_deref(), "public"),
        };
    }
}

/// Absolute form of `path` for containment checks.
///
/// `.` and `..` are folded lexically, then symlinks are resolved on the
/// longest prefix that exists on disk.
fn normalize_path(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut lexical = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                lexical.pop();
            }
            other => lexical.push(other),
        }
    }

    let mut existing = lexical.as_path();
    let mut missing = Vec::new();
    loop {
        if let Ok(canonical) = existing.canonicalize() {
            return missing
                .iter()
                .rev()
                .fold(canonical, |path, name| path.join(name));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name);
                existing = parent;
            }
            _ => break,
        }
    }
    lexical
}

/// Require a path field to be non-empty.
fn require_non_empty(value: &Path, field: &str) -> Result<(), ConfigError> {
    if value.as_os_str().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(
            config.site_resolved,
            SiteConfig {
                content_dir: PathBuf::from("/test/content"),
                static_dir: PathBuf::from("/test/static"),
                template: PathBuf::from("/test/template.html"),
                output_dir: PathBuf::from("/test/public"),
            }
        );
        assert!(config.build.clean);
        assert_eq!(config.build.jobs, None);
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.build.clean);
        assert!(config.site.content_dir.is_none());
    }

    #[test]
    fn test_parse_build_config() {
        let toml = r"
[build]
clean = false
jobs = 4
";
        let config: Config = toml::from_str(toml).unwrap();
        assert!(!config.build.clean);
        assert_eq!(config.build.jobs, Some(4));
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[site]
content_dir = "docs"
output_dir = "dist"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.site_resolved.content_dir, PathBuf::from("/project/docs"));
        assert_eq!(config.site_resolved.static_dir, PathBuf::from("/project/static"));
        assert_eq!(
            config.site_resolved.template,
            PathBuf::from("/project/template.html")
        );
        assert_eq!(config.site_resolved.output_dir, PathBuf::from("/project/dist"));
    }

    #[test]
    fn test_load_from_explicit_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("mdsite.toml");
        std::fs::write(&path, "[site]\ntemplate = \"layout.html\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.site_resolved.template, temp_dir.path().join("layout.html"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/mdsite.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("mdsite.toml");
        std::fs::write(&path, "[site\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_apply_cli_settings_paths() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let settings = CliSettings {
            content_dir: Some(PathBuf::from("/custom/content")),
            output_dir: Some(PathBuf::from("/custom/out")),
            ..Default::default()
        };
        config.apply_cli_settings(&settings);

        assert_eq!(config.site_resolved.content_dir, PathBuf::from("/custom/content"));
        assert_eq!(config.site_resolved.output_dir, PathBuf::from("/custom/out"));
        assert_eq!(config.site_resolved.static_dir, PathBuf::from("/test/static"));
    }

    #[test]
    fn test_apply_cli_settings_build() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let settings = CliSettings {
            clean: Some(false),
            jobs: Some(2),
            ..Default::default()
        };
        config.apply_cli_settings(&settings);

        assert!(!config.build.clean);
        assert_eq!(config.build.jobs, Some(2));
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.site_resolved.content_dir, PathBuf::from("/test/content"));
        assert!(config.build.clean);
    }

    #[test]
    fn test_expand_env_vars_site_paths() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("MDSITE_TEST_OUT", "/srv/www");
        }

        let toml = r#"
[site]
output_dir = "${MDSITE_TEST_OUT}"
content_dir = "${MDSITE_TEST_CONTENT:-pages}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.site.output_dir.as_deref(), Some("/srv/www"));
        assert_eq!(config.site.content_dir.as_deref(), Some("pages"));

        unsafe {
            std::env::remove_var("MDSITE_TEST_OUT");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MISSING_VAR_MDSITE_TEST");
        }

        let toml = r#"
[site]
template = "${MISSING_VAR_MDSITE_TEST}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("MISSING_VAR_MDSITE_TEST"));
        assert!(err.to_string().contains("site.template"));
    }

    // Validation tests

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_output_equals_content() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site_resolved.output_dir = PathBuf::from("/test/content");
        assert_validation_error(&config, &["site.content_dir", "site.output_dir"]);
    }

    #[test]
    fn test_validate_static_inside_output() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site_resolved.output_dir = PathBuf::from("/test");
        assert_validation_error(&config, &["cannot be inside"]);
    }

    #[test]
    fn test_validate_output_parent_of_content_via_dot_dot() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        std::fs::create_dir_all(root.join("content")).unwrap();
        std::fs::write(root.join("content/index.md"), "# Home").unwrap();
        let path = root.join("mdsite.toml");
        std::fs::write(&path, "").unwrap();

        let settings = CliSettings {
            output_dir: Some(root.join("content/..")),
            ..Default::default()
        };
        let err = Config::load(Some(&path), Some(&settings)).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("cannot be inside"));
    }

    #[test]
    fn test_validate_relative_output_dot() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site_resolved.content_dir = PathBuf::from("content");
        config.site_resolved.static_dir = PathBuf::from("/elsewhere/static");
        config.site_resolved.output_dir = PathBuf::from(".");
        assert_validation_error(&config, &["site.content_dir", "cannot be inside"]);
    }

    #[test]
    fn test_validate_relative_output_dot_dot() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site_resolved.content_dir = PathBuf::from("content");
        config.site_resolved.static_dir = PathBuf::from("/elsewhere/static");
        config.site_resolved.output_dir = PathBuf::from("..");
        assert_validation_error(&config, &["site.content_dir", "cannot be inside"]);
    }

    #[test]
    fn test_validate_sibling_output_with_dot_segments_passes() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site_resolved.output_dir = PathBuf::from("/test/./content/../public");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_normalize_path_folds_dot_segments() {
        assert_eq!(
            normalize_path(Path::new("/nonexistent-mdsite/a/./b/../c")),
            PathBuf::from("/nonexistent-mdsite/a/c")
        );
    }

    #[test]
    fn test_validate_jobs_zero() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.build.jobs = Some(0);
        assert_validation_error(&config, &["build.jobs"]);
    }

    #[test]
    fn test_validate_empty_template() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site_resolved.template = PathBuf::new();
        assert_validation_error(&config, &["site.template cannot be empty"]);
    }
}
