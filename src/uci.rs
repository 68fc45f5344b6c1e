use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised by the UCI store.
#[derive(Debug, Error)]
pub enum UciError {
    #[error("failed to read UCI package '{package}': {source}")]
    Read {
        package: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error in UCI package '{package}' at line {line}: {reason}")]
    Parse {
        package: String,
        line: usize,
        reason: String,
    },
}

/// A single `config <type> ['<name>']` section with its options.
#[derive(Debug, Clone)]
pub struct UciSection {
    pub section_type: String,
    pub name: Option<String>,
    options: HashMap<String, String>,
}

impl UciSection {
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }
}

/// One parsed package file, sections in file order.
#[derive(Debug, Clone)]
struct UciPackage {
    sections: Vec<UciSection>,
}

/// Read-only store over the router's UCI configuration directory
/// (normally /etc/config). Packages are parsed on `load` and held
/// in memory until `unload`.
#[derive(Debug)]
pub struct UciStore {
    config_dir: PathBuf,
    packages: HashMap<String, UciPackage>,
}

impl UciStore {
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            packages: HashMap::new(),
        }
    }

    /// Parse `<config_dir>/<package>` into the store. Loading a package
    /// that is already loaded is a no-op.
    pub fn load(&mut self, package: &str) -> Result<(), UciError> {
        if self.packages.contains_key(package) {
            return Ok(());
        }

        let path = self.config_dir.join(package);
        let contents = std::fs::read_to_string(&path).map_err(|source| UciError::Read {
            package: package.to_string(),
            source,
        })?;

        let parsed = parse_package(package, &contents)?;
        debug!(
            package,
            sections = parsed.sections.len(),
            path = %path.display(),
            "UCI package loaded"
        );
        self.packages.insert(package.to_string(), parsed);
        Ok(())
    }

    /// Drop a loaded package. Unloading a package that was never loaded
    /// is harmless.
    pub fn unload(&mut self, package: &str) {
        if self.packages.remove(package).is_some() {
            debug!(package, "UCI package unloaded");
        }
    }

    pub fn is_loaded(&self, package: &str) -> bool {
        self.packages.contains_key(package)
    }

    /// Value of `option` on the first section of `section_type` in the
    /// named package, in file order. `None` if the package is not
    /// loaded, no such section exists, or the option is unset.
    pub fn get_first(&self, package: &str, section_type: &str, option: &str) -> Option<&str> {
        self.packages
            .get(package)?
            .sections
            .iter()
            .find(|s| s.section_type == section_type)?
            .option(option)
    }

    /// Load `package` behind a guard that unloads it when dropped, on
    /// success and failure paths alike.
    pub fn session<'a>(&'a mut self, package: &str) -> Result<UciSession<'a>, UciError> {
        self.load(package)?;
        Ok(UciSession {
            store: self,
            package: package.to_string(),
        })
    }
}

/// Scoped acquisition of one UCI package: the package stays loaded for
/// the guard's lifetime and is unloaded on drop.
pub struct UciSession<'a> {
    store: &'a mut UciStore,
    package: String,
}

impl UciSession<'_> {
    pub fn get_first(&self, section_type: &str, option: &str) -> Option<&str> {
        self.store.get_first(&self.package, section_type, option)
    }
}

impl Drop for UciSession<'_> {
    fn drop(&mut self) {
        self.store.unload(&self.package);
    }
}

fn parse_package(package: &str, contents: &str) -> Result<UciPackage, UciError> {
    let mut sections: Vec<UciSection> = Vec::new();

    for (idx, raw_line) in contents.lines().enumerate() {
        let line = raw_line.trim();
        let line_no = idx + 1;

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut tokens = tokenize(package, line, line_no)?.into_iter();
        let keyword = match tokens.next() {
            Some(k) => k,
            None => continue,
        };

        match keyword.as_str() {
            "config" => {
                let section_type = tokens.next().ok_or_else(|| UciError::Parse {
                    package: package.to_string(),
                    line: line_no,
                    reason: "'config' without a section type".to_string(),
                })?;
                sections.push(UciSection {
                    section_type,
                    name: tokens.next(),
                    options: HashMap::new(),
                });
            }
            "option" => {
                let key = tokens.next().ok_or_else(|| UciError::Parse {
                    package: package.to_string(),
                    line: line_no,
                    reason: "'option' without a name".to_string(),
                })?;
                let value = tokens.next().unwrap_or_default();
                let section = sections.last_mut().ok_or_else(|| UciError::Parse {
                    package: package.to_string(),
                    line: line_no,
                    reason: "'option' outside any config section".to_string(),
                })?;
                section.options.insert(key, value);
            }
            // list values are not needed by the viewer
            "list" => {}
            other => {
                warn!(
                    package,
                    line = line_no,
                    keyword = other,
                    "Ignoring unknown UCI keyword"
                );
            }
        }
    }

    Ok(UciPackage { sections })
}

/// Split a UCI line into tokens, honoring single and double quotes.
fn tokenize(package: &str, line: &str, line_no: usize) -> Result<Vec<String>, UciError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for ch in line.chars() {
        match quote {
            Some(q) => {
                if ch == q {
                    quote = None;
                } else {
                    current.push(ch);
                }
            }
            None => match ch {
                '\'' | '"' => {
                    quote = Some(ch);
                    in_token = true;
                }
                c if c.is_whitespace() => {
                    if in_token {
                        tokens.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                }
                c => {
                    current.push(c);
                    in_token = true;
                }
            },
        }
    }

    if quote.is_some() {
        return Err(UciError::Parse {
            package: package.to_string(),
            line: line_no,
            reason: "unterminated quote".to_string(),
        });
    }
    if in_token {
        tokens.push(current);
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const ARIA2_CONFIG: &str = r#"
config aria2 'main'
	option enabled '1'
	option log '/var/log/aria2.log'
	option dir '/mnt/downloads'
	list header 'X-Test: 1'

config aria2 'secondary'
	option log '/tmp/other.log'
"#;

    fn store_with(package: &str, contents: &str) -> (TempDir, UciStore) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(package), contents).unwrap();
        let store = UciStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_get_first_returns_first_section_of_type() {
        let (_dir, mut store) = store_with("aria2", ARIA2_CONFIG);
        store.load("aria2").unwrap();
        assert_eq!(
            store.get_first("aria2", "aria2", "log"),
            Some("/var/log/aria2.log")
        );
    }

    #[test]
    fn test_get_first_missing_option() {
        let (_dir, mut store) = store_with("aria2", ARIA2_CONFIG);
        store.load("aria2").unwrap();
        assert_eq!(store.get_first("aria2", "aria2", "nope"), None);
        assert_eq!(store.get_first("aria2", "other_type", "log"), None);
    }

    #[test]
    fn test_get_first_without_load() {
        let (_dir, store) = store_with("aria2", ARIA2_CONFIG);
        assert_eq!(store.get_first("aria2", "aria2", "log"), None);
    }

    #[test]
    fn test_load_missing_package() {
        let dir = TempDir::new().unwrap();
        let mut store = UciStore::new(dir.path());
        assert!(matches!(
            store.load("aria2"),
            Err(UciError::Read { .. })
        ));
    }

    #[test]
    fn test_double_quotes_and_unquoted_values() {
        let (_dir, mut store) =
            store_with("aria2", "config aria2\n\toption log \"/var/log/a b.log\"\n\toption enabled 1\n");
        store.load("aria2").unwrap();
        assert_eq!(
            store.get_first("aria2", "aria2", "log"),
            Some("/var/log/a b.log")
        );
        assert_eq!(store.get_first("aria2", "aria2", "enabled"), Some("1"));
    }

    #[test]
    fn test_option_outside_section_is_parse_error() {
        let (_dir, mut store) = store_with("aria2", "option log '/var/log/aria2.log'\n");
        assert!(matches!(
            store.load("aria2"),
            Err(UciError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_unterminated_quote_is_parse_error() {
        let (_dir, mut store) = store_with("aria2", "config aria2\n\toption log '/broken\n");
        assert!(matches!(store.load("aria2"), Err(UciError::Parse { .. })));
    }

    #[test]
    fn test_session_unloads_on_drop() {
        let (_dir, mut store) = store_with("aria2", ARIA2_CONFIG);
        {
            let session = store.session("aria2").unwrap();
            assert_eq!(
                session.get_first("aria2", "log"),
                Some("/var/log/aria2.log")
            );
        }
        assert!(!store.is_loaded("aria2"));
    }

    #[test]
    fn test_reload_is_noop() {
        let (_dir, mut store) = store_with("aria2", ARIA2_CONFIG);
        store.load("aria2").unwrap();
        store.load("aria2").unwrap();
        assert!(store.is_loaded("aria2"));
    }
}
