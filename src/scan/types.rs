use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Where a dependency name was learned from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum DependencySource {
    /// Declared in a manifest such as `requirements.txt`
    Manifest { file: String },
    /// Only seen as an import statement
    Import,
}

impl DependencySource {
    pub fn is_manifest(&self) -> bool {
        matches!(self, DependencySource::Manifest { .. })
    }
}

/// A source file that was parsed successfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub content: String,
    pub lines: usize,
}

/// A source file the scanner could not parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    pub path: String,
    pub reason: String,
}

/// Result of parsing one file. Failures are values, not errors, so the scan can
/// keep going and still account for what it skipped.
#[derive(Debug, Clone)]
pub enum FileOutcome {
    Parsed {
        path: String,
        file: SourceFile,
        imports: Vec<String>,
    },
    Skipped(SkippedFile),
}

/// Structural summary of a scanned codebase. Paths are relative to `root` and use
/// `/` as separator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanResult {
    pub root: PathBuf,
    pub files: BTreeSet<String>,
    pub imports: BTreeSet<String>,
    pub dependencies: BTreeMap<String, DependencySource>,
    pub sources: BTreeMap<String, SourceFile>,
    pub skipped: Vec<SkippedFile>,
}

impl ScanResult {
    /// Every known library name: imports plus declared dependencies, deduplicated.
    pub fn library_names(&self) -> BTreeSet<&str> {
        self.imports
            .iter()
            .map(String::as_str)
            .chain(self.dependencies.keys().map(String::as_str))
            .collect()
    }

    pub fn total_lines(&self) -> usize {
        self.sources.values().map(|f| f.lines).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_names_union() {
        let mut scan = ScanResult::default();
        scan.imports.insert("openai".to_string());
        scan.imports.insert("os".to_string());
        scan.dependencies.insert(
            "openai".to_string(),
            DependencySource::Manifest {
                file: "requirements.txt".to_string(),
            },
        );
        scan.dependencies
            .insert("chromadb".to_string(), DependencySource::Import);

        let names: Vec<&str> = scan.library_names().into_iter().collect();
        assert_eq!(names, vec!["chromadb", "openai", "os"]);
    }

    #[test]
    fn test_dependency_source_serialization() {
        let json = serde_json::to_string(&DependencySource::Manifest {
            file: "pyproject.toml".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"source":"manifest","file":"pyproject.toml"}"#);

        let json = serde_json::to_string(&DependencySource::Import).unwrap();
        assert_eq!(json, r#"{"source":"import"}"#);
    }
}
