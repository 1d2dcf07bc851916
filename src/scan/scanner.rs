use super::manifest::{self, PYPROJECT_FILE, REQUIREMENTS_FILE};
use super::types::{DependencySource, FileOutcome, ScanResult, SkippedFile, SourceFile};
use ast_grep_core::{Doc, Node};
use ast_grep_language::{LanguageExt, SupportLang};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

const EXCLUDED_DIRS: &[&str] = &[
    ".git",
    ".venv",
    "venv",
    "env",
    "__pycache__",
    "node_modules",
    "site-packages",
    ".tox",
    ".mypy_cache",
];

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Source root does not exist: {0}")]
    NotFound(PathBuf),

    #[error("Source root is not a directory: {0}")]
    NotADirectory(PathBuf),
}

#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub max_depth: usize,
    pub max_files: usize,
    pub max_file_size: u64,
    /// Extension (without dot) of the source files to parse
    pub extension: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_depth: 20,
            max_files: 5000,
            max_file_size: 1024 * 1024,
            extension: "py".to_string(),
        }
    }
}

impl ScanConfig {
    pub fn with_max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }

    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }
}

pub struct SourceScanner {
    root: PathBuf,
    config: ScanConfig,
}

impl SourceScanner {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, ScanError> {
        let root = root.into();
        if !root.exists() {
            return Err(ScanError::NotFound(root));
        }
        if !root.is_dir() {
            return Err(ScanError::NotADirectory(root));
        }

        Ok(Self {
            root,
            config: ScanConfig::default(),
        })
    }

    pub fn with_config(mut self, config: ScanConfig) -> Self {
        self.config = config;
        self
    }

    pub fn scan(&self) -> ScanResult {
        let start = Instant::now();
        let mut result = ScanResult {
            root: self.root.clone(),
            ..Default::default()
        };

        for path in self.source_files() {
            let rel_path = self.relative(&path);
            result.files.insert(rel_path.clone());

            match self.parse_file(&path, rel_path) {
                FileOutcome::Parsed {
                    path,
                    file,
                    imports,
                } => {
                    result.imports.extend(imports);
                    result.sources.insert(path, file);
                }
                FileOutcome::Skipped(skipped) => {
                    debug!(path = %skipped.path, reason = %skipped.reason, "Skipping file");
                    result.skipped.push(skipped);
                }
            }
        }

        self.collect_manifest_dependencies(&mut result);

        for import in &result.imports {
            result
                .dependencies
                .entry(import.clone())
                .or_insert(DependencySource::Import);
        }

        info!(
            files = result.files.len(),
            parsed = result.sources.len(),
            skipped = result.skipped.len(),
            imports = result.imports.len(),
            dependencies = result.dependencies.len(),
            scan_time_ms = start.elapsed().as_millis() as u64,
            "Source scan completed"
        );

        result
    }

    fn source_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        let walker = WalkBuilder::new(&self.root)
            .max_depth(Some(self.config.max_depth))
            .hidden(false)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .ignore(false)
            .parents(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(|entry| {
                let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
                let name = entry.file_name().to_str().unwrap_or_default();
                !(is_dir && entry.depth() > 0 && EXCLUDED_DIRS.contains(&name))
            })
            .build();

        for result in walker {
            let entry = match result {
                Ok(e) => e,
                Err(err) => {
                    warn!(error = %err, "Failed to read directory entry");
                    continue;
                }
            };

            let path = entry.path();
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(self.config.extension.as_str())
            {
                continue;
            }

            if files.len() >= self.config.max_files {
                warn!(
                    max_files = self.config.max_files,
                    "Reached file limit, stopping scan"
                );
                break;
            }
            files.push(path.to_path_buf());
        }

        files
    }

    fn parse_file(&self, path: &Path, rel_path: String) -> FileOutcome {
        let skip = |reason: String| {
            FileOutcome::Skipped(SkippedFile {
                path: rel_path.clone(),
                reason,
            })
        };

        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > self.config.max_file_size => {
                return skip(format!(
                    "file size {} exceeds limit of {} bytes",
                    meta.len(),
                    self.config.max_file_size
                ));
            }
            Ok(_) => {}
            Err(e) => return skip(format!("unreadable: {}", e)),
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => return skip(format!("not valid UTF-8 text: {}", e)),
        };

        match parse_imports(&content) {
            Ok(imports) => FileOutcome::Parsed {
                file: SourceFile {
                    lines: content.split('\n').count(),
                    content,
                },
                imports,
                path: rel_path.clone(),
            },
            Err(reason) => skip(reason),
        }
    }

    fn collect_manifest_dependencies(&self, result: &mut ScanResult) {
        let manifests: [(&str, fn(&str) -> Vec<String>); 2] = [
            (REQUIREMENTS_FILE, manifest::parse_requirements),
            (PYPROJECT_FILE, manifest::parse_pyproject),
        ];

        for (file_name, parse) in manifests {
            let path = self.root.join(file_name);
            if !path.is_file() {
                continue;
            }

            let content = match std::fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    warn!(manifest = file_name, error = %e, "Failed to read manifest");
                    continue;
                }
            };

            let packages = parse(&content);
            debug!(manifest = file_name, packages = packages.len(), "Parsed manifest");

            for package in packages {
                result.dependencies.insert(
                    package,
                    DependencySource::Manifest {
                        file: file_name.to_string(),
                    },
                );
            }
        }
    }

    fn relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Extracts the root module of every import statement in a Python source file.
///
/// The source is parsed into a syntax tree, so imports mentioned in strings or
/// comments are ignored. Binary content and files with syntax errors are
/// rejected so the caller can skip them.
pub fn parse_imports(content: &str) -> Result<Vec<String>, String> {
    if content.contains('\0') {
        return Err("binary content".to_string());
    }

    let grep = SupportLang::Python.ast_grep(content);
    let mut imports = Vec::new();
    let mut stack = vec![grep.root()];

    while let Some(node) = stack.pop() {
        match node.kind().as_ref() {
            "ERROR" => {
                let line = node.start_pos().line() + 1;
                return Err(format!("invalid Python syntax near line {}", line));
            }
            "import_statement" => {
                imports.extend(node.children().filter_map(|child| imported_root(&child)));
            }
            "import_from_statement" => {
                if let Some(root) = node.field("module_name").and_then(|m| from_module_root(&m)) {
                    imports.push(root);
                }
            }
            _ => {
                let children: Vec<_> = node.children().collect();
                stack.extend(children.into_iter().rev());
            }
        }
    }

    Ok(imports)
}

/// `import a.b` or `import a.b as c`
fn imported_root<D: Doc>(node: &Node<D>) -> Option<String> {
    match node.kind().as_ref() {
        "dotted_name" => module_root(&node.text()),
        "aliased_import" => node.field("name").and_then(|n| module_root(&n.text())),
        _ => None,
    }
}

/// `from a.b import c` yields `a`; `from .a import c` yields `a`; `from . import c` yields nothing.
fn from_module_root<D: Doc>(module: &Node<D>) -> Option<String> {
    match module.kind().as_ref() {
        "dotted_name" => module_root(&module.text()),
        "relative_import" => module
            .children()
            .find(|child| child.kind().as_ref() == "dotted_name")
            .and_then(|name| module_root(&name.text())),
        _ => None,
    }
}

fn module_root(module: &str) -> Option<String> {
    let root = module.trim().trim_start_matches('.').split('.').next()?;
    let valid = root
        .chars()
        .next()
        .map(|c| c.is_alphabetic() || c == '_')
        .unwrap_or(false)
        && root.chars().all(|c| c.is_alphanumeric() || c == '_');

    valid.then(|| root.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_codebase() -> TempDir {
        let dir = TempDir::new().unwrap();
        let base = dir.path();

        fs::write(
            base.join("requirements.txt"),
            "openai==1.3.0\nchromadb>=0.4\n",
        )
        .unwrap();
        fs::create_dir_all(base.join("app/retrieval")).unwrap();
        fs::write(
            base.join("app/main.py"),
            "import os\nfrom openai import OpenAI\nimport numpy as np, pandas\n",
        )
        .unwrap();
        fs::write(
            base.join("app/retrieval/search.py"),
            "from langchain.vectorstores import Chroma\nfrom . import utils\n",
        )
        .unwrap();

        fs::create_dir_all(base.join(".venv/lib")).unwrap();
        fs::write(base.join(".venv/lib/ignored.py"), "import torch\n").unwrap();

        dir
    }

    #[test]
    fn test_scan_collects_files_and_imports() {
        let dir = create_test_codebase();
        let scan = SourceScanner::new(dir.path()).unwrap().scan();

        assert_eq!(
            scan.files.iter().cloned().collect::<Vec<_>>(),
            vec!["app/main.py", "app/retrieval/search.py"]
        );
        for expected in ["os", "openai", "numpy", "pandas", "langchain"] {
            assert!(scan.imports.contains(expected), "missing {}", expected);
        }
        assert!(!scan.imports.contains("torch"));
        assert_eq!(scan.sources["app/main.py"].lines, 4);
    }

    #[test]
    fn test_manifest_provenance_wins_over_import() {
        let dir = create_test_codebase();
        let scan = SourceScanner::new(dir.path()).unwrap().scan();

        assert_eq!(
            scan.dependencies["openai"],
            DependencySource::Manifest {
                file: "requirements.txt".to_string()
            }
        );
        assert_eq!(scan.dependencies["langchain"], DependencySource::Import);
        assert!(scan.dependencies["chromadb"].is_manifest());
    }

    #[test]
    fn test_unparseable_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("good.py"), "import anthropic\n").unwrap();
        fs::write(dir.path().join("bad.py"), [0xff, 0xfe, 0x00, 0x01]).unwrap();

        let scan = SourceScanner::new(dir.path()).unwrap().scan();

        assert_eq!(scan.files.len(), 2);
        assert_eq!(scan.sources.len(), 1);
        assert_eq!(scan.skipped.len(), 1);
        assert_eq!(scan.skipped[0].path, "bad.py");
        assert!(scan.imports.contains("anthropic"));
    }

    #[test]
    fn test_oversized_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("big.py"), "x = 1\n".repeat(100)).unwrap();

        let scan = SourceScanner::new(dir.path())
            .unwrap()
            .with_config(ScanConfig::default().with_max_file_size(10))
            .scan();

        assert!(scan.sources.is_empty());
        assert!(scan.skipped[0].reason.contains("exceeds limit"));
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let result = SourceScanner::new("/nonexistent/source/root");
        assert!(matches!(result, Err(ScanError::NotFound(_))));
    }

    #[test]
    fn test_file_root_is_rejected() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("main.py");
        fs::write(&file, "print(1)").unwrap();

        let result = SourceScanner::new(&file);
        assert!(matches!(result, Err(ScanError::NotADirectory(_))));
    }

    #[test]
    fn test_parse_imports_variants() {
        let content = "\
import os.path
from langchain.chains import RetrievalQA
from .local import helper
from . import sibling
import openai, anthropic as claude

def load():
    import faiss  # inside a function
    return faiss

# import commented_out
";
        let imports = parse_imports(content).unwrap();
        assert_eq!(
            imports,
            vec!["os", "langchain", "local", "openai", "anthropic", "faiss"]
        );
    }

    #[test]
    fn test_parse_imports_ignores_strings() {
        let content = r#""""Usage:

    import anthropic
    from openai import OpenAI
"""

EXAMPLE = "import langchain"

import json
"#;
        assert_eq!(parse_imports(content).unwrap(), vec!["json"]);
    }

    #[test]
    fn test_parse_imports_rejects_syntax_errors() {
        let result = parse_imports("def broken(:\n    import anthropic\n");
        assert!(result.unwrap_err().contains("invalid Python syntax"));
    }

    #[test]
    fn test_syntax_error_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("good.py"), "import openai\n").unwrap();
        fs::write(
            dir.path().join("broken.py"),
            "def broken(:\n    import anthropic\n",
        )
        .unwrap();

        let scan = SourceScanner::new(dir.path()).unwrap().scan();

        assert_eq!(scan.files.len(), 2);
        assert_eq!(scan.sources.len(), 1);
        assert_eq!(scan.skipped.len(), 1);
        assert_eq!(scan.skipped[0].path, "broken.py");
        assert!(scan.imports.contains("openai"));
        assert!(!scan.imports.contains("anthropic"));
    }

    #[test]
    fn test_parse_imports_rejects_binary() {
        assert!(parse_imports("abc\0def").is_err());
    }
}
