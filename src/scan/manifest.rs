//! Package-name extraction from Python manifests

use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

pub const REQUIREMENTS_FILE: &str = "requirements.txt";
pub const PYPROJECT_FILE: &str = "pyproject.toml";

/// Cuts a requirement string down to its bare package name.
///
/// Everything from the first version operator (`=`, `<`, `>`, `!`) onwards is
/// dropped, along with extras, environment markers and `~=` specifiers.
pub fn strip_version_specifier(requirement: &str) -> &str {
    let end = requirement
        .find(|c: char| matches!(c, '=' | '<' | '>' | '!' | '~' | '[' | ';') || c.is_whitespace())
        .unwrap_or(requirement.len());
    requirement[..end].trim()
}

pub fn parse_requirements(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('-'))
        .map(strip_version_specifier)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn parse_pyproject(content: &str) -> Vec<String> {
    match content.parse::<toml::Table>() {
        Ok(table) => pyproject_dependencies(&table),
        Err(e) => {
            debug!(error = %e, "pyproject.toml is not valid TOML, scanning quoted strings");
            quoted_requirements(content)
        }
    }
}

fn pyproject_dependencies(table: &toml::Table) -> Vec<String> {
    let mut requirements: Vec<String> = Vec::new();

    if let Some(project) = table.get("project").and_then(|v| v.as_table()) {
        if let Some(deps) = project.get("dependencies").and_then(|v| v.as_array()) {
            requirements.extend(deps.iter().filter_map(|d| d.as_str()).map(str::to_string));
        }
        if let Some(optional) = project
            .get("optional-dependencies")
            .and_then(|v| v.as_table())
        {
            for group in optional.values().filter_map(|v| v.as_array()) {
                requirements.extend(group.iter().filter_map(|d| d.as_str()).map(str::to_string));
            }
        }
    }

    if let Some(poetry) = table
        .get("tool")
        .and_then(|v| v.get("poetry"))
        .and_then(|v| v.as_table())
    {
        if let Some(deps) = poetry.get("dependencies").and_then(|v| v.as_table()) {
            requirements.extend(deps.keys().cloned());
        }
        if let Some(groups) = poetry.get("group").and_then(|v| v.as_table()) {
            for group in groups.values() {
                if let Some(deps) = group.get("dependencies").and_then(|v| v.as_table()) {
                    requirements.extend(deps.keys().cloned());
                }
            }
        }
    }

    requirements
        .iter()
        .map(|r| strip_version_specifier(r))
        .filter(|name| is_package_name(name))
        .map(str::to_string)
        .collect()
}

fn quoted_requirements(content: &str) -> Vec<String> {
    static QUOTED: OnceLock<Regex> = OnceLock::new();
    let quoted = QUOTED.get_or_init(|| Regex::new(r#""([^"]+)""#).expect("valid regex"));

    quoted
        .captures_iter(content)
        .filter_map(|cap| cap.get(1))
        .map(|m| strip_version_specifier(m.as_str()))
        .filter(|name| is_package_name(name))
        .map(str::to_string)
        .collect()
}

fn is_package_name(name: &str) -> bool {
    !name.is_empty() && !name.starts_with("python")
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        pinned = { "openai==1.3.0", "openai" },
        lower_bound = { "langchain>=0.1", "langchain" },
        exclusion = { "numpy!=1.25", "numpy" },
        compatible = { "chromadb~=0.4", "chromadb" },
        extras = { "fastapi[all]>=0.100", "fastapi" },
        marker = { "uvloop; sys_platform != 'win32'", "uvloop" },
        bare = { "pinecone-client", "pinecone-client" },
        spaced = { "torch >= 2.0", "torch" },
    )]
    fn test_strip_version_specifier(input: &str, expected: &str) {
        assert_eq!(strip_version_specifier(input), expected);
    }

    #[test]
    fn test_parse_requirements_skips_comments_and_options() {
        let content = "# core\nopenai==1.3.0\n\n-r dev.txt\nlangchain>=0.1\n  chromadb  \n";
        assert_eq!(
            parse_requirements(content),
            vec!["openai", "langchain", "chromadb"]
        );
    }

    #[test]
    fn test_parse_pyproject_pep621() {
        let content = r#"
[project]
name = "rag-bot"
requires-python = ">=3.10"
dependencies = ["openai>=1.0", "llama-index==0.9.1"]

[project.optional-dependencies]
dev = ["pytest>=7"]
"#;
        assert_eq!(
            parse_pyproject(content),
            vec!["openai", "llama-index", "pytest"]
        );
    }

    #[test]
    fn test_parse_pyproject_poetry() {
        let content = r#"
[tool.poetry.dependencies]
python = "^3.11"
anthropic = "^0.7"

[tool.poetry.group.dev.dependencies]
ruff = "*"
"#;
        assert_eq!(parse_pyproject(content), vec!["anthropic", "ruff"]);
    }

    #[test]
    fn test_parse_pyproject_invalid_toml_falls_back() {
        let content = "dependencies = [\"qdrant-client>=1.6\", \"python-dotenv\"\n";
        assert_eq!(parse_pyproject(content), vec!["qdrant-client"]);
    }
}
