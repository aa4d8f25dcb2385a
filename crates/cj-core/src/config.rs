//! Job configuration documents
//!
//! A job config is a JSON document exported by the browser-side editor. It
//! fully determines how two input tables are joined, rewritten and
//! deduplicated. Shape problems (missing fields, unknown join types) are
//! rejected here, once, so the engine never has to second-guess its input.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::Path;

/// Which input table a column is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    A,
    B,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::A => write!(f, "A"),
            Source::B => write!(f, "B"),
        }
    }
}

/// Join semantics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinType {
    Inner,
    Left,
    Right,
    /// Full outer join
    Outer,
}

/// One output column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Output header name
    pub name: String,
    /// Table the value is read from
    pub source: Source,
    /// Zero-based field position within the source row
    pub index: usize,
    /// Whether the column is emitted
    #[serde(default = "default_selected")]
    pub selected: bool,
}

fn default_selected() -> bool {
    true
}

impl ColumnSpec {
    /// Create a selected column
    pub fn new(name: impl Into<String>, source: Source, index: usize) -> Self {
        Self {
            name: name.into(),
            source,
            index,
            selected: true,
        }
    }
}

/// Key positions, join type and output projection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinConfig {
    #[serde(deserialize_with = "de_index")]
    pub key_a: usize,
    #[serde(deserialize_with = "de_index")]
    pub key_b: usize,
    pub join_type: JoinType,
    #[serde(default)]
    pub columns: Vec<ColumnSpec>,
}

impl JoinConfig {
    /// Selected columns in declaration order
    pub fn selected_columns(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.columns.iter().filter(|c| c.selected)
    }
}

/// Validation toggles. An absent flag disables its check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationConfig {
    pub check_blank: bool,
    pub check_duplicate: bool,
    pub check_column_count: bool,
    pub remove_duplicates: bool,
}

/// Exact-match value substitution scoped to one column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteRule {
    /// Header name of the target column
    pub column: String,
    pub from: String,
    pub to: String,
}

impl RewriteRule {
    /// Create a new rule
    pub fn new(column: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            from: from.into(),
            to: to.into(),
        }
    }

    /// A rule without a column or a match value does nothing
    pub fn is_inert(&self) -> bool {
        self.column.is_empty() || self.from.is_empty()
    }
}

/// A complete job document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobConfig {
    /// Job name, used for the output file name and the run log
    pub name: String,
    #[serde(default = "default_file_a")]
    pub file_name_a: String,
    #[serde(default = "default_file_b")]
    pub file_name_b: String,
    #[serde(flatten)]
    pub join: JoinConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub rules: Vec<RewriteRule>,
}

fn default_file_a() -> String {
    "input_a.csv".to_string()
}

fn default_file_b() -> String {
    "input_b.csv".to_string()
}

impl JobConfig {
    /// Parse a config from a JSON string
    pub fn from_json(content: &str, source: &Path) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Error::InvalidConfig {
            path: source.to_path_buf(),
            source: e,
        })
    }

    /// Load a config file from JSON
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&content, path)
    }

    /// Save the config file to JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| Error::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// A starter config joining column 0 of both files
    pub fn template(name: impl Into<String>, file_a: impl Into<String>, file_b: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_name_a: file_a.into(),
            file_name_b: file_b.into(),
            join: JoinConfig {
                key_a: 0,
                key_b: 0,
                join_type: JoinType::Left,
                columns: vec![
                    ColumnSpec::new("id", Source::A, 0),
                    ColumnSpec::new("value_a", Source::A, 1),
                    ColumnSpec::new("value_b", Source::B, 1),
                ],
            },
            validation: ValidationConfig {
                check_blank: true,
                check_duplicate: true,
                check_column_count: true,
                remove_duplicates: false,
            },
            rules: Vec::new(),
        }
    }
}

/// Key indices are exported either as numbers or as numeric strings
fn de_index<'de, D>(deserializer: D) -> std::result::Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Index {
        Number(usize),
        Text(String),
    }

    match Index::deserialize(deserializer)? {
        Index::Number(n) => Ok(n),
        Index::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid key index '{}'", s))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"{
        "name": "customers",
        "fileNameA": "a.csv",
        "fileNameB": "b.csv",
        "keyA": "0",
        "keyB": 2,
        "joinType": "outer",
        "columns": [
            {"name": "id", "source": "A", "index": 0},
            {"name": "city", "source": "B", "index": 1, "selected": false}
        ],
        "validation": {"checkBlank": true, "removeDuplicates": true},
        "rules": [{"column": "city", "from": "NYC", "to": "New York"}]
    }"#;

    fn parse(json: &str) -> Result<JobConfig> {
        JobConfig::from_json(json, Path::new("test.json"))
    }

    #[test]
    fn test_parse_full_config() {
        let config = parse(FULL).unwrap();
        assert_eq!(config.name, "customers");
        assert_eq!(config.file_name_a, "a.csv");
        assert_eq!(config.join.key_a, 0);
        assert_eq!(config.join.key_b, 2);
        assert_eq!(config.join.join_type, JoinType::Outer);
        assert!(config.join.columns[0].selected);
        assert!(!config.join.columns[1].selected);
        assert_eq!(config.join.selected_columns().count(), 1);
        assert!(config.validation.check_blank);
        assert!(!config.validation.check_duplicate);
        assert!(config.validation.remove_duplicates);
        assert_eq!(config.rules[0], RewriteRule::new("city", "NYC", "New York"));
    }

    #[test]
    fn test_defaults_for_optional_fields() {
        let config = parse(r#"{"name": "x", "keyA": 0, "keyB": 0, "joinType": "inner"}"#).unwrap();
        assert_eq!(config.file_name_a, "input_a.csv");
        assert_eq!(config.file_name_b, "input_b.csv");
        assert_eq!(config.validation, ValidationConfig::default());
        assert!(config.rules.is_empty());
        assert!(config.join.columns.is_empty());
    }

    #[test]
    fn test_unknown_join_type_rejected() {
        let err = parse(r#"{"name": "x", "keyA": 0, "keyB": 0, "joinType": "cross"}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }

    #[test]
    fn test_missing_join_type_rejected() {
        let err = parse(r#"{"name": "x", "keyA": 0, "keyB": 0}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }

    #[test]
    fn test_missing_name_rejected() {
        let err = parse(r#"{"keyA": 0, "keyB": 0, "joinType": "left"}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }

    #[test]
    fn test_unknown_column_source_rejected() {
        let err = parse(
            r#"{"name": "x", "keyA": 0, "keyB": 0, "joinType": "left",
                "columns": [{"name": "id", "source": "C", "index": 0}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }

    #[test]
    fn test_non_numeric_key_rejected() {
        let err = parse(r#"{"name": "x", "keyA": "first", "keyB": 0, "joinType": "left"}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }

    #[test]
    fn test_partial_rule_is_inert() {
        let config = parse(
            r#"{"name": "x", "keyA": 0, "keyB": 0, "joinType": "left",
                "rules": [{"column": "city"}, {"from": "a", "to": "b"}]}"#,
        )
        .unwrap();
        assert!(config.rules.iter().all(RewriteRule::is_inert));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.json");
        let config = JobConfig::template("demo job", "left.csv", "right.csv");
        config.save(&path).unwrap();

        let loaded = JobConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let err = JobConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound(_)));
    }
}
