use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A stored, named template source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub tenant_id: String,
    pub name: String,
    pub language: String,
    pub content: String,
    pub description: String,
    pub group: String,
}

/// Start/Body/End template chain describing one generated file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileTemplate {
    pub id: String,
    pub name: String,
    pub dir: String,
    pub package: String,
    pub start: String,
    pub end: String,
    pub body: Vec<String>,
    pub params: String,
    pub language: String,
    pub group: String,
    /// Appended to the file stem as `_{suffix}`.
    pub file_name_suffix: String,
}

/// A named bundle of file templates producing several files per Metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FunctionalTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub params: String,
    pub language: String,
    pub group: String,
    pub file_template_ids: Vec<String>,
}

/// Output language of a file template; determines the file extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Language {
    Golang,
    ProtocolBuffer,
    Json,
    Yaml,
    Typescript,
    Java,
    Properties,
    Sql,
    Vue,
    React,
    Other(String),
}

impl Language {
    /// File extension including the dot, empty for unknown languages.
    pub fn extension(&self) -> &'static str {
        match self {
            Language::Golang => ".go",
            Language::ProtocolBuffer => ".proto",
            Language::Json => ".json",
            Language::Yaml => ".yaml",
            Language::Typescript => ".ts",
            Language::Java => ".java",
            Language::Properties => ".properties",
            Language::Sql => ".sql",
            Language::Vue => ".vue",
            Language::React => ".tsx",
            Language::Other(_) => "",
        }
    }
}

impl FromStr for Language {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Golang" => Language::Golang,
            "ProtocolBuffer" => Language::ProtocolBuffer,
            "JSON" => Language::Json,
            "YAML" => Language::Yaml,
            "Typescript" => Language::Typescript,
            "Java" => Language::Java,
            "Properties" => Language::Properties,
            "Sql" => Language::Sql,
            "Vue" => Language::Vue,
            "React" => Language::React,
            other => Language::Other(other.to_string()),
        })
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Language::Golang => "Golang",
            Language::ProtocolBuffer => "ProtocolBuffer",
            Language::Json => "JSON",
            Language::Yaml => "YAML",
            Language::Typescript => "Typescript",
            Language::Java => "Java",
            Language::Properties => "Properties",
            Language::Sql => "Sql",
            Language::Vue => "Vue",
            Language::React => "React",
            Language::Other(other) => other,
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_extensions() {
        let cases = [
            ("Golang", ".go"),
            ("ProtocolBuffer", ".proto"),
            ("JSON", ".json"),
            ("YAML", ".yaml"),
            ("Typescript", ".ts"),
            ("Java", ".java"),
            ("Properties", ".properties"),
            ("Sql", ".sql"),
            ("Vue", ".vue"),
            ("React", ".tsx"),
            ("Cobol", ""),
            ("", ""),
        ];
        for (name, ext) in cases {
            let lang: Language = name.parse().unwrap();
            assert_eq!(lang.extension(), ext, "{name}");
            assert_eq!(lang.to_string(), name);
        }
    }
}
