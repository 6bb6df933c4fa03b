use serde::{Deserialize, Serialize};
use std::fmt;

/// An argument passed to the native build tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BuildArgument {
    /// SDK to build against
    Sdk { name: String },
    /// Build configuration to use
    Configuration { name: String },
    /// A raw `KEY=VALUE` build setting override
    Xcarg { key: String, value: String },
}

impl BuildArgument {
    pub fn sdk(name: impl Into<String>) -> Self {
        BuildArgument::Sdk { name: name.into() }
    }

    pub fn configuration(name: impl Into<String>) -> Self {
        BuildArgument::Configuration { name: name.into() }
    }

    pub fn xcarg(key: impl Into<String>, value: impl Into<String>) -> Self {
        BuildArgument::Xcarg {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Command line words for this argument
    pub fn arguments(&self) -> Vec<String> {
        match self {
            BuildArgument::Sdk { name } => vec!["-sdk".to_string(), name.clone()],
            BuildArgument::Configuration { name } => {
                vec!["-configuration".to_string(), name.clone()]
            }
            BuildArgument::Xcarg { key, value } => vec![format!("{key}={value}")],
        }
    }
}

/// Renders the argument as POSIX shell words
impl fmt::Display for BuildArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words: Vec<String> = self
            .arguments()
            .into_iter()
            .map(|word| {
                if word.is_empty()
                    || word.ends_with('=')
                    || word.contains([' ', '\'', '"', '$', '\\'])
                {
                    format!("'{}'", word.replace('\'', "'\\''"))
                } else {
                    word
                }
            })
            .collect();
        write!(f, "{}", words.join(" "))
    }
}

/// Flattens arguments into the words passed to the build tool
pub fn to_command_line(arguments: &[BuildArgument]) -> Vec<String> {
    arguments.iter().flat_map(BuildArgument::arguments).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arguments() {
        assert_eq!(
            BuildArgument::sdk("iphonesimulator").arguments(),
            vec!["-sdk", "iphonesimulator"]
        );
        assert_eq!(
            BuildArgument::configuration("Release").arguments(),
            vec!["-configuration", "Release"]
        );
        assert_eq!(
            BuildArgument::xcarg("CODE_SIGN_IDENTITY", "").arguments(),
            vec!["CODE_SIGN_IDENTITY="]
        );
    }

    #[test]
    fn test_display_quotes_empty_values() {
        assert_eq!(
            BuildArgument::xcarg("CODE_SIGN_IDENTITY", "").to_string(),
            "'CODE_SIGN_IDENTITY='"
        );
        assert_eq!(
            BuildArgument::xcarg("CODE_SIGNING_ALLOWED", "NO").to_string(),
            "CODE_SIGNING_ALLOWED=NO"
        );
        assert_eq!(BuildArgument::sdk("macosx").to_string(), "-sdk macosx");
    }

    #[test]
    fn test_display_escapes_single_quotes() {
        assert_eq!(
            BuildArgument::configuration("Tom's Debug").to_string(),
            "-configuration 'Tom'\\''s Debug'"
        );
        assert_eq!(
            BuildArgument::xcarg("OTHER_FLAGS", "$(inherited)").to_string(),
            "'OTHER_FLAGS=$(inherited)'"
        );
    }

    #[test]
    fn test_to_command_line() {
        let words = to_command_line(&[
            BuildArgument::sdk("macosx"),
            BuildArgument::configuration("Debug"),
        ]);
        assert_eq!(words, vec!["-sdk", "macosx", "-configuration", "Debug"]);
    }
}
