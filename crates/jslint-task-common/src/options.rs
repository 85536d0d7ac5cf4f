use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Which linter dialect to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinterVariant {
    #[default]
    JsLint,
    JsHint,
}

impl LinterVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinterVariant::JsLint => "jslint",
            LinterVariant::JsHint => "jshint",
        }
    }
}

impl std::fmt::Display for LinterVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LinterVariant {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let s = String::deserialize(deserializer)?;
        match s.to_ascii_lowercase().as_str() {
            "jslint" => Ok(LinterVariant::JsLint),
            "jshint" => Ok(LinterVariant::JsHint),
            _ => Err(D::Error::custom(format!(
                "invalid linter variant '{}', expected 'jslint' or 'jshint'",
                s
            ))),
        }
    }
}

/// Options handed to the linter on every call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LintOptions {
    #[serde(default)]
    pub variant: LinterVariant,
    /// Free-form option flags understood by the selected variant
    #[serde(default)]
    pub options: Map<String, Value>,
}

impl LintOptions {
    pub fn new(variant: LinterVariant) -> Self {
        Self {
            variant,
            options: Map::new(),
        }
    }

    pub fn with_option(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.options.insert(name.to_string(), value.into());
        self
    }

    /// Option flags encoded as a JSON object
    pub fn options_json(&self) -> String {
        Value::Object(self.options.clone()).to_string()
    }
}
