//! User config - the tools a user wants configured

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::parameter::{UserParam, scalar_string};

/// One requested tool instance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserTool {
    /// Join key against [`SystemTool::tool_type`](super::SystemTool)
    #[serde(rename = "type", deserialize_with = "scalar_string")]
    pub tool_type: String,
    #[serde(alias = "parameters")]
    pub params: Vec<UserParam>,
}

impl UserTool {
    /// Create a user tool request with no parameters
    pub fn new(tool_type: impl Into<String>) -> Self {
        Self {
            tool_type: tool_type.into(),
            params: Vec::new(),
        }
    }

    /// Append a parameter
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push(UserParam::new(name, value));
        self
    }

    /// Name to value lookup used for template rendering
    ///
    /// Parameters are inserted in declaration order, so a repeated name keeps
    /// its last value.
    pub fn param_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::with_capacity(self.params.len());
        for param in &self.params {
            map.insert(param.name.clone(), param.value().to_string());
        }
        map
    }
}

/// The full user-facing request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    #[serde(deserialize_with = "scalar_string")]
    pub name: String,
    pub tools: Vec<UserTool>,
}

impl UserConfig {
    /// Create an empty user config
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tools: Vec::new(),
        }
    }

    /// Append a tool request
    pub fn with_tool(mut self, tool: UserTool) -> Self {
        self.tools.push(tool);
        self
    }
}
