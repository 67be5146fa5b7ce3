//! System tool catalog - how each tool type is invoked

use serde::{Deserialize, Serialize};

use super::parameter::{SystemParam, scalar_string};

/// Invocation details of a catalog entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemToolAction {
    /// Action kind (e.g. "exec"); carried but not interpreted
    #[serde(rename = "type", deserialize_with = "scalar_string")]
    pub action_type: String,
    /// Executable or command path, first token of the output line
    #[serde(deserialize_with = "scalar_string")]
    pub path: String,
    /// Template rendered against the user's parameter map
    #[serde(deserialize_with = "scalar_string")]
    pub args_template: String,
}

/// One catalog entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemTool {
    #[serde(deserialize_with = "scalar_string")]
    pub name: String,
    #[serde(rename = "type", deserialize_with = "scalar_string")]
    pub tool_type: String,
    #[serde(alias = "params")]
    pub parameters: Vec<SystemParam>,
    pub action: SystemToolAction,
}

impl SystemTool {
    /// Create a catalog entry with an action and no declared parameters
    pub fn new(
        name: impl Into<String>,
        tool_type: impl Into<String>,
        path: impl Into<String>,
        args_template: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            tool_type: tool_type.into(),
            parameters: Vec::new(),
            action: SystemToolAction {
                action_type: "exec".to_string(),
                path: path.into(),
                args_template: args_template.into(),
            },
        }
    }

    /// Declare a parameter
    pub fn with_parameter(mut self, name: impl Into<String>, is_required: bool) -> Self {
        self.parameters.push(SystemParam::new(name, is_required));
        self
    }

    /// Names of parameters marked `is_required`
    pub fn required_parameters(&self) -> impl Iterator<Item = &str> {
        self.parameters
            .iter()
            .filter(|p| p.is_required())
            .map(|p| p.name.as_str())
    }
}

/// Ordered catalog of system tools
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SystemConfig {
    tools: Vec<SystemTool>,
}

impl SystemConfig {
    /// Create a catalog from entries in declaration order
    pub fn new(tools: Vec<SystemTool>) -> Self {
        Self { tools }
    }

    /// All entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &SystemTool> {
        self.tools.iter()
    }

    /// Entries whose type equals `tool_type` exactly, in declaration order
    pub fn by_type<'a>(&'a self, tool_type: &'a str) -> impl Iterator<Item = &'a SystemTool> + 'a {
        self.tools.iter().filter(move |t| t.tool_type == tool_type)
    }

    /// Get number of entries
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl From<Vec<SystemTool>> for SystemConfig {
    fn from(tools: Vec<SystemTool>) -> Self {
        Self::new(tools)
    }
}
