//! Error types for cmdgen
//!
//! Centralized error handling using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// All error types that can occur while resolving commands
#[derive(Debug, Error)]
pub enum CmdgenError {
    /// Config file could not be read
    #[error("IO error reading {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid YAML or has the wrong shape
    #[error("Parse error in {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// args_template of a catalog entry does not compile
    #[error("Template syntax error in tool '{tool}'")]
    TemplateSyntax {
        tool: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// args_template compiled but failed to render
    #[error("Template execution error in tool '{tool}'")]
    TemplateExecution {
        tool: String,
        #[source]
        source: Box<handlebars::RenderError>,
    },

    /// Writing a rendered command line failed
    #[error("Failed to write command line")]
    Output(#[from] std::io::Error),
}

/// Result type alias for cmdgen operations
pub type Result<T> = std::result::Result<T, CmdgenError>;
