//! Command Resolver - match user tools to catalog entries and render commands
//!
//! Every (user tool, catalog entry) pair with equal `type` yields one command
//! line, in user declaration order and then catalog declaration order. A user
//! tool without a match yields nothing.

use std::fmt;
use std::io::Write;

use crate::error::Result;
use crate::model::{SystemConfig, SystemTool, UserConfig, UserTool};
use crate::render::ArgsRenderer;

/// A rendered command line and the entry it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommand {
    /// Catalog entry name
    pub tool_name: String,
    /// Matched type
    pub tool_type: String,
    /// `<path> <rendered args>`
    pub line: String,
}

impl fmt::Display for ResolvedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line)
    }
}

/// Resolves a user config against a tool catalog
pub struct CommandResolver<'a> {
    user: &'a UserConfig,
    catalog: &'a SystemConfig,
    renderer: ArgsRenderer,
}

impl<'a> CommandResolver<'a> {
    /// Create a resolver over loaded documents
    pub fn new(user: &'a UserConfig, catalog: &'a SystemConfig) -> Self {
        Self {
            user,
            catalog,
            renderer: ArgsRenderer::new(),
        }
    }

    /// All matching pairs, user order first, catalog order second
    pub fn matches(&self) -> impl Iterator<Item = (&'a UserTool, &'a SystemTool)> + 'a {
        let catalog = self.catalog;
        let user = self.user;
        user.tools.iter().flat_map(move |user_tool| {
            let mut found = catalog.by_type(&user_tool.tool_type).peekable();
            if found.peek().is_none() {
                log::debug!("No catalog entry for tool type '{}'", user_tool.tool_type);
            }
            found.map(move |system_tool| (user_tool, system_tool))
        })
    }

    /// Render one matched pair
    pub fn render(&self, user_tool: &UserTool, system_tool: &SystemTool) -> Result<ResolvedCommand> {
        let params = user_tool.param_map();

        for required in system_tool.required_parameters() {
            if !params.contains_key(required) {
                log::warn!(
                    "Tool '{}' declares required parameter '{}' but the '{}' request does not set it",
                    system_tool.name,
                    required,
                    user_tool.tool_type
                );
            }
        }

        let args = self
            .renderer
            .render(&system_tool.name, &system_tool.action.args_template, &params)?;

        log::debug!("Matched '{}' to catalog entry '{}'", user_tool.tool_type, system_tool.name);
        Ok(ResolvedCommand {
            tool_name: system_tool.name.clone(),
            tool_type: system_tool.tool_type.clone(),
            line: format!("{} {}", system_tool.action.path, args),
        })
    }

    /// Lazily render every match; stop consuming at the first error
    pub fn commands(&self) -> impl Iterator<Item = Result<ResolvedCommand>> + '_ {
        self.matches().map(move |(user_tool, system_tool)| self.render(user_tool, system_tool))
    }

    /// Render and write each line as soon as it is ready
    ///
    /// Lines written before a failure stay written. Returns the line count.
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<usize> {
        let mut written = 0;
        for command in self.commands() {
            let command = command?;
            writeln!(out, "{}", command)?;
            out.flush()?;
            written += 1;
        }
        log::info!("Resolved {} command(s) for '{}'", written, self.user.name);
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CmdgenError;

    fn gofmt_catalog() -> SystemConfig {
        SystemConfig::new(vec![SystemTool::new("gofmt", "fmt", "gofmt", "-w {{.file}}")])
    }

    fn lines(user: &UserConfig, catalog: &SystemConfig) -> Vec<String> {
        CommandResolver::new(user, catalog)
            .commands()
            .map(|c| c.unwrap().line)
            .collect()
    }

    #[test]
    fn test_single_match() {
        let user = UserConfig::new("a").with_tool(UserTool::new("fmt").with_param("file", "x.go"));
        assert_eq!(lines(&user, &gofmt_catalog()), vec!["gofmt -w x.go"]);
    }

    #[test]
    fn test_shared_type_expands_in_catalog_order() {
        let catalog = SystemConfig::new(vec![
            SystemTool::new("golangci", "lint", "golangci-lint", "run"),
            SystemTool::new("gofmt", "fmt", "gofmt", "-l ."),
            SystemTool::new("staticcheck", "lint", "staticcheck", "./..."),
        ]);
        let user = UserConfig::new("a").with_tool(UserTool::new("lint"));
        assert_eq!(
            lines(&user, &catalog),
            vec!["golangci-lint run", "staticcheck ./..."]
        );
    }

    #[test]
    fn test_no_match_is_silent() {
        let user = UserConfig::new("a").with_tool(UserTool::new("deploy"));
        let catalog = gofmt_catalog();
        let resolver = CommandResolver::new(&user, &catalog);
        assert_eq!(resolver.matches().count(), 0);
        assert!(lines(&user, &catalog).is_empty());
    }

    #[test]
    fn test_type_match_is_case_sensitive() {
        let user = UserConfig::new("a").with_tool(UserTool::new("FMT"));
        assert!(lines(&user, &gofmt_catalog()).is_empty());
    }

    #[test]
    fn test_order_is_user_then_catalog() {
        let catalog = SystemConfig::new(vec![
            SystemTool::new("b1", "b", "b1", "{{.n}}"),
            SystemTool::new("a1", "a", "a1", "{{.n}}"),
            SystemTool::new("b2", "b", "b2", "{{.n}}"),
        ]);
        let user = UserConfig::new("a")
            .with_tool(UserTool::new("b").with_param("n", "1"))
            .with_tool(UserTool::new("a").with_param("n", "2"))
            .with_tool(UserTool::new("b").with_param("n", "3"));
        assert_eq!(
            lines(&user, &catalog),
            vec!["b1 1", "b2 1", "a1 2", "b1 3", "b2 3"]
        );
    }

    #[test]
    fn test_line_count_is_sum_of_matches() {
        let catalog = SystemConfig::new(vec![
            SystemTool::new("x1", "x", "x1", ""),
            SystemTool::new("x2", "x", "x2", ""),
            SystemTool::new("y1", "y", "y1", ""),
        ]);
        let user = UserConfig::new("a")
            .with_tool(UserTool::new("x"))
            .with_tool(UserTool::new("y"))
            .with_tool(UserTool::new("z"))
            .with_tool(UserTool::new("x"));
        assert_eq!(lines(&user, &catalog).len(), 2 + 1 + 0 + 2);
    }

    #[test]
    fn test_duplicate_param_last_wins() {
        let user = UserConfig::new("a").with_tool(
            UserTool::new("fmt")
                .with_param("file", "a.go")
                .with_param("file", "b.go"),
        );
        assert_eq!(lines(&user, &gofmt_catalog()), vec!["gofmt -w b.go"]);
    }

    #[test]
    fn test_empty_args_keeps_separator() {
        let catalog = SystemConfig::new(vec![SystemTool::new("ls", "list", "ls", "")]);
        let user = UserConfig::new("a").with_tool(UserTool::new("list"));
        assert_eq!(lines(&user, &catalog), vec!["ls "]);
    }

    #[test]
    fn test_missing_required_param_still_renders() {
        let catalog = SystemConfig::new(vec![
            SystemTool::new("gofmt", "fmt", "gofmt", "-w {{.file}}").with_parameter("file", true),
        ]);
        let user = UserConfig::new("a").with_tool(UserTool::new("fmt"));
        assert_eq!(lines(&user, &catalog), vec!["gofmt -w "]);
    }

    #[test]
    fn test_resolved_command_fields() {
        let user = UserConfig::new("a").with_tool(UserTool::new("fmt").with_param("file", "x.go"));
        let catalog = gofmt_catalog();
        let resolver = CommandResolver::new(&user, &catalog);
        let command = resolver.commands().next().unwrap().unwrap();
        assert_eq!(command.tool_name, "gofmt");
        assert_eq!(command.tool_type, "fmt");
        assert_eq!(command.to_string(), "gofmt -w x.go");
    }

    #[test]
    fn test_write_to_streams_lines() {
        let catalog = SystemConfig::new(vec![
            SystemTool::new("golangci", "lint", "golangci-lint", "run"),
            SystemTool::new("staticcheck", "lint", "staticcheck", "./..."),
        ]);
        let user = UserConfig::new("a").with_tool(UserTool::new("lint"));
        let resolver = CommandResolver::new(&user, &catalog);

        let mut out = Vec::new();
        let written = resolver.write_to(&mut out).unwrap();
        assert_eq!(written, 2);
        assert_eq!(String::from_utf8(out).unwrap(), "golangci-lint run\nstaticcheck ./...\n");
    }

    #[test]
    fn test_write_to_keeps_partial_output_on_failure() {
        let catalog = SystemConfig::new(vec![
            SystemTool::new("good", "t", "good", "ok"),
            SystemTool::new("bad", "t", "bad", "{{#if x}}unclosed"),
            SystemTool::new("never", "t", "never", "reached"),
        ]);
        let user = UserConfig::new("a").with_tool(UserTool::new("t"));
        let resolver = CommandResolver::new(&user, &catalog);

        let mut out = Vec::new();
        let result = resolver.write_to(&mut out);
        match result {
            Err(CmdgenError::TemplateSyntax { tool, .. }) => assert_eq!(tool, "bad"),
            other => panic!("expected TemplateSyntax, got {:?}", other),
        }
        assert_eq!(String::from_utf8(out).unwrap(), "good ok\n");
    }

    #[test]
    fn test_execution_error_stops_processing() {
        let catalog = SystemConfig::new(vec![SystemTool::new("shouty", "t", "echo", "{{shout .x}}")]);
        let user = UserConfig::new("a")
            .with_tool(UserTool::new("t").with_param("x", "1"))
            .with_tool(UserTool::new("t").with_param("x", "2"));
        let resolver = CommandResolver::new(&user, &catalog);

        let mut out = Vec::new();
        let result = resolver.write_to(&mut out);
        assert!(matches!(result, Err(CmdgenError::TemplateExecution { .. })));
        assert!(out.is_empty());
    }
}
