//! External command templates
//!
//! Commands are configured as shell-like strings (`makoctl invoke -n {id} {action}`),
//! split into words once, and expanded per call. Placeholders are replaced
//! inside already-split words, so a substituted value is always exactly one
//! argument no matter what characters it contains.

use serde::{Deserialize, Deserializer};
use std::fmt;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use crate::error::{Error, Result};

/// Placeholder for the target notification id
pub const ID_PLACEHOLDER: &str = "{id}";

/// Placeholder for the action being invoked
pub const ACTION_PLACEHOLDER: &str = "{action}";

/// A program and its argument template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
}

impl CommandSpec {
    /// Parse a command line using shell word splitting
    pub fn parse(line: &str) -> Result<Self> {
        let mut words = shlex::split(line)
            .ok_or_else(|| Error::Config(format!("unbalanced quoting in command {:?}", line)))?
            .into_iter();

        let program = words
            .next()
            .ok_or_else(|| Error::Config("command must not be empty".to_string()))?;

        Ok(Self {
            program,
            args: words.collect(),
        })
    }

    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments with every placeholder replaced
    pub fn expand_args(&self, vars: &Vars<'_>) -> Vec<String> {
        self.args.iter().map(|arg| vars.expand(arg)).collect()
    }

    /// Build a ready-to-spawn command. stdin and stdout are closed unless the
    /// caller reconfigures them; stderr is inherited so the tool's own
    /// diagnostics stay visible.
    pub fn command(&self, vars: &Vars<'_>) -> Command {
        let args = self.expand_args(vars);
        debug!("Running: {} {:?}", self.program, args);

        let mut command = Command::new(&self.program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit());
        command
    }

    /// Run to completion; only the exit status is looked at.
    pub async fn run_status(&self, vars: &Vars<'_>) -> Result<()> {
        let status = self
            .command(vars)
            .status()
            .await
            .map_err(|e| Error::process(self.to_string(), format!("failed to launch: {}", e)))?;

        if !status.success() {
            return Err(Error::process(
                self.to_string(),
                format!("exited with {}", status),
            ));
        }

        Ok(())
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words = std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str));
        match shlex::try_join(words) {
            Ok(line) => f.write_str(&line),
            Err(_) => f.write_str(&self.program),
        }
    }
}

impl<'de> Deserialize<'de> for CommandSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let line = String::deserialize(deserializer)?;
        CommandSpec::parse(&line).map_err(serde::de::Error::custom)
    }
}

/// Values substituted into command templates
#[derive(Debug, Clone, Copy, Default)]
pub struct Vars<'a> {
    pub id: Option<i64>,
    pub action: Option<&'a str>,
}

impl<'a> Vars<'a> {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn id(id: i64) -> Self {
        Self {
            id: Some(id),
            action: None,
        }
    }

    pub fn with_action(self, action: &'a str) -> Self {
        Self {
            action: Some(action),
            ..self
        }
    }

    fn expand(&self, arg: &str) -> String {
        let mut result = arg.to_string();

        if let Some(id) = self.id {
            result = result.replace(ID_PLACEHOLDER, &id.to_string());
        }

        if let Some(action) = self.action {
            result = result.replace(ACTION_PLACEHOLDER, action);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_words() {
        let spec = CommandSpec::parse("rofi -dmenu -p 'Select Action' -i").unwrap();
        assert_eq!(spec.program(), "rofi");
        assert_eq!(
            spec.expand_args(&Vars::none()),
            vec!["-dmenu", "-p", "Select Action", "-i"]
        );
    }

    #[test]
    fn test_parse_rejects_empty_and_unbalanced() {
        assert!(matches!(CommandSpec::parse(""), Err(Error::Config(_))));
        assert!(matches!(CommandSpec::parse("   "), Err(Error::Config(_))));
        assert!(matches!(CommandSpec::parse("echo 'oops"), Err(Error::Config(_))));
    }

    #[test]
    fn test_expand_placeholders() {
        let spec = CommandSpec::parse("makoctl invoke -n {id} {action}").unwrap();
        let args = spec.expand_args(&Vars::id(42).with_action("reply now; rm -rf"));
        assert_eq!(args, vec!["invoke", "-n", "42", "reply now; rm -rf"]);
    }

    #[test]
    fn test_expand_inside_words() {
        let spec = CommandSpec::new("tool", ["--id={id}", "{action}"]);
        assert_eq!(spec.expand_args(&Vars::id(3)), vec!["--id=3", "{action}"]);
    }

    #[test]
    fn test_display_quotes_words() {
        let spec = CommandSpec::new("rofi", ["-p", "Select Action"]);
        let shown = spec.to_string();
        assert!(shown.starts_with("rofi -p "));
        assert_eq!(
            shlex::split(&shown).unwrap(),
            vec!["rofi", "-p", "Select Action"]
        );
    }

    #[tokio::test]
    async fn test_run_status_reports_exit() {
        CommandSpec::new("sh", ["-c", "exit 0"])
            .run_status(&Vars::none())
            .await
            .unwrap();

        let err = CommandSpec::new("sh", ["-c", "exit 3"])
            .run_status(&Vars::none())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Process { .. }));
    }

    #[tokio::test]
    async fn test_run_status_launch_failure() {
        let err = CommandSpec::new("/nonexistent/notify-actions-tool", Vec::<String>::new())
            .run_status(&Vars::none())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Process { .. }));
    }
}
