//! Configuration schema

use serde::Deserialize;

use crate::command::CommandSpec;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,

    /// External tools
    #[serde(default)]
    pub commands: CommandsConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Stop waiting for notification lists this many milliseconds after
    /// start (0 = never). Covers time spent in the menu too.
    #[serde(default)]
    pub deadline_ms: u64,

    /// Raise a desktop notification when a run fails
    #[serde(default)]
    pub alert_on_error: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            deadline_ms: 0,
            alert_on_error: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Command lines for the daemon's control tool and the menu.
///
/// `{id}` is replaced with the notification id, `{action}` with the action
/// being invoked.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandsConfig {
    /// Prints the notification list as JSON
    #[serde(default = "default_list")]
    pub list: CommandSpec,

    #[serde(default = "default_dismiss")]
    pub dismiss: CommandSpec,

    /// `{action}` is the action's token, the value side of the daemon's
    /// action map. mako lists actions as `{"<key>": "<label>"}` and
    /// `makoctl invoke` expects the key, so with mako the label is passed.
    #[serde(default = "default_invoke")]
    pub invoke: CommandSpec,

    /// Reads choices on stdin, prints the chosen one
    #[serde(default = "default_menu")]
    pub menu: CommandSpec,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            list: default_list(),
            dismiss: default_dismiss(),
            invoke: default_invoke(),
            menu: default_menu(),
        }
    }
}

fn default_list() -> CommandSpec {
    CommandSpec::new("makoctl", ["list"])
}

fn default_dismiss() -> CommandSpec {
    CommandSpec::new("makoctl", ["dismiss", "-n", "{id}"])
}

fn default_invoke() -> CommandSpec {
    CommandSpec::new("makoctl", ["invoke", "-n", "{id}", "{action}"])
}

fn default_menu() -> CommandSpec {
    CommandSpec::new(
        "rofi",
        ["-dmenu", "-p", "Select Action", "-i", "--only-match"],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Vars;

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.general.log_level, "warn");
        assert_eq!(config.general.deadline_ms, 0);
        assert!(!config.general.alert_on_error);
        assert_eq!(config.commands.list, CommandSpec::new("makoctl", ["list"]));
        assert_eq!(config.commands.menu.program(), "rofi");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [general]
            log_level = "debug"
            deadline_ms = 1500
            alert_on_error = true

            [commands]
            invoke = "makoctl invoke -n {id} {action}"
            menu = "fuzzel --dmenu --prompt 'Action: '"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.general.deadline_ms, 1500);
        assert!(config.general.alert_on_error);
        assert_eq!(
            config.commands.invoke.expand_args(&Vars::id(3).with_action("default")),
            vec!["invoke", "-n", "3", "default"]
        );
        assert_eq!(config.commands.menu.program(), "fuzzel");
        assert_eq!(
            config.commands.menu.expand_args(&Vars::none()),
            vec!["--dmenu", "--prompt", "Action: "]
        );
        assert_eq!(config.commands.dismiss, default_dismiss());
    }

    #[test]
    fn test_reject_empty_command() {
        let toml = r#"
            [commands]
            list = ""
        "#;
        assert!(toml::from_str::<Config>(toml).is_err());
    }
}
