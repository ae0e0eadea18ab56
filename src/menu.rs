//! Interactive action picker

use async_trait::async_trait;
use std::collections::HashMap;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::command::{CommandSpec, Vars};
use crate::directory::ActionSet;
use crate::error::{Error, Result};

/// A tool that lets the user pick one line out of several
#[async_trait]
pub trait ActionMenu: Send + Sync {
    /// Offer `choices` and return the tool's raw answer, line terminator included
    async fn select(&self, choices: &[String]) -> Result<String>;
}

/// dmenu-style picker: choices on stdin, the chosen line on stdout
#[derive(Debug, Clone)]
pub struct CommandMenu {
    menu: CommandSpec,
}

impl CommandMenu {
    pub fn new(menu: CommandSpec) -> Self {
        Self { menu }
    }
}

#[async_trait]
impl ActionMenu for CommandMenu {
    async fn select(&self, choices: &[String]) -> Result<String> {
        let mut command = self.menu.command(&Vars::none());
        command.stdin(Stdio::piped()).stdout(Stdio::piped());

        let mut child = command
            .spawn()
            .map_err(|e| Error::process(self.menu.to_string(), format!("failed to launch: {}", e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            let input = choices.join("\n");
            // A picker may exit before reading everything; its exit status decides.
            if let Err(e) = stdin.write_all(input.as_bytes()).await {
                debug!("Menu closed its input early: {}", e);
            }
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| Error::process(self.menu.to_string(), e))?;

        if !output.status.success() {
            return Err(Error::process(
                self.menu.to_string(),
                format!("exited with {}", output.status),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Ask the menu which action to run and map its answer back to the action name.
///
/// The menu is shown the action tokens; an answer that is not one of them
/// fails with [`Error::ActionNotFound`].
pub async fn choose_action(menu: &dyn ActionMenu, actions: &ActionSet) -> Result<String> {
    let mut choices = Vec::with_capacity(actions.len());
    let mut reverse = HashMap::with_capacity(actions.len());
    for (name, token) in actions.iter() {
        choices.push(token.to_string());
        reverse.insert(token, name);
    }

    let answer = menu.select(&choices).await?;
    let chosen = strip_line_terminator(&answer);
    debug!("Menu answered {:?}", chosen);

    reverse
        .get(chosen)
        .map(|name| name.to_string())
        .ok_or(Error::ActionNotFound(answer))
}

/// Drop one trailing `\n` or `\r\n`
fn strip_line_terminator(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|rest| rest.strip_suffix('\r').unwrap_or(rest))
        .unwrap_or(line)
}
