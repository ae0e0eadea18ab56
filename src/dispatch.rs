//! Deciding what to do with a notification, and doing it

use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::CommandsConfig;
use crate::control::{CommandControl, NotificationControl};
use crate::directory::{ActionSet, NotificationId};
use crate::error::{Error, Result};
use crate::menu::{ActionMenu, CommandMenu, choose_action};
use crate::source::{CommandSource, NotificationSource};

/// What a notification's actions call for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan<'a> {
    /// Nothing to invoke, close it
    Dismiss,
    /// Exactly one action, run it directly
    Invoke { name: &'a str, token: &'a str },
    /// Several actions, let the user pick
    Menu,
}

impl<'a> Plan<'a> {
    pub fn for_actions(actions: &'a ActionSet) -> Self {
        let mut entries = actions.iter();
        match (entries.next(), entries.next()) {
            (None, _) => Plan::Dismiss,
            (Some((name, token)), None) => Plan::Invoke { name, token },
            (Some(_), Some(_)) => Plan::Menu,
        }
    }
}

/// How a successful run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The notification had no actions and was dismissed
    Dismissed,
    /// An action was invoked; `dismissed` is set when the notification was
    /// still on screen afterwards and got closed
    Invoked { action: String, dismissed: bool },
}

/// Resolves a notification and carries out its action
pub struct Dispatcher {
    source: Arc<dyn NotificationSource>,
    control: Arc<dyn NotificationControl>,
    menu: Arc<dyn ActionMenu>,
}

impl Dispatcher {
    pub fn new(
        source: Arc<dyn NotificationSource>,
        control: Arc<dyn NotificationControl>,
        menu: Arc<dyn ActionMenu>,
    ) -> Self {
        Self {
            source,
            control,
            menu,
        }
    }

    /// Dispatcher backed by the configured external tools
    pub fn from_config(commands: &CommandsConfig) -> Self {
        Self::new(
            Arc::new(CommandSource::new(commands.list.clone())),
            Arc::new(CommandControl::new(
                commands.dismiss.clone(),
                commands.invoke.clone(),
            )),
            Arc::new(CommandMenu::new(commands.menu.clone())),
        )
    }

    /// Handle one notification.
    ///
    /// The first error ends the run; nothing is retried.
    pub async fn run(&self, id: NotificationId, cancel: &CancellationToken) -> Result<Outcome> {
        let actions = {
            let directory = self.source.fetch(cancel).await?;
            let notification = directory.lookup(id)?;
            notification.actions.clone().unwrap_or_default()
        };

        let plan = Plan::for_actions(&actions);
        debug!("Notification {} offers {} actions: {:?}", id, actions.len(), plan);

        match plan {
            Plan::Dismiss => {
                self.control.dismiss(id).await?;
                Ok(Outcome::Dismissed)
            }
            Plan::Invoke { name, token } => {
                debug!("Only action is {:?}", name);
                self.invoke(id, token, cancel).await
            }
            Plan::Menu => {
                let name = choose_action(self.menu.as_ref(), &actions).await?;
                let token = actions
                    .token(&name)
                    .ok_or_else(|| Error::ActionNotFound(name.clone()))?;
                self.invoke(id, token, cancel).await
            }
        }
    }

    /// Invoke an action, then close the notification if the daemon kept it.
    async fn invoke(
        &self,
        id: NotificationId,
        action: &str,
        cancel: &CancellationToken,
    ) -> Result<Outcome> {
        self.control.invoke(id, action).await?;

        let dismissed = if self.still_exists(id, cancel).await {
            self.control.dismiss(id).await?;
            true
        } else {
            false
        };

        info!(
            "Invoked {:?} on notification {} (dismissed afterwards: {})",
            action, id, dismissed
        );

        Ok(Outcome::Invoked {
            action: action.to_string(),
            dismissed,
        })
    }

    /// Any failure to list or find the notification counts as gone.
    async fn still_exists(&self, id: NotificationId, cancel: &CancellationToken) -> bool {
        match self.source.fetch(cancel).await {
            Ok(directory) => directory.lookup(id).is_ok(),
            Err(e) => {
                warn!("Could not re-check notification {}: {}", id, e);
                false
            }
        }
    }
}
