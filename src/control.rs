//! Dismissing notifications and invoking their actions

use async_trait::async_trait;
use tracing::info;

use crate::command::{CommandSpec, Vars};
use crate::directory::NotificationId;
use crate::error::Result;

/// Side-effecting calls into the notification daemon.
///
/// Both report only success or failure.
#[async_trait]
pub trait NotificationControl: Send + Sync {
    async fn dismiss(&self, id: NotificationId) -> Result<()>;

    async fn invoke(&self, id: NotificationId, action: &str) -> Result<()>;
}

/// Drives the daemon through its control tool
#[derive(Debug, Clone)]
pub struct CommandControl {
    dismiss: CommandSpec,
    invoke: CommandSpec,
}

impl CommandControl {
    pub fn new(dismiss: CommandSpec, invoke: CommandSpec) -> Self {
        Self { dismiss, invoke }
    }
}

#[async_trait]
impl NotificationControl for CommandControl {
    async fn dismiss(&self, id: NotificationId) -> Result<()> {
        info!("Dismissing notification {}", id);
        self.dismiss.run_status(&Vars::id(id.get())).await
    }

    async fn invoke(&self, id: NotificationId, action: &str) -> Result<()> {
        info!("Invoking {:?} on notification {}", action, id);
        self.invoke
            .run_status(&Vars::id(id.get()).with_action(action))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    /// A control whose commands append their arguments to a log file
    fn recording(dir: &TempDir) -> (CommandControl, std::path::PathBuf) {
        let log = dir.path().join("calls.log");
        let script = format!("echo \"$@\" >> '{}'", log.display());

        let control = CommandControl::new(
            CommandSpec::new("sh", ["-c", script.as_str(), "sh", "dismiss", "{id}"]),
            CommandSpec::new("sh", ["-c", script.as_str(), "sh", "invoke", "{id}", "{action}"]),
        );
        (control, log)
    }

    #[tokio::test]
    async fn test_dismiss_and_invoke_pass_arguments() {
        let dir = TempDir::new().unwrap();
        let (control, log) = recording(&dir);

        control.invoke(NotificationId::new(8), "default").await.unwrap();
        control.dismiss(NotificationId::new(8)).await.unwrap();

        let calls = std::fs::read_to_string(log).unwrap();
        assert_eq!(calls, "invoke 8 default\ndismiss 8\n");
    }

    #[tokio::test]
    async fn test_failure_exit_is_error() {
        let control = CommandControl::new(
            CommandSpec::new("false", Vec::<String>::new()),
            CommandSpec::new("false", Vec::<String>::new()),
        );

        let err = control.dismiss(NotificationId::new(1)).await.unwrap_err();
        assert!(matches!(err, Error::Process { .. }));

        let err = control
            .invoke(NotificationId::new(1), "default")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Process { .. }));
    }
}
