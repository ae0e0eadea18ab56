//! notify-actions - act on an on-screen desktop notification
//!
//! Looks a notification up in the daemon's current list and either dismisses
//! it (no actions), invokes its only action, or lets the user pick one from a
//! menu. After an action runs, the notification is dismissed if the daemon
//! kept it on screen.

pub mod alerts;
pub mod cli;
pub mod command;
pub mod config;
pub mod control;
pub mod directory;
pub mod dispatch;
pub mod error;
pub mod menu;
pub mod source;

pub use cli::{Cli, Invocation};
pub use command::CommandSpec;
pub use config::Config;
pub use control::{CommandControl, NotificationControl};
pub use directory::{ActionSet, Directory, Notification, NotificationId};
pub use dispatch::{Dispatcher, Outcome, Plan};
pub use error::{Error, Result};
pub use menu::{ActionMenu, CommandMenu};
pub use source::{CommandSource, NotificationSource};
