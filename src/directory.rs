//! Snapshot of the notifications currently on screen
//!
//! The daemon reports notifications as groups of records, each field wrapped
//! in a `{"type": ..., "data": ...}` envelope:
//!
//! ```json
//! {"type": "aa{sv}", "data": [[
//!   {"id": {"type": "u", "data": 5},
//!    "actions": {"type": "a{ss}", "data": {"default": "Open"}}}
//! ]]}
//! ```
//!
//! A [`Directory`] is decoded fresh for every listing and never updated.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use std::fmt;

use crate::error::{Error, Result};

/// Identifier the daemon assigns to an on-screen notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(i64);

impl NotificationId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Actions offered by a notification, action name to invocation token.
///
/// Keeps the order the daemon reported them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ActionSet(IndexMap<String, String>);

impl ActionSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up the token for an action name
    pub fn token(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Iterate `(name, token)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<N: Into<String>, T: Into<String>> FromIterator<(N, T)> for ActionSet {
    fn from_iter<I: IntoIterator<Item = (N, T)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, token)| (name.into(), token.into()))
                .collect(),
        )
    }
}

/// One on-screen notification
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Notification {
    #[serde(default, deserialize_with = "from_envelope")]
    pub id: Option<NotificationId>,

    #[serde(default, deserialize_with = "from_envelope")]
    pub actions: Option<ActionSet>,
}

impl Notification {
    pub fn new(id: NotificationId, actions: ActionSet) -> Self {
        Self {
            id: Some(id),
            actions: Some(actions),
        }
    }

    /// Whether this is the notification with the given id.
    ///
    /// Both the id and the action map must be present; a record missing
    /// either never matches.
    pub fn is(&self, id: NotificationId) -> bool {
        matches!((self.id, &self.actions), (Some(own), Some(_)) if own == id)
    }
}

/// Point-in-time list of notification groups as reported by the daemon.
///
/// Null groups and null records are kept as reported and skipped by lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Directory {
    #[serde(default, rename = "data")]
    groups: Option<Vec<Option<Vec<Option<Notification>>>>>,
}

impl Directory {
    /// A directory holding the given groups
    pub fn new(groups: Vec<Vec<Notification>>) -> Self {
        Self {
            groups: Some(
                groups
                    .into_iter()
                    .map(|group| Some(group.into_iter().map(Some).collect()))
                    .collect(),
            ),
        }
    }

    /// A directory without any group collection
    pub fn empty() -> Self {
        Self { groups: None }
    }

    /// Find a notification by id.
    ///
    /// Groups are scanned in order, then items within each group; the first
    /// match wins.
    pub fn lookup(&self, id: NotificationId) -> Result<&Notification> {
        let groups = self.groups.as_ref().ok_or(Error::NoNotifications)?;

        groups
            .iter()
            .flatten()
            .flatten()
            .flatten()
            .find(|item| item.is(id))
            .ok_or(Error::NotFound(id))
    }

    /// Total number of records across all groups
    pub(crate) fn len(&self) -> usize {
        self.groups
            .iter()
            .flatten()
            .flatten()
            .map(|group| group.len())
            .sum()
    }
}

/// Unwrap a `{"type": ..., "data": ...}` envelope, treating a missing or null
/// envelope or payload as absent.
fn from_envelope<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    struct Envelope<T> {
        data: Option<T>,
    }

    Ok(Option::<Envelope<T>>::deserialize(deserializer)?.and_then(|envelope| envelope.data))
}
