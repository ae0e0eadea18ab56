//! Fetching the notification list from the daemon

use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::command::{CommandSpec, Vars};
use crate::directory::Directory;
use crate::error::{Error, Result};

/// Something that can produce a fresh [`Directory`] snapshot
#[async_trait]
pub trait NotificationSource: Send + Sync {
    /// Fetch the current notification list.
    ///
    /// `cancel` is only honoured while waiting for the list to be decoded;
    /// the listing command itself always runs to completion.
    async fn fetch(&self, cancel: &CancellationToken) -> Result<Directory>;
}

/// Lists notifications by running the daemon's control tool
#[derive(Debug, Clone)]
pub struct CommandSource {
    list: CommandSpec,
}

impl CommandSource {
    pub fn new(list: CommandSpec) -> Self {
        Self { list }
    }
}

#[async_trait]
impl NotificationSource for CommandSource {
    async fn fetch(&self, cancel: &CancellationToken) -> Result<Directory> {
        let mut command = self.list.command(&Vars::none());
        command.stdout(Stdio::piped());

        let mut child = command
            .spawn()
            .map_err(|e| Error::process(self.list.to_string(), format!("failed to launch: {}", e)))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::process(self.list.to_string(), "stdout was not captured"))?;

        // The decoder owns the pipe; it is closed when the task ends or is aborted.
        let mut decode = tokio::spawn(decode_listing(stdout));

        let status = match child.wait().await {
            Ok(status) => status,
            Err(e) => {
                decode.abort();
                return Err(Error::process(self.list.to_string(), e));
            }
        };

        if !status.success() {
            decode.abort();
            return Err(Error::process(
                self.list.to_string(),
                format!("exited with {}", status),
            ));
        }

        debug!("{} exited, waiting for decoded listing", self.list);

        tokio::select! {
            biased;

            _ = cancel.cancelled() => {
                decode.abort();
                Err(Error::Cancelled)
            }
            joined = &mut decode => match joined {
                Ok(decoded) => {
                    let directory = decoded?;
                    debug!("Listing holds {} notifications", directory.len());
                    Ok(directory)
                }
                Err(e) => {
                    warn!("Listing decoder did not finish: {}", e);
                    Err(Error::process(self.list.to_string(), e))
                }
            },
        }
    }
}

/// Decode the first JSON document from `reader`.
///
/// Returns as soon as one complete document has arrived, so a writer that
/// keeps the stream open afterwards does not hold the caller up, and bytes
/// after the document are ignored. A `null` document is an empty directory.
pub async fn decode_listing<R>(mut reader: R) -> std::result::Result<Directory, serde_json::Error>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];

    loop {
        let read = reader.read(&mut chunk).await.map_err(serde_json::Error::io)?;
        if read == 0 {
            // End of input without a complete document
            return serde_json::from_slice::<Option<Directory>>(&buf)
                .map(Option::unwrap_or_default);
        }
        buf.extend_from_slice(&chunk[..read]);

        let mut documents =
            serde_json::Deserializer::from_slice(&buf).into_iter::<Option<Directory>>();
        match documents.next() {
            Some(Ok(directory)) => return Ok(directory.unwrap_or_default()),
            Some(Err(e)) if e.is_eof() => continue,
            Some(Err(e)) => return Err(e),
            None => continue,
        }
    }
}
