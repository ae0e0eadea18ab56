//! Command line parsing

use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::config::Config;
use crate::directory::NotificationId;
use crate::error::{Error, Result};

#[derive(Parser, Debug)]
#[command(name = "notify-actions")]
#[command(author, version, about = "Invoke, pick or dismiss the actions of a notification")]
#[command(allow_negative_numbers = true)]
pub struct Cli {
    /// Notification id (also accepted as `-id`)
    #[arg(short = 'i', long = "id", value_name = "ID")]
    pub id: Option<i64>,

    /// Path to config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parse arguments, accepting the single-dash `-id` spelling.
    pub fn try_parse_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args = args.into_iter().map(|arg| normalize_id_flag(arg.into()));
        Ok(Cli::try_parse_from(args)?)
    }

    /// The target notification; a missing or negative id is rejected.
    pub fn target(&self) -> Result<NotificationId> {
        match self.id {
            Some(id) if id >= 0 => Ok(NotificationId::new(id)),
            _ => Err(Error::MissingId),
        }
    }
}

/// Everything a run needs, resolved from the command line
#[derive(Debug)]
pub struct Invocation {
    pub id: NotificationId,
    pub config: Config,
    pub verbose: bool,
}

impl Invocation {
    /// Parse arguments, check the id, then load the config.
    ///
    /// A missing or negative id is reported before the config file is read;
    /// nothing here starts a subprocess.
    pub fn from_args<I, T>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let cli = Cli::try_parse_args(args)?;
        let id = cli.target()?;
        let config = Config::load(cli.config.as_deref())?;

        Ok(Self {
            id,
            config,
            verbose: cli.verbose,
        })
    }
}

fn normalize_id_flag(arg: OsString) -> OsString {
    match arg.to_str() {
        Some("-id") => OsString::from("--id"),
        Some(s) if s.starts_with("-id=") => OsString::from(format!("-{}", s)),
        _ => arg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli> {
        Cli::try_parse_args(std::iter::once("notify-actions").chain(args.iter().copied()))
    }

    #[test]
    fn test_single_dash_id() {
        let cli = parse(&["-id", "42"]).unwrap();
        assert_eq!(cli.target().unwrap(), NotificationId::new(42));

        let cli = parse(&["-id=7"]).unwrap();
        assert_eq!(cli.target().unwrap(), NotificationId::new(7));
    }

    #[test]
    fn test_long_and_short_id() {
        assert_eq!(parse(&["--id", "3"]).unwrap().id, Some(3));
        assert_eq!(parse(&["-i", "3"]).unwrap().id, Some(3));
    }

    #[test]
    fn test_missing_or_negative_id() {
        assert!(matches!(parse(&[]).unwrap().target(), Err(Error::MissingId)));
        assert!(matches!(
            parse(&["-id", "-1"]).unwrap().target(),
            Err(Error::MissingId)
        ));
        assert_eq!(
            parse(&["-id", "0"]).unwrap().target().unwrap(),
            NotificationId::new(0)
        );
    }

    #[test]
    fn test_flag_errors() {
        assert!(matches!(parse(&["-id", "abc"]), Err(Error::FlagParse(_))));
        assert!(matches!(parse(&["--bogus"]), Err(Error::FlagParse(_))));
        assert!(matches!(parse(&["list"]), Err(Error::FlagParse(_))));
    }

    fn invocation(args: &[&str]) -> anyhow::Result<Invocation> {
        Invocation::from_args(std::iter::once("notify-actions").chain(args.iter().copied()))
    }

    #[test]
    fn test_missing_id_checked_before_config() {
        // The config file does not exist; the id error must still win.
        for args in [
            &["-c", "/nonexistent/notify-actions.toml"][..],
            &["-id", "-4", "-c", "/nonexistent/notify-actions.toml"][..],
        ] {
            let err = invocation(args).unwrap_err();
            assert!(matches!(err.downcast_ref::<Error>(), Some(Error::MissingId)));
            assert_eq!(format!("error: {:#}", err), "error: id is required");
        }
    }

    #[test]
    fn test_invocation_loads_config() {
        let err = invocation(&["-id", "4", "-c", "/nonexistent/notify-actions.toml"]).unwrap_err();
        assert!(err.downcast_ref::<Error>().is_none());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[general]\nalert_on_error = true\n").unwrap();

        let run = invocation(&["-id", "4", "-c", path.to_str().unwrap(), "-v"]).unwrap();
        assert_eq!(run.id, NotificationId::new(4));
        assert!(run.config.general.alert_on_error);
        assert!(run.verbose);
    }

    #[test]
    fn test_invocation_flag_error() {
        let err = invocation(&["--bogus"]).unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::FlagParse(_))));
    }

    #[test]
    fn test_config_and_verbose() {
        let cli = parse(&["-id", "1", "-c", "/tmp/na.toml", "-v"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/na.toml")));
        assert!(cli.verbose);
    }
}
