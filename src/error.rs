use std::path::PathBuf;
use thiserror::Error;

/// Failures while obtaining `pvdisplay` text.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} not found")]
    CommandNotFound(String),

    #[error("{0} not found, cannot elevate pvdisplay")]
    SudoNotFound(String),

    #[error("failed to run {command}: {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source:  std::io::Error,
    },

    #[error("{command} exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status:  String,
        stderr:  String,
    },
}

impl SourceError {
    /// Hint printed under the error message.
    pub fn hint(&self) -> &'static str {
        match self {
            SourceError::FileNotFound(_)    => "Make sure the file path is correct",
            SourceError::Read { .. }        => "Check the file permissions",
            SourceError::CommandNotFound(_) => "Make sure LVM is installed (lvm2 package)",
            SourceError::SudoNotFound(_)    => "Install sudo, or run as root / with --no-sudo",
            SourceError::CommandSpawn { .. }
            | SourceError::CommandFailed { .. } => "Make sure you have sudo rights to execute pvdisplay",
        }
    }
}

/// Process exit status for a failed run: a missing input file is not
/// treated as a failure, everything else is.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<SourceError>() {
        Some(SourceError::FileNotFound(_)) => 0,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn missing_file_exits_cleanly() {
        let err = anyhow::Error::new(SourceError::FileNotFound("/nope".into()));
        assert_eq!(exit_code(&err), 0);
        assert_eq!(err.downcast_ref::<SourceError>().unwrap().hint(), "Make sure the file path is correct");
    }

    #[test]
    fn command_errors_exit_with_failure() {
        let failed = SourceError::CommandFailed {
            command: "sudo pvdisplay -m".into(),
            status:  "exit status: 5".into(),
            stderr:  "permission denied".into(),
        };
        assert_eq!(failed.hint(), "Make sure you have sudo rights to execute pvdisplay");
        assert_eq!(exit_code(&anyhow::Error::new(failed)), 1);

        let missing = SourceError::CommandNotFound("pvdisplay".into());
        assert_eq!(missing.hint(), "Make sure LVM is installed (lvm2 package)");
        assert_eq!(exit_code(&anyhow::Error::new(missing)), 1);
    }

    #[test]
    fn other_errors_exit_with_failure() {
        let err: anyhow::Result<()> = Err(std::io::Error::other("disk full")).context("writing chart.svg");
        assert_eq!(exit_code(&err.unwrap_err()), 1);
    }
}
