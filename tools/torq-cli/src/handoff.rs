//! Terminal hand-off strategies.
//!
//! Tried in order: the system URL opener, printing the link for the user to
//! follow, and finally writing the plain message to a file.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use torq_commerce::checkout::{DeepLink, HandoffError, HandoffOutcome, HandoffStrategy};
use tracing::debug;

use crate::output::Output;

/// Opens the link with the platform's default URL handler.
pub struct SystemOpener {
    enabled: bool,
}

impl SystemOpener {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

fn opener_command(url: &str) -> Command {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(url);
        cmd
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("rundll32");
        cmd.args(["url.dll,FileProtocolHandler", url]);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(url);
        cmd
    }
}

impl HandoffStrategy for SystemOpener {
    fn name(&self) -> &str {
        "system-opener"
    }

    fn attempt(&self, link: &DeepLink) -> Result<HandoffOutcome, HandoffError> {
        if !self.enabled {
            return Err(HandoffError::Unavailable("disabled by configuration".into()));
        }

        let mut cmd = opener_command(link.url());
        debug!(program = ?cmd.get_program(), "launching URL opener");
        let status = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;

        if status.success() {
            Ok(HandoffOutcome::Opened)
        } else {
            Err(HandoffError::Failed(format!("URL opener exited with {}", status)))
        }
    }
}

/// Prints the link so the user can follow it from the terminal.
pub struct TerminalLink {
    output: Output,
}

impl TerminalLink {
    pub fn new(output: Output) -> Self {
        Self { output }
    }
}

impl HandoffStrategy for TerminalLink {
    fn name(&self) -> &str {
        "terminal-link"
    }

    fn attempt(&self, link: &DeepLink) -> Result<HandoffOutcome, HandoffError> {
        if self.output.is_json() {
            return Err(HandoffError::Unavailable("JSON output requested".into()));
        }
        if !self.output.is_interactive() {
            return Err(HandoffError::Unavailable("stdout is not a terminal".into()));
        }

        self.output.info("Open this link to send the order:");
        self.output.link(link.url());
        Ok(HandoffOutcome::Navigated)
    }
}

/// Writes the readable message to a file for manual sending.
pub struct ManualCopy {
    path: PathBuf,
}

impl ManualCopy {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl HandoffStrategy for ManualCopy {
    fn name(&self) -> &str {
        "manual-copy"
    }

    fn attempt(&self, link: &DeepLink) -> Result<HandoffOutcome, HandoffError> {
        std::fs::write(&self.path, link.decoded_message())?;
        Ok(HandoffOutcome::Copied {
            instructions: format!(
                "Mensagem salva em {}. Copie o texto e cole no WhatsApp manualmente.",
                self.path.display()
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use torq_commerce::checkout::{build_deep_link, Handoff, HandoffReport, WhatsAppConfig};

    fn link() -> DeepLink {
        build_deep_link(&WhatsAppConfig::default(), "Ol%C3%A1%0Amundo").unwrap()
    }

    #[test]
    fn test_disabled_opener_is_unavailable() {
        let err = SystemOpener::new(false).attempt(&link()).unwrap_err();
        assert!(matches!(err, HandoffError::Unavailable(_)));
    }

    #[test]
    fn test_terminal_link_skipped_in_json_mode() {
        let strategy = TerminalLink::new(Output::new(false, true));
        let err = strategy.attempt(&link()).unwrap_err();
        assert!(matches!(err, HandoffError::Unavailable(_)));
    }

    #[test]
    fn test_manual_copy_writes_decoded_message() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("order.txt");

        let outcome = ManualCopy::new(path.clone()).attempt(&link()).unwrap();
        assert!(matches!(outcome, HandoffOutcome::Copied { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Olá\nmundo");
    }

    #[test]
    fn test_manual_copy_fails_on_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("missing").join("order.txt");

        let err = ManualCopy::new(path).attempt(&link()).unwrap_err();
        assert!(matches!(err, HandoffError::Io(_)));
    }

    #[test]
    fn test_chain_falls_through_to_manual_copy() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("order.txt");

        let handoff = Handoff::new()
            .with(SystemOpener::new(false))
            .with(TerminalLink::new(Output::new(false, true)))
            .with(ManualCopy::new(path.clone()));

        match handoff.run(&link()) {
            HandoffReport::Delivered {
                strategy, failures, ..
            } => {
                assert_eq!(strategy, "manual-copy");
                assert_eq!(failures.len(), 2);
            }
            other => panic!("expected delivery, got {:?}", other),
        }
        assert!(path.exists());
    }
}
