//! Line-oriented terminal front end
//!
//! Plain lines become chat messages. Lines starting with `/` are commands.
//! Everything the user sees comes from the [`SessionView`] published by the
//! controller; the REPL itself keeps no conversation state beyond how many
//! entries it has already printed.

mod render;

use crate::runtime::{SessionError, SessionHandle, SessionView};
use crate::session::{Attachment, FileCandidate, ImageHandle, ImageHandleFactory};
use crate::transport::TransportClient;
use chrono::Local;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Commands:
  /attach <path>  stage an image for the next message
  /detach         remove the staged image
  /retry          send the current draft again
  /history        show the whole conversation
  /health         check the backend
  /help           show this help
  /quit           exit

Anything else is sent as a message. With an image staged, the message is
its caption. An empty line sends the draft as it stands: the staged image
alone, or a message kept after a failed send.";

#[derive(Debug, Error)]
pub enum ReplError {
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Session(#[from] SessionError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Message(String),
    Attach(PathBuf),
    Detach,
    Retry,
    History,
    Health,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        let Some(rest) = line.trim_start().strip_prefix('/') else {
            return Command::Message(line.to_string());
        };
        let (name, arg) = rest
            .split_once(char::is_whitespace)
            .map_or((rest, ""), |(name, arg)| (name, arg.trim()));
        match name {
            "attach" if !arg.is_empty() => Command::Attach(PathBuf::from(arg)),
            "detach" => Command::Detach,
            "retry" => Command::Retry,
            "history" => Command::History,
            "health" => Command::Health,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => Command::Unknown(rest.trim().to_string()),
        }
    }
}

/// Image handles for the terminal: the file name and size plus a short id
pub struct TerminalImages;

impl ImageHandleFactory for TerminalImages {
    fn create(&self, attachment: &Attachment) -> ImageHandle {
        let id = uuid::Uuid::new_v4().simple().to_string();
        let short = id.get(..8).unwrap_or(&id);
        let summary = attachment.summary();
        ImageHandle::new(format!("{} ({}) #{short}", summary.name, summary.size_label()))
    }
}

/// Read a file from disk as an attachment candidate, guessing its type from the extension
async fn load_file(path: &Path) -> std::io::Result<FileCandidate> {
    let bytes = tokio::fs::read(path).await?;
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    let mime_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();
    Ok(FileCandidate::new(name, mime_type, bytes))
}

pub struct Repl<T> {
    session: SessionHandle,
    transport: Arc<T>,
    rendered: usize,
}

impl<T: TransportClient> Repl<T> {
    pub fn new(session: SessionHandle, transport: Arc<T>) -> Self {
        Self {
            session,
            transport,
            rendered: 0,
        }
    }

    pub async fn run(mut self) -> Result<(), ReplError> {
        println!("AI Assistant: chat and image analysis at {}", self.transport.endpoint());
        println!("Type /help for commands.");
        self.probe_health().await;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("{}", render::prompt(&self.session.view()));
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                println!();
                break;
            };

            match Command::parse(&line) {
                Command::Message(text) => self.send_message(text).await?,
                Command::Attach(path) => self.attach(&path).await?,
                Command::Detach => {
                    self.session.clear_attachment().await?;
                    println!("Attachment removed.");
                }
                Command::Retry => self.submit_draft(true).await?,
                Command::History => self.print_history(),
                Command::Health => self.report_health().await,
                Command::Help => println!("{HELP}"),
                Command::Quit => break,
                Command::Unknown(name) => println!("Unknown command /{name}. Type /help."),
            }
        }
        Ok(())
    }

    async fn probe_health(&self) {
        if let Err(e) = self.transport.health().await {
            tracing::warn!(endpoint = %self.transport.endpoint(), error = %e, "Backend health probe failed");
            println!("Warning: backend not reachable yet. {}", e.display_text());
        }
    }

    async fn report_health(&self) {
        match self.transport.health().await {
            Ok(health) if health.models.is_empty() => println!("Backend status: {}", health.status),
            Ok(health) => println!(
                "Backend status: {} (models: {})",
                health.status,
                health.models.join(", ")
            ),
            Err(e) => println!("{}", e.display_text()),
        }
    }

    async fn send_message(&mut self, text: String) -> Result<(), ReplError> {
        // A blank line keeps the draft, so a failed message can be resent as is
        if text.trim().is_empty() {
            return self.submit_draft(false).await;
        }
        self.session.edit_text(text).await?;
        self.submit_draft(true).await
    }

    async fn submit_draft(&mut self, hint_if_empty: bool) -> Result<(), ReplError> {
        if !self.session.submit().await? {
            if hint_if_empty {
                println!("Nothing to send.");
            }
            return Ok(());
        }

        if let Some(label) = self.session.view().pending_label {
            println!("{label}");
        }
        let view = self.session.wait_for(|v| !v.busy).await?;
        self.print_new_entries(&view);
        Ok(())
    }

    async fn attach(&self, path: &Path) -> Result<(), ReplError> {
        let file = match load_file(path).await {
            Ok(file) => file,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Could not read attachment");
                println!("Could not read {}: {e}", path.display());
                return Ok(());
            }
        };
        match self.session.select_attachment(file).await {
            Ok(summary) => println!("Attached {}", render::render_attachment(&summary)),
            Err(SessionError::Rejected(reason)) => println!("{reason}"),
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    fn print_new_entries(&mut self, view: &SessionView) {
        for entry in view.transcript.iter().skip(self.rendered) {
            println!("{}", render::render_entry(entry, &Local));
        }
        self.rendered = view.transcript.len();
    }

    fn print_history(&mut self) {
        let view = self.session.view();
        if view.transcript.is_empty() {
            println!("No messages yet.");
            return;
        }
        self.rendered = 0;
        self.print_new_entries(&view);
    }
}
