//! flashnote - line-oriented front end for the flash session store.
//!
//! Reads `<user_id> <message>` lines from stdin. Supported commands:
//!
//! - `<user_id> /cancel` discards the user's live session
//! - `<user_id> /image <url>` appends an image
//! - `<user_id> /file <url> [name]` appends a file
//!
//! End of input or Ctrl-C commits every live session and exits.

use std::error::Error;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use flashnote::adapters::{BlinkoNoteStore, MarkdownLinkRenderer};
use flashnote::application::{
    CancelFlashCommand, CancelFlashHandler, FlushSessionsHandler, IngestMessageCommand,
    IngestMessageHandler, IngestOutcome, SessionStore, TimeoutDispatcher,
};
use flashnote::config::{AppConfig, LoggingConfig};
use flashnote::domain::flash::Fragment;
use flashnote::domain::foundation::{UserId, ValidationError};
use flashnote::ports::NoteStore;

/// One parsed stdin line.
#[derive(Debug)]
enum InputLine {
    Message(IngestMessageCommand),
    Cancel(UserId),
}

fn parse_line(line: &str) -> Result<Option<InputLine>, ValidationError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (user, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let user_id = UserId::new(user)?;
    let rest = rest.trim_start();

    let (command, args) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    let args = args.trim();

    let fragment = match command {
        "/cancel" => return Ok(Some(InputLine::Cancel(user_id))),
        "/image" => {
            if args.is_empty() {
                return Err(ValidationError::empty_field("url"));
            }
            Fragment::image(args, file_name_from_url(args))
        }
        "/file" => {
            let (url, name) = args.split_once(char::is_whitespace).unwrap_or((args, ""));
            if url.is_empty() {
                return Err(ValidationError::empty_field("url"));
            }
            let name = match name.trim() {
                "" => file_name_from_url(url),
                name => name.to_string(),
            };
            Fragment::file(name, Some(url.to_string()))
        }
        _ => Fragment::text(rest),
    };

    Ok(Some(InputLine::Message(IngestMessageCommand { user_id, fragment })))
}

fn file_name_from_url(url: &str) -> String {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("attachment")
        .to_string()
}

fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn Error>> {
    let filter = logging.env_filter()?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.logging)?;

    let notes: Arc<dyn NoteStore> = Arc::new(BlinkoNoteStore::new(
        config.note_service.to_blinko_config(),
    )?);
    let dispatcher = Arc::new(TimeoutDispatcher::new(
        Arc::new(MarkdownLinkRenderer::new()),
        notes,
        config.flash.commit_settings(),
    ));

    let store = SessionStore::new(config.flash.idle_timeout());
    store.add_observer(dispatcher.clone()).await;

    let ingest = IngestMessageHandler::new(store.clone(), config.filters.to_filter());
    let cancel = CancelFlashHandler::new(store.clone());
    let flush = FlushSessionsHandler::new(store.clone(), dispatcher);

    tracing::info!(
        idle_timeout_secs = config.flash.idle_timeout_secs,
        note_service = %config.note_service.base_url,
        "flashnote started"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupt received");
                None
            }
        };
        let Some(line) = line else { break };

        match parse_line(&line) {
            Ok(Some(InputLine::Message(cmd))) => {
                let user_id = cmd.user_id.clone();
                match ingest.handle(cmd).await {
                    IngestOutcome::Ignored(reason) => {
                        tracing::debug!(%user_id, %reason, "Message ignored");
                    }
                    IngestOutcome::Started(session) | IngestOutcome::Appended(session) => {
                        tracing::debug!(%user_id, fragments = session.len(), "Message recorded");
                    }
                }
            }
            Ok(Some(InputLine::Cancel(user_id))) => {
                if let Err(e) = cancel.handle(CancelFlashCommand { user_id }).await {
                    tracing::warn!(error = %e, "Cancel ignored");
                }
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, line = %line, "Unparseable input line"),
        }
    }

    let report = flush.handle().await;
    if !report.failed.is_empty() {
        tracing::warn!(failed = report.failed.len(), "Some flash notes were not saved");
    }
    Ok(())
}
