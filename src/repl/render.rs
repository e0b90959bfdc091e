//! Text rendering of transcript entries and draft state

use crate::runtime::SessionView;
use crate::session::{AttachmentSummary, MessageEntry, Role};
use chrono::TimeZone;
use std::fmt::{Display, Write};

fn speaker(role: Role) -> &'static str {
    match role {
        Role::User => "you",
        Role::Assistant => "assistant",
    }
}

/// One entry, with its image reference and metadata on indented lines
pub fn render_entry<Tz>(entry: &MessageEntry, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let time = entry.created_at.with_timezone(tz).format("%H:%M:%S");
    let mut out = format!("[{time}] {}: {}", speaker(entry.role), entry.content);
    if let Some(handle) = &entry.image_ref {
        let _ = write!(out, "\n    [image: {handle}]");
    }
    if let Some(metadata) = &entry.metadata {
        let _ = write!(out, "\n    ({metadata})");
    }
    out
}

pub fn render_attachment(summary: &AttachmentSummary) -> String {
    format!("{} ({}, {})", summary.name, summary.mime_type, summary.size_label())
}

/// Input prompt, showing the staged attachment and any text kept in the draft
pub fn prompt(view: &SessionView) -> String {
    let attachment = view
        .attachment
        .as_ref()
        .map(|summary| format!("[{} {}] ", summary.name, summary.size_label()));
    let kept_text = Some(view.draft_text.as_str()).filter(|text| !text.trim().is_empty());

    match (attachment, kept_text) {
        (None, None) => "> ".to_string(),
        (Some(attachment), None) => format!("{attachment}ask about the image > "),
        (attachment, Some(text)) => format!(
            "{}\"{text}\" (Enter to resend) > ",
            attachment.unwrap_or_default()
        ),
    }
}
