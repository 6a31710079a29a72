//! One-line summaries of the latest message for the chat list.

use crate::text::{StyledText, TextRole};
use crate::types::{ActionKind, Draft, FileKind, GroupItem, Media, Message};

fn media_label(media: &Media) -> Option<&'static str> {
    match media {
        Media::Image { .. } => Some("Photo"),
        Media::File { kind, .. } => Some(match kind {
            FileKind::Video => "Video",
            FileKind::InstantVideo => "Video message",
            FileKind::Sticker | FileKind::AnimatedSticker => "Sticker",
            FileKind::Voice => "Voice message",
            FileKind::Audio => "Audio",
            FileKind::Gif => "GIF",
            FileKind::Document => "File",
        }),
        Media::Location => Some("Location"),
        Media::Contact => Some("Contact"),
        Media::Poll { .. } => Some("Poll"),
        Media::Action(_) | Media::Other => None,
    }
}

fn action_text(action: &ActionKind, author: Option<&str>) -> String {
    let who = author.unwrap_or("Someone");
    match action {
        ActionKind::GroupCreated { title } => format!("{} created the group \"{}\"", who, title),
        ActionKind::MembersAdded => format!("{} added members", who),
        ActionKind::MemberJoined => format!("{} joined the group", who),
        ActionKind::MemberLeft => format!("{} left the group", who),
        ActionKind::TitleChanged { title } => format!("{} changed the name to \"{}\"", who, title),
        ActionKind::PhotoChanged => format!("{} updated the group photo", who),
        ActionKind::PinnedMessage => format!("{} pinned a message", who),
        ActionKind::TopicCreated { title } => format!("{} created the topic \"{}\"", who, title),
        ActionKind::PhoneCall { missed: true } => "Missed call".to_string(),
        ActionKind::PhoneCall { missed: false } => "Call".to_string(),
        ActionKind::Custom { text } => text.clone(),
    }
}

fn fold_lines(text: &str) -> String {
    text.split(['\n', '\r'])
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Summary text for a row.
///
/// A draft wins over the message. Albums (`messages_count > 1` with media)
/// are counted. Returns an empty text when nothing can be said.
pub fn chat_list_text(
    message: Option<&Message>,
    messages_count: usize,
    draft: Option<&Draft>,
) -> StyledText {
    let mut text = StyledText::new();

    if let Some(draft) = draft {
        text.push("Draft: ", TextRole::Secret)
            .push(fold_lines(&draft.text), TextRole::Gray);
        return text;
    }

    let Some(message) = message else {
        return text;
    };

    match message.effective_media() {
        Some(Media::Action(action)) => {
            let author = message.author.as_ref().map(|a| a.compact_display_title());
            text.push(action_text(action, author.as_deref()), TextRole::Gray);
        }
        Some(media) => {
            if let Some(label) = media_label(media) {
                let label = if messages_count > 1 {
                    match media {
                        Media::Image { .. } => format!("{} Photos", messages_count),
                        Media::File {
                            kind: FileKind::Video,
                            ..
                        } => format!("{} Videos", messages_count),
                        _ => format!("{} Files", messages_count),
                    }
                } else {
                    label.to_string()
                };
                text.push(label, TextRole::Accent);
                let caption = fold_lines(&message.text);
                if !caption.is_empty() {
                    text.push(", ", TextRole::Gray).push(caption, TextRole::Gray);
                }
            } else {
                text.push(fold_lines(&message.text), TextRole::Gray);
            }
        }
        None => {
            text.push(fold_lines(&message.text), TextRole::Gray);
        }
    }
    text
}

/// Text of the archive-folder row: the single chat's message, or the
/// titles of the archived chats with unread ones emphasised.
pub fn folder_text(items: &[GroupItem]) -> StyledText {
    if let [item] = items {
        return chat_list_text(item.message.as_ref(), 1, None);
    }

    let mut text = StyledText::new();
    let mut is_first = true;
    for item in items {
        let Some(peer) = item.peer.chat_main_peer() else {
            continue;
        };
        let title = peer.compact_display_title();
        if title.is_empty() {
            continue;
        }
        if !is_first {
            text.push(", ", TextRole::Text);
        }
        is_first = false;
        let role = if item.is_unread {
            TextRole::Text
        } else {
            TextRole::Gray
        };
        text.push(title, role);
    }
    text
}
