mod common;

use chatlist::Reactions;
use chatlist::types::{
    AvailableReaction, AvailableReactions, EmojiStatus, MessageId, Peer, PeerId, ReactionValue,
    ScreenRect, StickerFile, UpdateMessageReaction, User,
};
use common::{Call, MockEngine, eventually, init_logging};
use std::sync::atomic::Ordering;
use std::time::Duration;

fn catalogue(hash: i32) -> AvailableReactions {
    AvailableReactions {
        hash,
        reactions: vec![AvailableReaction {
            value: ReactionValue::builtin("👍"),
            title: "Thumbs Up".to_string(),
            is_premium: false,
        }],
    }
}

fn thumbs() -> Vec<UpdateMessageReaction> {
    vec![UpdateMessageReaction::new(ReactionValue::builtin("👍"))]
}

fn heart() -> Vec<UpdateMessageReaction> {
    vec![UpdateMessageReaction::new(ReactionValue::builtin("❤"))]
}

#[tokio::test]
async fn test_catalogue_refreshes_until_disposed() {
    init_logging();
    let engine = MockEngine::new();
    *engine.available_reactions.lock().unwrap() = Some(catalogue(1));
    let reactions = Reactions::new(engine.clone(), Duration::from_millis(20));

    assert!(eventually(|| reactions.available().is_some()).await);
    assert_eq!(reactions.available().map(|r| r.hash), Some(1));

    *engine.available_reactions.lock().unwrap() = Some(catalogue(2));
    assert!(eventually(|| reactions.available().map(|r| r.hash) == Some(2)).await);
    assert!(reactions.is_refreshing());

    reactions.dispose();
    assert!(!reactions.is_refreshing());
    let fetches = engine.reaction_fetches.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(80)).await;
    assert_eq!(engine.reaction_fetches.load(Ordering::SeqCst), fetches);
}

#[tokio::test]
async fn test_newer_reaction_supersedes_pending_one() {
    init_logging();
    let engine = MockEngine::new();
    engine.hang_reactions.store(true, Ordering::SeqCst);
    let reactions = Reactions::new(engine.clone(), Duration::from_secs(60));
    let message = MessageId::new(PeerId::user(2), 77);
    let other = MessageId::new(PeerId::user(2), 78);

    reactions.react(message, thumbs(), None, true);
    tokio::time::sleep(Duration::from_millis(20)).await;
    reactions.react(message, heart(), Some(ScreenRect::new(1.0, 2.0, 30.0, 30.0)), true);
    reactions.react(other, thumbs(), None, false);
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert!(eventually(|| engine.dropped() == 1).await);
    assert_eq!(reactions.pending_reactions(), 2);

    let interactive = reactions.interactive().unwrap();
    assert_eq!(interactive.message_id, other);
    assert!(reactions.interactive().is_none());

    reactions.dispose();
    assert!(eventually(|| engine.dropped() == 3).await);
    assert_eq!(reactions.pending_reactions(), 0);
    assert!(engine.calls().is_empty());
}

#[tokio::test]
async fn test_completed_reaction_reaches_engine() {
    init_logging();
    let engine = MockEngine::new();
    let reactions = Reactions::new(engine.clone(), Duration::from_secs(60));
    let message = MessageId::new(PeerId::user(2), 5);

    reactions.react(message, heart(), None, true);
    assert!(eventually(|| !engine.calls().is_empty()).await);
    assert_eq!(engine.calls(), vec![Call::Reactions(message, heart(), true)]);

    reactions.update_quick(ReactionValue::builtin("🔥"));
    assert!(eventually(|| engine.calls().len() == 2).await);
}

#[tokio::test]
async fn test_status_selection_rules() {
    init_logging();
    let engine = MockEngine::new();
    let reactions = Reactions::new(engine.clone(), Duration::from_secs(60));
    let mut user = User::new(PeerId::user(1), "Me");
    user.emoji_status = Some(EmojiStatus {
        file_id: 10,
        until: None,
    });
    let me = Peer::User(user);

    // Picking the current status clears it.
    reactions.set_status(StickerFile::new(10, "application/x-tgsticker"), &me, 1_000, Some(3_600), None);
    assert!(eventually(|| engine.calls().len() == 1).await);
    assert_eq!(engine.calls()[0], Call::EmojiStatus(None, Some(4_600)));
    assert!(reactions.interactive_status().is_none());

    let file = StickerFile::new(11, "application/x-tgsticker");
    let rect = ScreenRect::new(0.0, 0.0, 20.0, 20.0);
    reactions.set_status(file.clone(), &me, 1_000, None, Some(rect));
    assert!(eventually(|| engine.calls().len() == 2).await);
    assert_eq!(engine.calls()[1], Call::EmojiStatus(Some(file), None));
    let status = reactions.interactive_status().unwrap();
    assert_eq!(status.file_id, 11);
    assert_eq!(status.from_rect, Some(rect));

    // Bundled files are never a status.
    reactions.set_status(StickerFile::new(12, "bundle/emoji"), &me, 1_000, None, Some(rect));
    assert!(eventually(|| engine.calls().len() == 3).await);
    assert_eq!(engine.calls()[2], Call::EmojiStatus(None, None));
    assert!(reactions.interactive_status().is_none());
}
