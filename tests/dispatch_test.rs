mod common;

use chatlist::config::ClientConfig;
use chatlist::dispatch::{ActionDispatcher, ConfirmOutcome, Destination, PremiumLimitKind};
use chatlist::engine::{PinLocation, TogglePinnedOutcome};
use chatlist::error::EngineError;
use chatlist::menu::load_menu;
use chatlist::mute::MuteDuration;
use chatlist::types::{
    ChatListFilter, ChatListFilterPreferences, ChatListGroup, FolderData, Peer, PeerId,
    PeerMessageSound, RenderedPeer, User,
};
use chatlist::{ChatListRow, ChatRowInput, MenuAction, RowContext, RowSnapshot};
use common::{Call, HostCall, MockEngine, MockHost, init_logging};
use std::sync::Arc;

const ACCOUNT: PeerId = PeerId::user(1);
const FRIEND: PeerId = PeerId::user(2);

fn friend_snapshot() -> RowSnapshot {
    let input = ChatRowInput::new(RenderedPeer::new(Peer::User(User::new(FRIEND, "Ada"))));
    ChatListRow::chat(input, RowContext::new(ACCOUNT), 400.0).snapshot()
}

fn folder(id: i32, include_peers: Vec<PeerId>) -> ChatListFilter {
    ChatListFilter::Filter {
        id,
        title: format!("Folder {id}"),
        data: FolderData {
            include_peers,
            emoticon: None,
        },
    }
}

fn setup() -> (Arc<MockEngine>, Arc<MockHost>, ActionDispatcher) {
    init_logging();
    let engine = MockEngine::new();
    let host = MockHost::new();
    let dispatcher = ActionDispatcher::new(
        engine.clone(),
        host.clone(),
        Arc::new(ClientConfig::default()),
    );
    (engine, host, dispatcher)
}

#[tokio::test]
async fn test_row_without_peer_is_a_no_op() {
    let (engine, host, dispatcher) = setup();
    let input = ChatRowInput::new(RenderedPeer::default());
    let snapshot = ChatListRow::chat(input, RowContext::new(ACCOUNT), 400.0).snapshot();

    assert!(dispatcher.dispatch(&snapshot, MenuAction::TogglePin).is_none());
    assert!(dispatcher.dispatch(&snapshot, MenuAction::ToggleMute).is_none());
    assert!(dispatcher.toggle_unread(&snapshot).is_none());
    assert!(engine.calls().is_empty());
    assert!(host.calls().is_empty());
}

#[tokio::test]
async fn test_pin_in_folder_over_limit_prompts_non_premium() {
    let (engine, host, dispatcher) = setup();
    *engine.pin_outcome.lock().unwrap() = Some(TogglePinnedOutcome::LimitExceeded);
    let mut snapshot = friend_snapshot();
    snapshot.filter = folder(7, vec![FRIEND]);

    dispatcher
        .dispatch(&snapshot, MenuAction::TogglePin)
        .unwrap()
        .await
        .unwrap();

    assert_eq!(
        engine.calls(),
        vec![Call::TogglePinned(PinLocation::Filter(7), FRIEND)]
    );
    assert_eq!(
        host.calls(),
        vec![HostCall::PremiumLimit(PremiumLimitKind::PinInFolders(7))]
    );
}

#[tokio::test]
async fn test_pin_in_archive_over_limit_prompts_non_premium() {
    let (engine, host, dispatcher) = setup();
    *engine.pin_outcome.lock().unwrap() = Some(TogglePinnedOutcome::LimitExceeded);
    let mut snapshot = friend_snapshot();
    snapshot.associated_group = ChatListGroup::Archive;

    dispatcher
        .dispatch(&snapshot, MenuAction::TogglePin)
        .unwrap()
        .await
        .unwrap();

    assert_eq!(
        engine.calls(),
        vec![Call::TogglePinned(PinLocation::Group(ChatListGroup::Archive), FRIEND)]
    );
    assert_eq!(host.calls(), vec![HostCall::PremiumLimit(PremiumLimitKind::PinInArchive)]);
}

#[tokio::test]
async fn test_premium_pin_limit_offers_folder_setup() {
    let (engine, host, dispatcher) = setup();
    *engine.pin_outcome.lock().unwrap() = Some(TogglePinnedOutcome::LimitExceeded);
    *host.confirm_outcome.lock().unwrap() = ConfirmOutcome::Third;
    let mut snapshot = friend_snapshot();
    snapshot.is_premium_account = true;

    dispatcher
        .dispatch(&snapshot, MenuAction::TogglePin)
        .unwrap()
        .await
        .unwrap();

    let calls = host.calls();
    assert_eq!(calls.len(), 2);
    match &calls[0] {
        HostCall::Confirm(request) => {
            assert_eq!(request.third_label.as_deref(), Some("Set Up Folders"))
        }
        other => panic!("expected a confirm, got {other:?}"),
    }
    assert_eq!(calls[1], HostCall::Navigate(Destination::FolderSettings));
}

#[tokio::test]
async fn test_topic_pin_limit_depends_on_plan() {
    let (engine, host, dispatcher) = setup();
    *engine.topic_pin_error.lock().unwrap() = Some(EngineError::LimitReached { count: 5 });
    let mut snapshot = friend_snapshot();
    snapshot.thread_id = Some(42);

    dispatcher
        .dispatch(&snapshot, MenuAction::TogglePin)
        .unwrap()
        .await
        .unwrap();
    assert_eq!(host.calls(), vec![HostCall::PremiumLimit(PremiumLimitKind::Pin)]);

    snapshot.is_premium_account = true;
    dispatcher
        .dispatch(&snapshot, MenuAction::TogglePin)
        .unwrap()
        .await
        .unwrap();
    assert!(matches!(host.calls().last(), Some(HostCall::Alert(text)) if text.contains('5')));
    assert_eq!(
        engine.calls(),
        vec![Call::ToggleTopicPinned(FRIEND, 42), Call::ToggleTopicPinned(FRIEND, 42)]
    );
}

#[tokio::test]
async fn test_cancelled_mute_picker_sends_nothing() {
    let (engine, host, dispatcher) = setup();
    let snapshot = friend_snapshot();

    dispatcher
        .dispatch(&snapshot, MenuAction::ToggleMute)
        .unwrap()
        .await
        .unwrap();

    assert_eq!(host.calls(), vec![HostCall::PickMute(MuteDuration::Forever)]);
    assert!(engine.calls().is_empty());
}

#[tokio::test]
async fn test_mute_uses_picked_interval_and_unmute_toggles() {
    let (engine, host, dispatcher) = setup();
    *host.mute_choice.lock().unwrap() = Some(MuteDuration::EightHours);
    let mut snapshot = friend_snapshot();

    dispatcher
        .dispatch(&snapshot, MenuAction::ToggleMute)
        .unwrap()
        .await
        .unwrap();

    snapshot.is_muted = true;
    dispatcher
        .dispatch(&snapshot, MenuAction::ToggleMute)
        .unwrap()
        .await
        .unwrap();

    assert_eq!(
        engine.calls(),
        vec![
            Call::MuteSetting(FRIEND, None, 8 * 60 * 60),
            Call::ToggleMuted(FRIEND, None),
        ]
    );
}

#[tokio::test]
async fn test_archive_from_root_animates_first() {
    let (engine, host, dispatcher) = setup();
    let mut snapshot = friend_snapshot();

    dispatcher
        .dispatch(&snapshot, MenuAction::ToggleArchive)
        .unwrap()
        .await
        .unwrap();
    assert_eq!(host.calls(), vec![HostCall::AnimateArchive(FRIEND)]);

    snapshot.group_id = ChatListGroup::Archive;
    dispatcher
        .dispatch(&snapshot, MenuAction::ToggleArchive)
        .unwrap()
        .await
        .unwrap();

    assert_eq!(
        engine.calls(),
        vec![
            Call::PeersGroup(vec![FRIEND], ChatListGroup::Archive),
            Call::PeersGroup(vec![FRIEND], ChatListGroup::Root),
        ]
    );
    assert_eq!(host.calls().len(), 1);
}

#[tokio::test]
async fn test_unread_mark_values() {
    let (engine, _host, dispatcher) = setup();
    let snapshot = friend_snapshot();

    dispatcher.toggle_unread(&snapshot).unwrap().await.unwrap();
    dispatcher
        .dispatch(&snapshot, MenuAction::MarkUnread)
        .unwrap()
        .await
        .unwrap();
    dispatcher
        .dispatch(&snapshot, MenuAction::MarkRead)
        .unwrap()
        .await
        .unwrap();

    let mut topic = snapshot.clone();
    topic.thread_id = Some(3);
    assert!(dispatcher.toggle_unread(&topic).is_none());
    assert!(dispatcher.dispatch(&topic, MenuAction::MarkUnread).is_none());

    assert_eq!(
        engine.calls(),
        vec![
            Call::UnreadMark(vec![FRIEND], None),
            Call::UnreadMark(vec![FRIEND], Some(true)),
            Call::UnreadMark(vec![FRIEND], Some(false)),
        ]
    );
}

#[tokio::test]
async fn test_topic_close_flips_state() {
    let (engine, _host, dispatcher) = setup();
    let mut snapshot = friend_snapshot();
    assert!(dispatcher.dispatch(&snapshot, MenuAction::ToggleTopicClosed).is_none());

    snapshot.thread_id = Some(9);
    snapshot.is_closed_topic = true;
    dispatcher
        .dispatch(&snapshot, MenuAction::ToggleTopicClosed)
        .unwrap()
        .await
        .unwrap();

    assert_eq!(engine.calls(), vec![Call::TopicClosed(FRIEND, 9, false)]);
}

#[tokio::test]
async fn test_full_folder_prompts_instead_of_adding() {
    let (engine, host, dispatcher) = setup();
    let others: Vec<PeerId> = (100..200).map(PeerId::user).collect();
    *engine.filters.lock().unwrap() = ChatListFilterPreferences {
        list: vec![folder(3, others)],
    };
    let snapshot = friend_snapshot();

    dispatcher
        .dispatch(&snapshot, MenuAction::AddToFolder { filter_id: 3 })
        .unwrap()
        .await
        .unwrap();

    assert!(engine.calls().is_empty());
    assert_eq!(host.calls(), vec![HostCall::PremiumLimit(PremiumLimitKind::ChatInFolders)]);
}

#[tokio::test]
async fn test_folder_toggle_adds_then_removes() {
    let (engine, _host, dispatcher) = setup();
    *engine.filters.lock().unwrap() = ChatListFilterPreferences {
        list: vec![folder(3, vec![PeerId::user(50)])],
    };
    let snapshot = friend_snapshot();

    dispatcher
        .dispatch(&snapshot, MenuAction::AddToFolder { filter_id: 3 })
        .unwrap()
        .await
        .unwrap();
    assert_eq!(
        engine.calls(),
        vec![Call::UpdateFilter(
            3,
            FolderData {
                include_peers: vec![PeerId::user(50), FRIEND],
                emoticon: None,
            }
        )]
    );

    *engine.filters.lock().unwrap() = ChatListFilterPreferences {
        list: vec![folder(3, vec![PeerId::user(50), FRIEND])],
    };
    dispatcher
        .dispatch(&snapshot, MenuAction::AddToFolder { filter_id: 3 })
        .unwrap()
        .await
        .unwrap();
    assert!(matches!(
        engine.calls().last(),
        Some(Call::UpdateFilter(3, data)) if data.include_peers == vec![PeerId::user(50)]
    ));
}

#[tokio::test]
async fn test_set_sound_previews_app_tone_for_default() {
    let (engine, host, dispatcher) = setup();
    *engine.app_tone.lock().unwrap() = PeerMessageSound::BundledModern { id: 2 };
    let snapshot = friend_snapshot();

    dispatcher
        .dispatch(&snapshot, MenuAction::SetSound { sound: PeerMessageSound::Default })
        .unwrap()
        .await
        .unwrap();
    dispatcher
        .dispatch(&snapshot, MenuAction::SetSound { sound: PeerMessageSound::None })
        .unwrap()
        .await
        .unwrap();

    assert_eq!(
        host.calls(),
        vec![HostCall::PlaySound(PeerMessageSound::BundledModern { id: 2 })]
    );
    assert_eq!(
        engine.calls(),
        vec![
            Call::Sound(FRIEND, None, PeerMessageSound::Default),
            Call::Sound(FRIEND, None, PeerMessageSound::None),
        ]
    );
}

#[tokio::test]
async fn test_clear_history_for_everyone_needs_permission() {
    let (engine, host, dispatcher) = setup();
    *host.confirm_outcome.lock().unwrap() = ConfirmOutcome::Ok { checked: true };
    let snapshot = friend_snapshot();

    dispatcher
        .dispatch(
            &snapshot,
            MenuAction::ClearHistory {
                can_delete_for_all: None,
            },
        )
        .unwrap()
        .await
        .unwrap();
    dispatcher
        .dispatch(
            &snapshot,
            MenuAction::ClearHistory {
                can_delete_for_all: Some(true),
            },
        )
        .unwrap()
        .await
        .unwrap();

    assert_eq!(
        engine.calls(),
        vec![
            Call::ClearHistory(FRIEND, None, false),
            Call::ClearHistory(FRIEND, None, true),
        ]
    );
}

#[tokio::test]
async fn test_cancelled_delete_keeps_chat() {
    let (engine, host, dispatcher) = setup();
    *host.confirm_outcome.lock().unwrap() = ConfirmOutcome::Cancel;
    let snapshot = friend_snapshot();

    dispatcher
        .dispatch(&snapshot, MenuAction::Delete)
        .unwrap()
        .await
        .unwrap();

    assert!(engine.calls().is_empty());
    assert_eq!(host.calls().len(), 1);
}

#[tokio::test]
async fn test_archive_row_actions_need_no_peer() {
    let (_engine, host, dispatcher) = setup();
    let input = ChatRowInput::new(RenderedPeer::default());
    let snapshot = ChatListRow::chat(input, RowContext::new(ACCOUNT), 400.0).snapshot();

    dispatcher
        .dispatch(&snapshot, MenuAction::CollapseArchive)
        .unwrap()
        .await
        .unwrap();
    assert_eq!(host.calls(), vec![HostCall::ArchiveCollapsed(true)]);
}

#[tokio::test]
async fn test_menu_loads_despite_failing_query() {
    let (engine, _host, _dispatcher) = setup();
    *engine.filters.lock().unwrap() = ChatListFilterPreferences {
        list: vec![folder(3, Vec::new())],
    };
    let engine: Arc<dyn chatlist::Engine> = engine;
    let snapshot = friend_snapshot();

    let menu = load_menu(&engine, &snapshot, &Default::default()).await;
    let labels: Vec<&str> = menu
        .iter()
        .filter_map(|e| e.as_item())
        .map(|i| i.label.as_str())
        .collect();
    assert!(labels.contains(&"Pin"));
    assert!(labels.contains(&"Add to Folder"));
}
