mod common;

use chatlist::appearance::AppearanceController;
use chatlist::color::{PeerNameColor, SelectColorSource};
use chatlist::config::ClientConfig;
use chatlist::error::AppearanceError;
use chatlist::types::{Channel, ChannelKind, Peer, PeerId, StickerFile, User};
use common::{Call, HostCall, MockEngine, MockHost, init_logging};
use std::sync::Arc;

const CHANNEL: PeerId = PeerId::channel(5);

fn channel_source() -> SelectColorSource {
    SelectColorSource::Channel(Peer::Channel(Channel::new(CHANNEL, "News", ChannelKind::Broadcast)))
}

fn account_source(is_premium: bool) -> SelectColorSource {
    let mut user = User::new(PeerId::user(1), "Me");
    user.is_premium = is_premium;
    SelectColorSource::Account(Peer::User(user))
}

fn controller(
    engine: &Arc<MockEngine>,
    host: &Arc<MockHost>,
    source: SelectColorSource,
) -> AppearanceController {
    AppearanceController::new(
        engine.clone(),
        host.clone(),
        Arc::new(ClientConfig::default()),
        source,
    )
}

#[tokio::test]
async fn test_unboosted_channel_gets_boost_prompt() {
    init_logging();
    let engine = MockEngine::new();
    let host = MockHost::new();
    let mut appearance = controller(&engine, &host, channel_source());

    let result = appearance.apply().await;

    assert!(matches!(
        result,
        Err(AppearanceError::BoostRequired {
            level: 0,
            required: 1
        })
    ));
    assert_eq!(host.calls(), vec![HostCall::BoostPrompt(CHANNEL, 0, 1)]);
    assert!(engine.calls().is_empty());
    assert!(!appearance.state().saving);
}

#[tokio::test]
async fn test_boosted_channel_saves_color_and_icon() {
    init_logging();
    let engine = MockEngine::new();
    *engine.boost_level.lock().unwrap() = 2;
    let host = MockHost::new();
    let mut appearance = controller(&engine, &host, channel_source());
    appearance.state_mut().toggle_color(PeerNameColor::Green);
    appearance
        .state_mut()
        .set_background_icon(&StickerFile::new(99, "application/x-tgsticker"));

    appearance.apply().await.unwrap();

    assert_eq!(engine.calls(), vec![Call::PeerColor(CHANNEL, 3, Some(99))]);
    assert!(matches!(host.calls().as_slice(), [HostCall::Toast(_)]));
}

#[tokio::test]
async fn test_account_color_requires_premium() {
    init_logging();
    let engine = MockEngine::new();
    let host = MockHost::new();

    let mut free = controller(&engine, &host, account_source(false));
    assert!(matches!(free.apply().await, Err(AppearanceError::PremiumRequired)));
    assert_eq!(host.calls(), vec![HostCall::PremiumOffer]);

    let mut premium = controller(&engine, &host, account_source(true));
    premium.state_mut().remove_icon();
    premium.apply().await.unwrap();
    assert_eq!(engine.calls(), vec![Call::AccountColor(5, None)]);
}
