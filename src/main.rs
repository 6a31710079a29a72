use anyhow::Context;
use chatlist::config::ClientConfig;
use chatlist::types::{
    ChatListGroup, Draft, Message, MessageId, Peer, PeerId, PinnedType, Presence, ReadCounters,
    RenderedPeer, User,
};
use chatlist::{ChatListRow, ChatRowInput, MenuEntry, RowContext};
use chrono::Local;
use clap::Parser;
use listcore::{MenuData, build_menu};
use log::{error, info};
use serde::Deserialize;
use std::path::PathBuf;

// Renders chat-list rows and their context menus from a JSON fixture.
//
// Usage:
//   cargo run                                   # built-in sample rows
//   cargo run -- --fixture rows.json            # rows from a fixture
//   cargo run -- -f rows.json --width 320       # narrower column

#[derive(Parser, Debug)]
#[command(about = "Chat list row preview")]
struct Args {
    /// JSON fixture with the account and its rows.
    #[arg(short, long)]
    fixture: Option<PathBuf>,
    /// Column width in points.
    #[arg(short, long, default_value_t = 400.0)]
    width: f32,
    /// Client configuration JSON.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Deserialize)]
struct Fixture {
    account: PeerId,
    #[serde(default)]
    is_premium: bool,
    rows: Vec<FixtureRow>,
}

#[derive(Deserialize)]
struct FixtureRow {
    peer: RenderedPeer,
    #[serde(default)]
    messages: Vec<Message>,
    #[serde(default)]
    read_state: Option<ReadCounters>,
    #[serde(default)]
    draft: Option<Draft>,
    #[serde(default)]
    pinned_type: PinnedType,
    #[serde(default)]
    presence: Option<Presence>,
    #[serde(default)]
    is_muted: bool,
    #[serde(default)]
    group: ChatListGroup,
}

impl FixtureRow {
    fn into_input(self) -> ChatRowInput {
        let mut input = ChatRowInput::new(self.peer);
        input.messages = self.messages;
        input.read_state = self.read_state;
        input.draft = self.draft;
        input.pinned_type = self.pinned_type;
        input.presence = self.presence;
        input.is_muted = self.is_muted;
        input.associated_group = self.group;
        input
    }
}

fn sample_fixture() -> Fixture {
    let account = PeerId::user(1);
    let friend = PeerId::user(2);
    let now = Local::now().timestamp() as i32;
    let mut message = Message::new(MessageId::new(friend, 10), now - 90, "See you at eight?");
    message.author = Some(Peer::User(User::new(friend, "Ada")));
    Fixture {
        account,
        is_premium: false,
        rows: vec![
            FixtureRow {
                peer: RenderedPeer::new(Peer::User(User::new(friend, "Ada"))),
                messages: vec![message],
                read_state: Some(ReadCounters {
                    count: 3,
                    ..Default::default()
                }),
                draft: None,
                pinned_type: PinnedType::Pinned,
                presence: Some(Presence::online_until(now + 60)),
                is_muted: false,
                group: ChatListGroup::Root,
            },
            FixtureRow {
                peer: RenderedPeer::new(Peer::User(User::new(account, "Me"))),
                messages: Vec::new(),
                read_state: None,
                draft: None,
                pinned_type: PinnedType::Unpinned,
                presence: None,
                is_muted: false,
                group: ChatListGroup::Root,
            },
        ],
    }
}

fn print_menu(entries: &[MenuEntry], depth: usize) {
    for entry in entries {
        match entry {
            MenuEntry::Separator => info!("{:indent$}--", "", indent = depth * 2),
            MenuEntry::Item(item) => {
                let mark = if item.checked { "* " } else { "" };
                info!("{:indent$}{mark}{}", "", item.label, indent = depth * 2);
                print_menu(&item.submenu, depth + 1);
            }
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            ClientConfig::from_json(&json).context("parsing config")?
        }
        None => ClientConfig::default(),
    };
    let fixture = match &args.fixture {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading fixture {}", path.display()))?;
            serde_json::from_str(&json).context("parsing fixture")?
        }
        None => sample_fixture(),
    };

    let mut context = RowContext::new(fixture.account);
    context.layout = config.layout;
    context.time_difference = config.time_difference;
    context.is_premium = fixture.is_premium;
    let caps = config.premium_limits.menu_capabilities();

    for row in fixture.rows {
        let row = ChatListRow::chat(row.into_input(), context.clone(), args.width);
        info!("----------------------------------------");
        info!(
            "{} | {} | {}",
            row.title().string(),
            row.ctx_date().map(|d| d.string()).unwrap_or_default(),
            row.badge().map(|b| b.text()).unwrap_or_default()
        );
        if let Some(message) = row.ctx_message_layout() {
            info!("  {}", message.text().string());
        }
        info!("  height {} online {:?}", row.height(), row.is_online());
        print_menu(&build_menu(&row.snapshot(), &MenuData::default(), &caps), 1);
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "{} [{:<5}] [{}] - {}",
                Local::now().format("%H:%M:%S"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    if let Err(e) = run(args) {
        error!("{e:#}");
        std::process::exit(1);
    }
}
