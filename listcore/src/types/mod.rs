pub mod chatlist;
pub mod file;
pub mod message;
pub mod notification;
pub mod peer;
pub mod presence;
pub mod reaction;

pub use chatlist::*;
pub use file::*;
pub use message::*;
pub use notification::*;
pub use peer::*;
pub use presence::*;
pub use reaction::*;
