// Per-browser simulator sessions held in memory, evicted after an idle TTL.

pub mod handlers;
pub mod store;
pub mod sweeper;

pub use store::{Session, SessionStore};
pub use sweeper::spawn_idle_sweeper;
