mod authority;
mod game_entry;

pub use authority::Authority;
pub use game_entry::GameEntry;
