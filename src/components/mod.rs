pub mod header;
pub mod player;

pub use header::Header;
pub use player::Player;
