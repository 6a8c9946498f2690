pub mod episode;
pub mod home;

pub use episode::EpisodeDetail;
pub use home::Home;
