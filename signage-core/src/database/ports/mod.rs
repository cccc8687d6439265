//! Repository ports grouped by aggregate. Implementations live in
//! `database::postgres` and `database::memory`.

pub mod assignments;
pub mod media;
pub mod playlists;
pub mod screens;
pub mod users;

pub use assignments::AssignmentRepository;
pub use media::MediaRepository;
pub use playlists::PlaylistRepository;
pub use screens::ScreenRepository;
pub use users::UserRepository;
