pub mod assignments;
pub mod auth;
pub mod health;
pub mod media;
pub mod playlists;
pub mod screens;
