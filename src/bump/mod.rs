pub mod discover;
pub mod locate;
pub mod prompt;
pub mod update;
