pub mod documents;
pub mod download;
pub mod health;
pub mod simplify;
pub mod suggestions;
