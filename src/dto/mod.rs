pub mod auth;
pub mod content;
pub mod dashboard;
pub mod leads;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod settings;
