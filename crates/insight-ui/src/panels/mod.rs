pub mod assistant;
pub mod conversation;
pub mod history;
pub mod settings;
