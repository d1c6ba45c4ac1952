pub mod assistant;
pub mod email;

pub use assistant::{AssistantClient, HttpAssistantClient};
pub use email::{EmailDispatcher, HttpEmailDispatcher};
