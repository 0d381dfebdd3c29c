pub mod interaction_log;

pub use interaction_log::{HTTP_INTERACTION_TARGET, HttpInteractionLogger, SpecWithCounter};
