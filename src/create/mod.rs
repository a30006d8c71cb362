//! Hierarchical node creation: intents, validation, and the resolver

mod intent;
mod resolver;

pub use intent::{CreationError, CreationIntent, CreationResult, ParentRef};
pub use resolver::Resolver;
