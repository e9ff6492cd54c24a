mod document;
pub use document::{DocumentResolver, DocumentState};

mod targets;
pub use targets::TargetResolver;
