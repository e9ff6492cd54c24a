mod profile;
pub use profile::Profile;

mod target;
pub use target::{PlatformFilter, TargetInstance};

mod document;
pub use document::DocumentDefinition;

mod instance_map;
pub use instance_map::InstanceMap;

mod command;
pub use command::CommandSummary;

mod error;
pub use error::ModelError;

/// Name of a command document.
///
/// Unique within a profile; namespaces of different profiles are independent.
pub type DocumentName = String;

/// Remote-assigned identifier of a command invocation.
pub type CommandId = String;

/// Document version every update is issued against.
pub const LATEST_VERSION: &str = "$LATEST";
