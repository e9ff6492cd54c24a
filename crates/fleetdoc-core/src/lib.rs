pub mod error;
pub use error::{CoreError, ServiceError};

pub mod client;
pub use client::{ClientProvider, DocumentServiceClient};

pub mod gate;
pub use gate::{ConcurrencyGate, GatePermit};

pub mod resolve;
pub use resolve::{DocumentResolver, DocumentState, TargetResolver};

pub mod dispatch;
pub use dispatch::{CommandDispatcher, CommandQuery, MAX_RESULTS_LIMIT};

pub mod collect;
pub use collect::ResultCollector;

pub mod orchestrator;
pub use orchestrator::{Orchestrator, OrchestratorConfig};
