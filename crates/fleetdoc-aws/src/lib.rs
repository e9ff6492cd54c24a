//! AWS implementation of the engine's service seams.
//!
//! Documents and commands go through Systems Manager, instance discovery through EC2.
//! A fresh SDK configuration is loaded for every task from the named shared-config profile.

mod client;
pub use client::AwsDocumentClient;

mod provider;
pub use provider::AwsClientProvider;

mod util;
