//! In-memory service used by the engine tests.

use std::{
    collections::{HashMap, HashSet},
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use fleetdoc_model::{CommandId, CommandSummary, DocumentDefinition, Profile, TargetInstance};

use super::{ClientProvider, DocumentServiceClient};
use crate::error::ServiceError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub profile: String,
    pub op: &'static str,
    pub arg: String,
}

#[derive(Default)]
struct State {
    existing: HashSet<(String, String)>,
    describe_errors: HashMap<String, ServiceError>,
    mutation_errors: HashMap<(String, &'static str), ServiceError>,
    session_errors: HashSet<String>,
    discovery_errors: HashSet<String>,
    failing_instances: HashSet<String>,
    panicking_instances: HashSet<String>,
    instances: HashMap<String, Vec<TargetInstance>>,
    commands: HashMap<String, Vec<CommandSummary>>,
    calls: Vec<Call>,
}

#[derive(Default)]
struct Shared {
    state: Mutex<State>,
    delay: Mutex<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    sent: AtomicUsize,
}

#[derive(Clone, Default)]
pub struct MockService {
    shared: Arc<Shared>,
}

impl MockService {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, State> {
        self.shared.state.lock().unwrap()
    }

    pub fn with_delay(self, delay: Duration) -> Self {
        *self.shared.delay.lock().unwrap() = delay;
        self
    }

    pub fn with_document(self, profile: &str, name: &str) -> Self {
        self.state()
            .existing
            .insert((profile.to_string(), name.to_string()));
        self
    }

    pub fn with_describe_error(self, profile: &str, err: ServiceError) -> Self {
        self.state().describe_errors.insert(profile.to_string(), err);
        self
    }

    /// Make `op` (`"create"` or `"update"`) fail for every document of `profile`.
    pub fn with_mutation_error(self, profile: &str, op: &'static str, err: ServiceError) -> Self {
        self.state()
            .mutation_errors
            .insert((profile.to_string(), op), err);
        self
    }

    pub fn with_session_error(self, profile: &str) -> Self {
        self.state().session_errors.insert(profile.to_string());
        self
    }

    pub fn with_discovery_error(self, profile: &str) -> Self {
        self.state().discovery_errors.insert(profile.to_string());
        self
    }

    pub fn with_failing_instance(self, instance: &str) -> Self {
        self.state().failing_instances.insert(instance.to_string());
        self
    }

    pub fn with_panicking_instance(self, instance: &str) -> Self {
        self.state().panicking_instances.insert(instance.to_string());
        self
    }

    pub fn with_instances(self, profile: &str, instances: Vec<TargetInstance>) -> Self {
        self.state().instances.insert(profile.to_string(), instances);
        self
    }

    pub fn with_commands(self, instance: &str, commands: Vec<CommandSummary>) -> Self {
        self.state().commands.insert(instance.to_string(), commands);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    pub fn calls_of(&self, op: &str) -> Vec<Call> {
        self.calls().into_iter().filter(|c| c.op == op).collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.shared.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn client_for(&self, profile: &str) -> MockClient {
        MockClient {
            profile: profile.to_string(),
            shared: Arc::clone(&self.shared),
        }
    }
}

#[async_trait]
impl ClientProvider for MockService {
    async fn client(
        &self,
        profile: &Profile,
    ) -> Result<Arc<dyn DocumentServiceClient>, ServiceError> {
        if self.state().session_errors.contains(profile.as_str()) {
            return Err(ServiceError::remote("session", "profile not configured"));
        }
        Ok(Arc::new(self.client_for(profile.as_str())))
    }
}

pub struct MockClient {
    profile: String,
    shared: Arc<Shared>,
}

impl MockClient {
    async fn call(&self, op: &'static str, arg: &str) {
        self.shared.state.lock().unwrap().calls.push(Call {
            profile: self.profile.clone(),
            op,
            arg: arg.to_string(),
        });

        let now = self.shared.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.shared.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = *self.shared.delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        } else {
            tokio::task::yield_now().await;
        }

        self.shared.in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    fn state(&self) -> std::sync::MutexGuard<'_, State> {
        self.shared.state.lock().unwrap()
    }

    fn mutation_error(&self, op: &'static str) -> Option<ServiceError> {
        self.state()
            .mutation_errors
            .get(&(self.profile.clone(), op))
            .cloned()
    }
}

#[async_trait]
impl DocumentServiceClient for MockClient {
    async fn describe_document(&self, name: &str) -> Result<(), ServiceError> {
        self.call("describe", name).await;
        let state = self.state();
        if let Some(err) = state.describe_errors.get(&self.profile) {
            return Err(err.clone());
        }
        if state
            .existing
            .contains(&(self.profile.clone(), name.to_string()))
        {
            Ok(())
        } else {
            Err(ServiceError::NotFound(name.to_string()))
        }
    }

    async fn create_document(&self, document: &DocumentDefinition) -> Result<(), ServiceError> {
        self.call("create", &document.name).await;
        if let Some(err) = self.mutation_error("create") {
            return Err(err);
        }
        self.state()
            .existing
            .insert((self.profile.clone(), document.name.clone()));
        Ok(())
    }

    async fn update_document(
        &self,
        document: &DocumentDefinition,
        version: &str,
    ) -> Result<(), ServiceError> {
        self.call("update", &format!("{}@{version}", document.name))
            .await;
        match self.mutation_error("update") {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn send_command(
        &self,
        instance_id: &str,
        document: &str,
        comment: &str,
    ) -> Result<CommandId, ServiceError> {
        self.call("send", &format!("{instance_id}:{document}:{comment}"))
            .await;
        if self.state().panicking_instances.contains(instance_id) {
            panic!("mock panic on {instance_id}");
        }
        if self.state().failing_instances.contains(instance_id) {
            return Err(ServiceError::remote("send_command", "InvalidInstanceId"));
        }
        let n = self.shared.sent.fetch_add(1, Ordering::SeqCst);
        Ok(format!("cmd-{n}"))
    }

    async fn list_commands(
        &self,
        instance_id: &str,
        max_results: u32,
    ) -> Result<Vec<CommandSummary>, ServiceError> {
        self.call("list_commands", &format!("{instance_id}:{max_results}"))
            .await;
        if self.state().failing_instances.contains(instance_id) {
            return Err(ServiceError::remote("list_commands", "InvalidInstanceId"));
        }
        Ok(self
            .state()
            .commands
            .get(instance_id)
            .map(|c| c.iter().take(max_results as usize).cloned().collect())
            .unwrap_or_default())
    }

    async fn list_instances(&self) -> Result<Vec<TargetInstance>, ServiceError> {
        self.call("list_instances", "").await;
        let state = self.state();
        if state.discovery_errors.contains(&self.profile) {
            return Err(ServiceError::remote("describe_instances", "UnauthorizedOperation"));
        }
        Ok(state
            .instances
            .get(&self.profile)
            .cloned()
            .unwrap_or_default())
    }
}
