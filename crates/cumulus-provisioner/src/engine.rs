use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use cumulus_sdk::{
    BoxFuture, RegisterResourceRequest, RegisterResourceResponse, ResourceMonitor, SdkError,
    StackOutputs, UNKNOWN_VALUE, Urn,
};
use serde_json::{Map, Value};

use crate::error::ProvisionerError;
use crate::graph::DependencyGraph;
use crate::kind::{ProviderEnv, ResourceKind};
use crate::kinds;
use crate::persistence::StatePersistence;
use crate::state::{ResourceState, ResourceStatus, StackState};
use crate::validate::Fields;

/// Engine settings for one evaluation.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub project: String,
    pub stack: String,
    pub dry_run: bool,
    pub env: ProviderEnv,
}

impl EngineSettings {
    pub fn new(project: impl Into<String>, stack: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            stack: stack.into(),
            dry_run: false,
            env: ProviderEnv::default(),
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// One accepted registration, in arrival order.
#[derive(Debug, Clone)]
pub struct Registration {
    pub urn: Urn,
    pub type_token: String,
    /// `None` during preview.
    pub id: Option<String>,
    pub status: Option<ResourceStatus>,
    pub dependencies: BTreeSet<Urn>,
    pub inputs: Map<String, Value>,
    pub outputs: Map<String, Value>,
}

/// A local stand-in for the provider engine.
///
/// Checks what the cloud API would check, assigns ids, and records state;
/// it never calls the cloud. A registration is only accepted once every
/// resource it depends on has been accepted, so the log is always in
/// dependency order.
pub struct LocalEngine {
    settings: EngineSettings,
    kinds: HashMap<&'static str, Box<dyn ResourceKind>>,
    persistence: Option<StatePersistence>,
    previous: StackState,
    inner: Mutex<EngineInner>,
}

#[derive(Default)]
struct EngineInner {
    log: Vec<Registration>,
    outputs: Option<StackOutputs>,
}

impl LocalEngine {
    /// In-memory engine with no prior state.
    pub fn new(settings: EngineSettings) -> Self {
        Self::with_state(settings, None, StackState::default())
    }

    /// Engine backed by a state file; earlier ids are reused.
    pub async fn open(
        settings: EngineSettings,
        persistence: StatePersistence,
    ) -> Result<Self, ProvisionerError> {
        let previous = persistence.load().await?;
        if !previous.stack.is_empty() && previous.stack != settings.stack {
            return Err(ProvisionerError::State(format!(
                "state file {} belongs to stack '{}', not '{}'",
                persistence.local_path.display(),
                previous.stack,
                settings.stack
            )));
        }
        Ok(Self::with_state(settings, Some(persistence), previous))
    }

    fn with_state(
        settings: EngineSettings,
        persistence: Option<StatePersistence>,
        previous: StackState,
    ) -> Self {
        let kinds = kinds::ibmcloud()
            .into_iter()
            .map(|k| (k.type_token(), k))
            .collect();
        Self {
            settings,
            kinds,
            persistence,
            previous,
            inner: Mutex::new(EngineInner::default()),
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    fn lock(&self) -> MutexGuard<'_, EngineInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Accepted registrations, in arrival order.
    pub fn registrations(&self) -> Vec<Registration> {
        self.lock().log.clone()
    }

    /// Stack outputs, once the program has finished.
    pub fn stack_outputs(&self) -> Option<StackOutputs> {
        self.lock().outputs.clone()
    }

    pub fn graph(&self) -> Result<DependencyGraph, ProvisionerError> {
        DependencyGraph::from_registrations(&self.lock().log)
    }

    /// State as it would be written after this evaluation.
    pub fn state(&self) -> StackState {
        let inner = self.lock();
        let resources = inner
            .log
            .iter()
            .filter_map(|r| {
                let id = r.id.clone()?;
                Some((
                    r.urn.clone(),
                    ResourceState {
                        type_token: r.type_token.clone(),
                        id,
                        status: r.status.unwrap_or(ResourceStatus::Created),
                        inputs: r.inputs.clone(),
                        outputs: r.outputs.clone(),
                        dependencies: r.dependencies.clone(),
                    },
                ))
            })
            .collect();
        StackState {
            project: self.settings.project.clone(),
            stack: self.settings.stack.clone(),
            resources,
            outputs: inner.outputs.clone().unwrap_or_default(),
        }
    }

    /// Validate, assign an id and record one resource.
    pub fn register(
        &self,
        request: RegisterResourceRequest,
    ) -> Result<RegisterResourceResponse, ProvisionerError> {
        let urn = request.urn;
        if urn.stack != self.settings.stack || urn.project != self.settings.project {
            return Err(ProvisionerError::State(format!(
                "{urn} does not belong to {}/{}",
                self.settings.project, self.settings.stack
            )));
        }
        let kind = self
            .kinds
            .get(request.type_token.as_str())
            .ok_or_else(|| ProvisionerError::UnsupportedType(request.type_token.clone()))?;

        let mut inner = self.lock();
        if inner.log.iter().any(|r| r.urn == urn) {
            return Err(ProvisionerError::Duplicate {
                urn: urn.to_string(),
            });
        }
        for dependency in &request.dependencies {
            if !inner.log.iter().any(|r| &r.urn == dependency) {
                return Err(ProvisionerError::UnknownDependency {
                    urn: urn.to_string(),
                    dependency: dependency.to_string(),
                });
            }
        }

        kind.validate(&Fields {
            urn: &urn,
            inputs: &request.inputs,
            dry_run: self.settings.dry_run,
        })?;

        let env = &self.settings.env;
        let mut outputs = request.inputs.clone();
        outputs.extend(kind.defaults(&request.inputs, env));

        let previous = self
            .previous
            .resources
            .get(&urn)
            .filter(|rs| rs.type_token == request.type_token);

        let (id, status) = if self.settings.dry_run {
            for key in kind.computed_keys() {
                outputs.insert((*key).to_string(), Value::String(UNKNOWN_VALUE.to_string()));
            }
            if let Some(rs) = previous {
                copy_stable(&**kind, rs, &mut outputs);
            }
            (previous.map(|rs| rs.id.clone()), None)
        } else {
            let (id, status) = match previous {
                Some(rs) => (rs.id.clone(), ResourceStatus::Same),
                None => (kind.new_id(&request.inputs, env), ResourceStatus::Created),
            };
            let mut computed = kind.computed(&id, &request.inputs, env);
            if let Some(rs) = previous {
                copy_stable(&**kind, rs, &mut computed);
            }
            outputs.extend(computed);
            (Some(id), Some(status))
        };

        tracing::info!(
            urn = %urn,
            kind = kind.label(),
            id = id.as_deref().unwrap_or("<unknown>"),
            dependencies = request.dependencies.len(),
            dry_run = self.settings.dry_run,
            "resource registered"
        );

        inner.log.push(Registration {
            urn: urn.clone(),
            type_token: request.type_token,
            id: id.clone(),
            status,
            dependencies: request.dependencies,
            inputs: request.inputs,
            outputs: outputs.clone(),
        });

        Ok(RegisterResourceResponse { urn, id, outputs })
    }

    /// Record stack outputs and, outside preview, flush state.
    pub async fn complete(&self, outputs: StackOutputs) -> Result<(), ProvisionerError> {
        let stale: Vec<Urn> = {
            let mut inner = self.lock();
            inner.outputs = Some(outputs);
            self.previous
                .resources
                .keys()
                .filter(|urn| !inner.log.iter().any(|r| &r.urn == *urn))
                .cloned()
                .collect()
        };

        if self.settings.dry_run {
            tracing::info!("preview complete, state left untouched");
            return Ok(());
        }

        for urn in &stale {
            tracing::info!(urn = %urn, "removing stale state entry");
        }

        // Refuse to persist a graph that could not be replayed.
        self.graph()?.resolve_order()?;

        if let Some(persistence) = &self.persistence {
            persistence.flush(&self.state()).await?;
        }
        Ok(())
    }
}

/// Stable attributes keep the value recorded by an earlier apply.
fn copy_stable(kind: &dyn ResourceKind, previous: &ResourceState, outputs: &mut Map<String, Value>) {
    for key in kind.stable_keys() {
        if let Some(value) = previous.outputs.get(*key) {
            outputs.insert((*key).to_string(), value.clone());
        }
    }
}

impl ResourceMonitor for LocalEngine {
    fn is_dry_run(&self) -> bool {
        self.settings.dry_run
    }

    fn register_resource(
        &self,
        request: RegisterResourceRequest,
    ) -> BoxFuture<'_, Result<RegisterResourceResponse, SdkError>> {
        Box::pin(async move { self.register(request).map_err(SdkError::from) })
    }

    fn register_stack_outputs(&self, outputs: StackOutputs) -> BoxFuture<'_, Result<(), SdkError>> {
        Box::pin(async move { self.complete(outputs).await.map_err(SdkError::from) })
    }
}
