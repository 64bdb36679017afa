//! cumulus-provisioner
//!
//! Local engine that evaluates cumulus programs: it validates declared
//! resources the way the IBM Cloud API would, assigns ids, tracks the
//! dependency graph and persists stack state to disk. It never calls
//! the cloud.
//!
//! Public API:
//! - `LocalEngine` — the `ResourceMonitor` programs register against
//! - `evaluate()` — run a program against an engine, return outputs + graph order
//! - `StatePersistence` — atomic local state file per stack

pub mod engine;
pub mod error;
pub mod graph;
pub mod kind;
pub mod kinds;
pub mod persistence;
pub mod state;
pub mod validate;

use std::future::Future;
use std::sync::Arc;

use cumulus_sdk::{Context, RunInfo, SdkError, StackOutputs, Urn};

pub use crate::engine::{EngineSettings, LocalEngine, Registration};
pub use crate::error::ProvisionerError;
pub use crate::graph::DependencyGraph;
pub use crate::kind::{ProviderEnv, ResourceKind};
pub use crate::persistence::StatePersistence;
pub use crate::state::{ResourceState, ResourceStatus, StackState};

impl From<&RunInfo> for EngineSettings {
    fn from(info: &RunInfo) -> Self {
        EngineSettings::new(&info.project, &info.stack).with_dry_run(info.dry_run)
    }
}

/// What one program evaluation produced.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub outputs: StackOutputs,
    pub registrations: Vec<Registration>,
    /// Registered URNs, dependencies first.
    pub order: Vec<Urn>,
}

/// Evaluate a program against a local engine.
pub async fn evaluate<F, Fut>(
    info: RunInfo,
    engine: Arc<LocalEngine>,
    program: F,
) -> Result<Evaluation, SdkError>
where
    F: FnOnce(Context) -> Fut,
    Fut: Future<Output = Result<(), SdkError>>,
{
    let settings = engine.settings();
    if settings.stack != info.stack || settings.project != info.project {
        return Err(SdkError::Config(format!(
            "engine is set up for {}/{}, program runs as {}/{}",
            settings.project, settings.stack, info.project, info.stack
        )));
    }

    let outputs = cumulus_sdk::run(info, engine.clone(), program).await?;
    let order = engine.graph()?.resolve_order()?;

    Ok(Evaluation {
        outputs,
        registrations: engine.registrations(),
        order,
    })
}
