//! cumulus-sdk
//!
//! Program-side object model for declaring IBM Cloud infrastructure.
//! Programs declare resources against a [`Context`]; a [`ResourceMonitor`]
//! (the engine) decides what registering them means.
//!
//! Public API:
//! - `run()` — evaluate a program, wait for every registration, resolve exports
//! - `Output<T>` — forward reference to an engine-computed value
//! - `resources` — the provider's resource kinds

pub mod config;
pub mod context;
pub mod error;
pub mod inputs;
pub mod monitor;
pub mod output;
pub mod resources;
pub mod urn;

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;

pub use crate::config::{Config, RunInfo};
pub use crate::context::{Context, Declaration, RegisteredResource};
pub use crate::error::SdkError;
pub use crate::inputs::InputMap;
pub use crate::monitor::{
    BoxFuture, RegisterResourceRequest, RegisterResourceResponse, ResourceMonitor, StackOutputs,
    UNKNOWN_VALUE,
};
pub use crate::output::{Output, Resolution, Resolved};
pub use crate::urn::Urn;

/// Evaluate a program: declare → wait for registrations → export.
///
/// A blank stack or project is refused before anything is declared. The
/// first registration error wins over later ones; exports are only
/// resolved and handed to the monitor once every resource has settled.
pub async fn run<F, Fut>(
    info: RunInfo,
    monitor: Arc<dyn ResourceMonitor>,
    program: F,
) -> Result<StackOutputs, SdkError>
where
    F: FnOnce(Context) -> Fut,
    Fut: Future<Output = Result<(), SdkError>>,
{
    info.validate()?;
    tracing::info!(
        project = %info.project,
        stack = %info.stack,
        dry_run = info.dry_run,
        "evaluating program"
    );
    let ctx = Context::new(info, monitor);

    program(ctx.clone()).await?;

    let mut first_error = None;
    for handle in ctx.take_pending() {
        let outcome = match handle.await {
            Ok(result) => result,
            Err(e) => Err(SdkError::Task(e.to_string())),
        };
        if let Err(e) = outcome {
            first_error.get_or_insert(e);
        }
    }
    if let Some(e) = first_error {
        return Err(e);
    }

    let mut outputs = StackOutputs::new();
    for (name, output) in ctx.exports() {
        let value = output.value().await?.unwrap_or(Value::Null);
        outputs.insert(name, value);
    }

    tracing::info!(
        resources = ctx.declarations().len(),
        outputs = outputs.len(),
        "program evaluated"
    );
    ctx.monitor().register_stack_outputs(outputs.clone()).await?;

    Ok(outputs)
}
