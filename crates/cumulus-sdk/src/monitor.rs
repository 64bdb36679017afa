use std::collections::{BTreeMap, BTreeSet};
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SdkError;
use crate::urn::Urn;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Placeholder the engine and the SDK agree on for a value that is not
/// known until apply.
pub const UNKNOWN_VALUE: &str = "04da6b54-80e4-46f7-96ec-b56ff0331ba9";

/// Resolved stack outputs, keyed by export name. Unknown values are `null`.
pub type StackOutputs = BTreeMap<String, Value>;

/// One resource declaration, with every input already settled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResourceRequest {
    pub urn: Urn,
    /// e.g. "ibmcloud:index/isVpc:IsVpc"
    pub type_token: String,
    /// Logical name in the program, e.g. "example-vpc"
    pub name: String,
    /// Provider property names → values; unknown inputs carry [`UNKNOWN_VALUE`].
    pub inputs: Map<String, Value>,
    /// Resources whose outputs flowed into `inputs`.
    pub dependencies: BTreeSet<Urn>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResourceResponse {
    pub urn: Urn,
    /// `None` during preview of a resource that does not exist yet.
    pub id: Option<String>,
    pub outputs: Map<String, Value>,
}

/// The engine a program talks to.
///
/// Programs only describe desired state; whoever implements this trait
/// decides what registering a resource actually does (preview, apply,
/// test mocks). Methods return boxed futures for dyn compatibility.
pub trait ResourceMonitor: Send + Sync {
    /// True when the engine is previewing rather than applying.
    fn is_dry_run(&self) -> bool;

    fn register_resource(
        &self,
        request: RegisterResourceRequest,
    ) -> BoxFuture<'_, Result<RegisterResourceResponse, SdkError>>;

    /// Called once, after every resource registration has settled.
    fn register_stack_outputs(
        &self,
        outputs: StackOutputs,
    ) -> BoxFuture<'_, Result<(), SdkError>>;
}
