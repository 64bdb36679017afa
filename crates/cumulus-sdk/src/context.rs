use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tokio::task::JoinHandle;

use crate::config::{Config, RunInfo};
use crate::error::SdkError;
use crate::inputs::InputMap;
use crate::monitor::{RegisterResourceRequest, RegisterResourceResponse, ResourceMonitor, UNKNOWN_VALUE};
use crate::output::{Output, Resolution, Resolved};
use crate::urn::Urn;

/// A resource as the program declared it, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub urn: Urn,
    pub type_token: String,
    pub name: String,
    /// Provider property names supplied by the program.
    pub input_keys: Vec<String>,
}

/// Handle over one program evaluation. Cheap to clone.
#[derive(Clone)]
pub struct Context {
    inner: Arc<ContextInner>,
}

struct ContextInner {
    info: RunInfo,
    monitor: Arc<dyn ResourceMonitor>,
    declarations: Mutex<Vec<Declaration>>,
    exports: Mutex<Vec<(String, Output<Value>)>>,
    pending: Mutex<Vec<JoinHandle<Result<(), SdkError>>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Context {
    pub fn new(info: RunInfo, monitor: Arc<dyn ResourceMonitor>) -> Self {
        Self {
            inner: Arc::new(ContextInner {
                info,
                monitor,
                declarations: Mutex::new(Vec::new()),
                exports: Mutex::new(Vec::new()),
                pending: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn stack(&self) -> &str {
        &self.inner.info.stack
    }

    pub fn project(&self) -> &str {
        &self.inner.info.project
    }

    pub fn config(&self) -> &Config {
        &self.inner.info.config
    }

    pub fn is_dry_run(&self) -> bool {
        self.inner.info.dry_run || self.inner.monitor.is_dry_run()
    }

    /// Declared resources, in the order the program declared them.
    pub fn declarations(&self) -> Vec<Declaration> {
        lock(&self.inner.declarations).clone()
    }

    /// Declare a resource. Returns immediately; the registration runs on the
    /// tokio runtime once every input has settled.
    ///
    /// Must be called from within a tokio runtime.
    pub fn register(
        &self,
        type_token: &str,
        name: &str,
        inputs: InputMap,
    ) -> Result<RegisteredResource, SdkError> {
        let urn = Urn::new(self.stack(), self.project(), type_token, name);

        {
            let mut declarations = lock(&self.inner.declarations);
            if declarations.iter().any(|d| d.urn == urn) {
                return Err(SdkError::DuplicateResource(urn.to_string()));
            }
            declarations.push(Declaration {
                urn: urn.clone(),
                type_token: type_token.to_string(),
                name: name.to_string(),
                input_keys: inputs.keys().map(String::from).collect(),
            });
        }
        tracing::debug!(urn = %urn, "resource declared");

        let monitor = Arc::clone(&self.inner.monitor);
        let request_urn = urn.clone();
        let type_token = type_token.to_string();
        let name = name.to_string();
        let registration: Output<RegisterResourceResponse> = Output::from_future(async move {
            let (inputs, dependencies) = match inputs.resolve().await {
                Ok(resolved) => resolved,
                Err(err) => return Resolved::failed(err).with_dependency(request_urn),
            };
            let request = RegisterResourceRequest {
                urn: request_urn.clone(),
                type_token,
                name,
                inputs,
                dependencies,
            };
            match monitor.register_resource(request).await {
                Ok(response) => Resolved::known(response).with_dependency(request_urn),
                Err(err) => {
                    tracing::warn!(urn = %request_urn, error = %err, "resource registration failed");
                    Resolved::failed(Arc::new(err)).with_dependency(request_urn)
                }
            }
        });

        let driver = registration.clone();
        let handle = tokio::spawn(async move { driver.value().await.map(|_| ()) });
        lock(&self.inner.pending).push(handle);

        Ok(RegisteredResource { urn, registration })
    }

    /// Bind a stack output. Exporting a name twice keeps the latest binding.
    pub fn export<T>(&self, name: &str, output: &Output<T>)
    where
        T: Serialize + Clone + Send + Sync + 'static,
    {
        let value = output.try_apply(|v| serde_json::to_value(v).map_err(SdkError::from));
        let mut exports = lock(&self.inner.exports);
        exports.retain(|(n, _)| n != name);
        exports.push((name.to_string(), value));
    }

    pub fn export_names(&self) -> Vec<String> {
        lock(&self.inner.exports)
            .iter()
            .map(|(n, _)| n.clone())
            .collect()
    }

    pub(crate) fn monitor(&self) -> Arc<dyn ResourceMonitor> {
        Arc::clone(&self.inner.monitor)
    }

    pub(crate) fn take_pending(&self) -> Vec<JoinHandle<Result<(), SdkError>>> {
        std::mem::take(&mut *lock(&self.inner.pending))
    }

    pub(crate) fn exports(&self) -> Vec<(String, Output<Value>)> {
        lock(&self.inner.exports).clone()
    }
}

/// The engine's view of a declared resource.
#[derive(Clone)]
pub struct RegisteredResource {
    urn: Urn,
    registration: Output<RegisterResourceResponse>,
}

impl RegisteredResource {
    pub fn urn(&self) -> Output<Urn> {
        let urn = self.urn.clone();
        self.registration.apply(move |_| urn)
    }

    pub fn id(&self) -> Output<String> {
        self.registration.apply_resolution(|response| match response.id {
            Some(id) if id != UNKNOWN_VALUE => Resolution::Known(id),
            _ => Resolution::Unknown,
        })
    }

    /// Typed view over one provider output property.
    ///
    /// Properties the engine has not computed yet resolve as unknown; a
    /// missing property decodes from `null`, so it must map to an `Option`.
    pub fn output<T>(&self, field: &'static str) -> Output<T>
    where
        T: DeserializeOwned + Clone + Send + Sync + 'static,
    {
        let urn = self.urn.clone();
        self.registration
            .apply_resolution(move |response| decode_field(&urn, &response.outputs, field))
    }
}

fn decode_field<T: DeserializeOwned>(
    urn: &Urn,
    outputs: &Map<String, Value>,
    field: &str,
) -> Resolution<T> {
    let value = outputs.get(field).cloned().unwrap_or(Value::Null);
    if value.as_str() == Some(UNKNOWN_VALUE) {
        return Resolution::Unknown;
    }
    match serde_json::from_value(value) {
        Ok(decoded) => Resolution::Known(decoded),
        Err(e) => Resolution::Failed(Arc::new(SdkError::OutputDecode {
            urn: urn.to_string(),
            field: field.to_string(),
            message: e.to_string(),
        })),
    }
}
