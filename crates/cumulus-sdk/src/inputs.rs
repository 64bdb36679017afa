use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::SdkError;
use crate::monitor::UNKNOWN_VALUE;
use crate::output::{Output, Resolution};
use crate::urn::Urn;

/// Resource inputs keyed by provider property name, still unresolved.
#[derive(Default)]
pub struct InputMap {
    entries: Vec<(&'static str, Output<Value>)>,
}

impl InputMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<T>(&mut self, key: &'static str, output: &Output<T>)
    where
        T: Serialize + Clone + Send + Sync + 'static,
    {
        let value = output.try_apply(|v| serde_json::to_value(v).map_err(SdkError::from));
        self.entries.retain(|(k, _)| *k != key);
        self.entries.push((key, value));
    }

    /// Absent optional inputs are left out of the request entirely.
    pub fn insert_opt<T>(&mut self, key: &'static str, output: Option<&Output<T>>)
    where
        T: Serialize + Clone + Send + Sync + 'static,
    {
        if let Some(output) = output {
            self.insert(key, output);
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    /// Wait for every input. Unknown inputs become [`UNKNOWN_VALUE`]; the
    /// first failed input fails the whole map.
    pub async fn resolve(self) -> Result<(Map<String, Value>, BTreeSet<Urn>), Arc<SdkError>> {
        let settled =
            futures::future::join_all(self.entries.iter().map(|(_, o)| o.resolve())).await;

        let mut properties = Map::new();
        let mut dependencies = BTreeSet::new();
        for ((key, _), resolved) in self.entries.iter().zip(settled) {
            dependencies.extend(resolved.dependencies);
            let value = match resolved.resolution {
                Resolution::Known(value) => value,
                Resolution::Unknown => Value::String(UNKNOWN_VALUE.to_string()),
                Resolution::Failed(err) => return Err(err),
            };
            properties.insert((*key).to_string(), value);
        }
        Ok((properties, dependencies))
    }
}
