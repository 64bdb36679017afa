use std::collections::BTreeMap;
use std::env;

use crate::error::SdkError;

pub const STACK_ENV: &str = "PULUMI_STACK";
pub const PROJECT_ENV: &str = "PULUMI_PROJECT";
pub const DRY_RUN_ENV: &str = "PULUMI_DRY_RUN";
pub const CONFIG_ENV: &str = "PULUMI_CONFIG";

/// Project used when none is supplied.
pub const DEFAULT_PROJECT: &str = "ibmcloud-examples";

/// Everything a program evaluation needs to know about where it runs.
#[derive(Debug, Clone)]
pub struct RunInfo {
    pub project: String,
    pub stack: String,
    pub dry_run: bool,
    pub config: Config,
}

impl RunInfo {
    pub fn new(project: impl Into<String>, stack: impl Into<String>) -> Self {
        let project = project.into();
        Self {
            config: Config::new(project.clone(), BTreeMap::new()),
            project,
            stack: stack.into(),
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_config(mut self, values: BTreeMap<String, String>) -> Self {
        self.config = Config::new(self.project.clone(), values);
        self
    }

    /// Stack and project must both be non-blank: they end up in resource
    /// names and in the state file path.
    pub fn validate(&self) -> Result<(), SdkError> {
        if self.stack.trim().is_empty() {
            return Err(SdkError::Config("stack name must not be blank".into()));
        }
        if self.project.trim().is_empty() {
            return Err(SdkError::Config("project name must not be blank".into()));
        }
        Ok(())
    }

    /// Read the run context from `PULUMI_*` environment variables.
    pub fn from_env() -> Result<Self, SdkError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`RunInfo::from_env`], with variables taken from `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SdkError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let stack = lookup(STACK_ENV)
            .ok_or_else(|| SdkError::Config(format!("{STACK_ENV} is not set")))?;
        let project = lookup(PROJECT_ENV)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PROJECT.to_string());
        let dry_run = match lookup(DRY_RUN_ENV) {
            Some(v) => parse_bool(&v)
                .ok_or_else(|| SdkError::Config(format!("{DRY_RUN_ENV}={v} is not a boolean")))?,
            None => false,
        };
        let values = match lookup(CONFIG_ENV) {
            Some(raw) if !raw.trim().is_empty() => parse_config_json(&raw)?,
            _ => BTreeMap::new(),
        };

        let info = Self::new(project, stack)
            .with_dry_run(dry_run)
            .with_config(values);
        info.validate()?;
        Ok(info)
    }
}

/// Stack configuration, namespaced by project (`<project>:<key>`).
#[derive(Debug, Clone, Default)]
pub struct Config {
    project: String,
    values: BTreeMap<String, String>,
}

impl Config {
    pub fn new(project: impl Into<String>, values: BTreeMap<String, String>) -> Self {
        Self {
            project: project.into(),
            values,
        }
    }

    /// Keys without a namespace are looked up under the current project.
    fn full_key(&self, key: &str) -> String {
        if key.contains(':') {
            key.to_string()
        } else {
            format!("{}:{key}", self.project)
        }
    }

    /// Set a value; bare keys land under the current project.
    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        let key = self.full_key(key);
        self.values.insert(key, value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(&self.full_key(key)).map(String::as_str)
    }

    pub fn require(&self, key: &str) -> Result<&str, SdkError> {
        self.get(key)
            .ok_or_else(|| SdkError::MissingConfig(self.full_key(key)))
    }

    pub fn get_bool(&self, key: &str) -> Result<Option<bool>, SdkError> {
        self.get(key)
            .map(|v| {
                parse_bool(v).ok_or_else(|| {
                    SdkError::Config(format!("{} = {v} is not a boolean", self.full_key(key)))
                })
            })
            .transpose()
    }
}

/// `PULUMI_CONFIG` holds a JSON object of string values.
pub fn parse_config_json(raw: &str) -> Result<BTreeMap<String, String>, SdkError> {
    let json: serde_json::Value = serde_json::from_str(raw)?;
    let obj = json
        .as_object()
        .ok_or_else(|| SdkError::Config(format!("{CONFIG_ENV} is not a JSON object")))?;

    obj.iter()
        .map(|(k, v)| match v {
            serde_json::Value::String(s) => Ok((k.clone(), s.clone())),
            serde_json::Value::Null => Err(SdkError::Config(format!("config key {k} is null"))),
            other => Ok((k.clone(), other.to_string())),
        })
        .collect()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" | "" => Some(false),
        _ => None,
    }
}
