use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SdkError;

/// Stable address of a declared resource.
///
/// Rendered as `urn:pulumi:<stack>::<project>::<type>::<name>`. Two
/// resources of the same type but different logical names have distinct
/// URNs, and the same declaration evaluated twice for one stack always
/// yields the same URN.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Urn {
    pub stack: String,
    pub project: String,
    pub type_token: String,
    pub name: String,
}

impl Urn {
    const PREFIX: &'static str = "urn:pulumi:";

    pub fn new(
        stack: impl Into<String>,
        project: impl Into<String>,
        type_token: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            stack: stack.into(),
            project: project.into(),
            type_token: type_token.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Urn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}{}::{}::{}::{}",
            Self::PREFIX,
            self.stack,
            self.project,
            self.type_token,
            self.name
        )
    }
}

impl FromStr for Urn {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix(Self::PREFIX)
            .ok_or_else(|| SdkError::InvalidUrn(s.to_string()))?;

        // The logical name may itself contain "::", so split from the left
        // a fixed number of times.
        let mut parts = rest.splitn(4, "::");
        let (Some(stack), Some(project), Some(type_token), Some(name)) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(SdkError::InvalidUrn(s.to_string()));
        };

        if [stack, project, type_token, name].iter().any(|p| p.is_empty()) {
            return Err(SdkError::InvalidUrn(s.to_string()));
        }

        Ok(Self::new(stack, project, type_token, name))
    }
}

impl TryFrom<String> for Urn {
    type Error = SdkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Urn> for String {
    fn from(urn: Urn) -> Self {
        urn.to_string()
    }
}
