//! cumulus-programs
//!
//! Example composition programs for IBM Cloud. Each program only declares
//! desired state; ordering, validation and ids come from the engine.

pub mod basic_vpc;
pub mod object_storage;
pub mod resource_group;

use std::fmt;
use std::str::FromStr;

use cumulus_sdk::{Context, SdkError};

/// Tags every example resource group carries.
pub const EXAMPLE_TAGS: [&str; 3] = ["pulumi", "example", "rust"];

/// `<prefix>-<stack>`, the naming scheme every example follows.
pub fn stack_name(prefix: &str, stack: &str) -> String {
    format!("{prefix}-{stack}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Program {
    /// Resource group, VPC and subnet.
    BasicVpc,
    /// Resource group only.
    ResourceGroup,
    /// Resource group and a Cloud Object Storage instance.
    ObjectStorage,
}

impl Program {
    pub const ALL: [Program; 3] = [Program::BasicVpc, Program::ResourceGroup, Program::ObjectStorage];

    pub fn name(self) -> &'static str {
        match self {
            Program::BasicVpc => "basic-vpc",
            Program::ResourceGroup => "resource-group",
            Program::ObjectStorage => "object-storage",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Program::BasicVpc => "resource group, VPC and subnet in us-south-1",
            Program::ResourceGroup => "a single tagged resource group",
            Program::ObjectStorage => "resource group and a Cloud Object Storage instance",
        }
    }

    pub async fn run(self, ctx: Context) -> Result<(), SdkError> {
        tracing::debug!(program = self.name(), stack = ctx.stack(), "declaring resources");
        match self {
            Program::BasicVpc => basic_vpc::program(ctx).await,
            Program::ResourceGroup => resource_group::program(ctx).await,
            Program::ObjectStorage => object_storage::program(ctx).await,
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Program {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Program::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| {
                let known: Vec<_> = Program::ALL.iter().map(|p| p.name()).collect();
                format!("unknown program '{s}' (expected one of: {})", known.join(", "))
            })
    }
}
