//! IBM Cloud resource kinds.
//!
//! Each kind pairs an args struct (what the program asks for) with a
//! resource struct whose fields are outputs the engine fills in.

pub mod is_subnet;
pub mod is_vpc;
pub mod resource_group;
pub mod resource_instance;

pub use is_subnet::{IsSubnet, IsSubnetArgs};
pub use is_vpc::{IsVpc, IsVpcArgs};
pub use resource_group::{ResourceGroup, ResourceGroupArgs};
pub use resource_instance::{ResourceInstance, ResourceInstanceArgs};

/// Collect string literals into a tag list.
pub fn tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    tags.into_iter().map(Into::into).collect()
}
