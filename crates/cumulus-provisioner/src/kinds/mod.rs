mod is_subnet;
mod is_vpc;
mod resource_group;
mod resource_instance;

pub use is_subnet::IsSubnetKind;
pub use is_vpc::IsVpcKind;
pub use resource_group::ResourceGroupKind;
pub use resource_instance::ResourceInstanceKind;

use crate::kind::ResourceKind;

/// Every resource kind the local engine can provision.
pub fn ibmcloud() -> Vec<Box<dyn ResourceKind>> {
    vec![
        Box::new(ResourceGroupKind),
        Box::new(IsVpcKind),
        Box::new(IsSubnetKind),
        Box::new(ResourceInstanceKind),
    ]
}

/// Random id in the VPC API's `<prefix>-<uuid>` shape.
pub(crate) fn vpc_style_id(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4())
}
