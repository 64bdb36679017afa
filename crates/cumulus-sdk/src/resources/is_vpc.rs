use crate::context::Context;
use crate::error::SdkError;
use crate::inputs::InputMap;
use crate::output::Output;
use crate::urn::Urn;

pub const TYPE_TOKEN: &str = "ibmcloud:index/isVpc:IsVpc";

#[derive(Clone)]
pub struct IsVpcArgs {
    pub name: Output<String>,
    /// Resource group id; the account default group when omitted.
    pub resource_group: Option<Output<String>>,
    pub tags: Option<Output<Vec<String>>>,
}

/// A VPC: an isolated virtual network.
pub struct IsVpc {
    pub urn: Output<Urn>,
    pub id: Output<String>,
    pub name: Output<String>,
    pub resource_group: Output<String>,
    pub tags: Output<Option<Vec<String>>>,
    pub crn: Output<String>,
    pub default_security_group: Output<String>,
    pub status: Output<String>,
}

impl IsVpc {
    pub fn new(ctx: &Context, name: &str, args: IsVpcArgs) -> Result<Self, SdkError> {
        let mut inputs = InputMap::new();
        inputs.insert("name", &args.name);
        inputs.insert_opt("resourceGroup", args.resource_group.as_ref());
        inputs.insert_opt("tags", args.tags.as_ref());

        let registered = ctx.register(TYPE_TOKEN, name, inputs)?;
        Ok(Self {
            urn: registered.urn(),
            id: registered.id(),
            name: registered.output("name"),
            resource_group: registered.output("resourceGroup"),
            tags: registered.output("tags"),
            crn: registered.output("crn"),
            default_security_group: registered.output("defaultSecurityGroup"),
            status: registered.output("status"),
        })
    }
}
