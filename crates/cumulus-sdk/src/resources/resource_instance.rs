use crate::context::Context;
use crate::error::SdkError;
use crate::inputs::InputMap;
use crate::output::Output;
use crate::urn::Urn;

pub const TYPE_TOKEN: &str = "ibmcloud:index/resourceInstance:ResourceInstance";

/// A catalog service instance, e.g. Cloud Object Storage.
#[derive(Clone)]
pub struct ResourceInstanceArgs {
    pub name: Output<String>,
    /// Catalog service name, e.g. "cloud-object-storage"
    pub service: Output<String>,
    /// Pricing plan, e.g. "standard"
    pub plan: Output<String>,
    /// Region or "global"
    pub location: Output<String>,
    pub resource_group_id: Option<Output<String>>,
    pub tags: Option<Output<Vec<String>>>,
}

pub struct ResourceInstance {
    pub urn: Output<Urn>,
    pub id: Output<String>,
    pub name: Output<String>,
    pub service: Output<String>,
    pub plan: Output<String>,
    pub location: Output<String>,
    pub resource_group_id: Output<String>,
    pub crn: Output<String>,
    pub state: Output<String>,
}

impl ResourceInstance {
    pub fn new(ctx: &Context, name: &str, args: ResourceInstanceArgs) -> Result<Self, SdkError> {
        let mut inputs = InputMap::new();
        inputs.insert("name", &args.name);
        inputs.insert("service", &args.service);
        inputs.insert("plan", &args.plan);
        inputs.insert("location", &args.location);
        inputs.insert_opt("resourceGroupId", args.resource_group_id.as_ref());
        inputs.insert_opt("tags", args.tags.as_ref());

        let registered = ctx.register(TYPE_TOKEN, name, inputs)?;
        Ok(Self {
            urn: registered.urn(),
            id: registered.id(),
            name: registered.output("name"),
            service: registered.output("service"),
            plan: registered.output("plan"),
            location: registered.output("location"),
            resource_group_id: registered.output("resourceGroupId"),
            crn: registered.output("crn"),
            state: registered.output("state"),
        })
    }
}
