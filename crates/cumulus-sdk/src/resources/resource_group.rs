use crate::context::Context;
use crate::error::SdkError;
use crate::inputs::InputMap;
use crate::output::Output;
use crate::urn::Urn;

pub const TYPE_TOKEN: &str = "ibmcloud:index/resourceGroup:ResourceGroup";

#[derive(Clone)]
pub struct ResourceGroupArgs {
    pub name: Output<String>,
    pub tags: Option<Output<Vec<String>>>,
}

/// Logical container grouping related resources for billing and access.
pub struct ResourceGroup {
    pub urn: Output<Urn>,
    pub id: Output<String>,
    pub name: Output<String>,
    pub tags: Output<Option<Vec<String>>>,
    pub crn: Output<String>,
    pub state: Output<String>,
}

impl ResourceGroup {
    pub fn new(ctx: &Context, name: &str, args: ResourceGroupArgs) -> Result<Self, SdkError> {
        let mut inputs = InputMap::new();
        inputs.insert("name", &args.name);
        inputs.insert_opt("tags", args.tags.as_ref());

        let registered = ctx.register(TYPE_TOKEN, name, inputs)?;
        Ok(Self {
            urn: registered.urn(),
            id: registered.id(),
            name: registered.output("name"),
            tags: registered.output("tags"),
            crn: registered.output("crn"),
            state: registered.output("state"),
        })
    }
}
