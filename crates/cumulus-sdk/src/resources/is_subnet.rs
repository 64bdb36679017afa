use crate::context::Context;
use crate::error::SdkError;
use crate::inputs::InputMap;
use crate::output::Output;
use crate::urn::Urn;

pub const TYPE_TOKEN: &str = "ibmcloud:index/isSubnet:IsSubnet";

#[derive(Clone)]
pub struct IsSubnetArgs {
    pub name: Output<String>,
    /// Id of the owning VPC.
    pub vpc: Output<String>,
    /// e.g. "us-south-1"
    pub zone: Output<String>,
    /// CIDR notation, e.g. "10.240.0.0/24". Checked by the engine, not here.
    pub ipv4_cidr_block: Option<Output<String>>,
    pub resource_group: Option<Output<String>>,
}

/// An address range inside a VPC, bound to one zone.
pub struct IsSubnet {
    pub urn: Output<Urn>,
    pub id: Output<String>,
    pub name: Output<String>,
    pub vpc: Output<String>,
    pub zone: Output<String>,
    pub ipv4_cidr_block: Output<String>,
    pub resource_group: Output<String>,
    pub available_ipv4_address_count: Output<u32>,
    pub status: Output<String>,
}

impl IsSubnet {
    pub fn new(ctx: &Context, name: &str, args: IsSubnetArgs) -> Result<Self, SdkError> {
        let mut inputs = InputMap::new();
        inputs.insert("name", &args.name);
        inputs.insert("vpc", &args.vpc);
        inputs.insert("zone", &args.zone);
        inputs.insert_opt("ipv4CidrBlock", args.ipv4_cidr_block.as_ref());
        inputs.insert_opt("resourceGroup", args.resource_group.as_ref());

        let registered = ctx.register(TYPE_TOKEN, name, inputs)?;
        Ok(Self {
            urn: registered.urn(),
            id: registered.id(),
            name: registered.output("name"),
            vpc: registered.output("vpc"),
            zone: registered.output("zone"),
            ipv4_cidr_block: registered.output("ipv4CidrBlock"),
            resource_group: registered.output("resourceGroup"),
            available_ipv4_address_count: registered.output("availableIpv4AddressCount"),
            status: registered.output("status"),
        })
    }
}
