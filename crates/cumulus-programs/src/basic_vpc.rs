//! Resource group → VPC → subnet, wired together by id.

use cumulus_sdk::resources::{
    IsSubnet, IsSubnetArgs, IsVpc, IsVpcArgs, ResourceGroup, ResourceGroupArgs, tags,
};
use cumulus_sdk::{Context, SdkError};

use crate::{EXAMPLE_TAGS, stack_name};

pub const ZONE: &str = "us-south-1";
pub const SUBNET_CIDR: &str = "10.240.0.0/24";

pub async fn program(ctx: Context) -> Result<(), SdkError> {
    let stack = ctx.stack().to_string();

    let resource_group = ResourceGroup::new(
        &ctx,
        "example-rg",
        ResourceGroupArgs {
            name: stack_name("pulumi-example-rg", &stack).into(),
            tags: Some(tags(EXAMPLE_TAGS).into()),
        },
    )?;

    let vpc = IsVpc::new(
        &ctx,
        "example-vpc",
        IsVpcArgs {
            name: stack_name("pulumi-example-vpc", &stack).into(),
            resource_group: Some(resource_group.id.clone()),
            tags: Some(tags(["pulumi", "example", "networking"]).into()),
        },
    )?;

    let subnet = IsSubnet::new(
        &ctx,
        "example-subnet",
        IsSubnetArgs {
            name: stack_name("pulumi-example-subnet", &stack).into(),
            vpc: vpc.id.clone(),
            zone: ZONE.into(),
            ipv4_cidr_block: Some(SUBNET_CIDR.into()),
            resource_group: Some(resource_group.id.clone()),
        },
    )?;

    ctx.export("resourceGroupId", &resource_group.id);
    ctx.export("resourceGroupName", &resource_group.name);
    ctx.export("vpcId", &vpc.id);
    ctx.export("vpcName", &vpc.name);
    ctx.export("subnetId", &subnet.id);
    ctx.export("subnetCidr", &subnet.ipv4_cidr_block);

    Ok(())
}
