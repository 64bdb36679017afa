//! Resource group plus a Cloud Object Storage instance placed in it.

use cumulus_sdk::resources::{
    ResourceGroup, ResourceGroupArgs, ResourceInstance, ResourceInstanceArgs, tags,
};
use cumulus_sdk::{Context, SdkError};

use crate::{EXAMPLE_TAGS, stack_name};

pub async fn program(ctx: Context) -> Result<(), SdkError> {
    let resource_group = ResourceGroup::new(
        &ctx,
        "example-rg",
        ResourceGroupArgs {
            name: stack_name("pulumi-example-rg", ctx.stack()).into(),
            tags: Some(tags(EXAMPLE_TAGS).into()),
        },
    )?;

    let cos_instance = ResourceInstance::new(
        &ctx,
        "example-cos",
        ResourceInstanceArgs {
            name: stack_name("pulumi-example-cos", ctx.stack()).into(),
            service: "cloud-object-storage".into(),
            plan: "standard".into(),
            location: "global".into(),
            resource_group_id: Some(resource_group.id.clone()),
            tags: Some(tags(["pulumi", "example", "storage"]).into()),
        },
    )?;

    ctx.export("resource_group_id", &resource_group.id);
    ctx.export("resource_group_name", &resource_group.name);
    ctx.export("cos_instance_id", &cos_instance.id);
    ctx.export("cos_instance_crn", &cos_instance.crn);

    Ok(())
}
