use cumulus_sdk::resources::{ResourceGroup, ResourceGroupArgs, tags};
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

    ctx.export("resourceGroupId", &resource_group.id);
    ctx.export("resourceGroupName", &resource_group.name);

    Ok(())
}
