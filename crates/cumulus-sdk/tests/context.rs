use std::sync::{Arc, Mutex};

use serde_json::{Value, json};

use cumulus_sdk::resources::{ResourceGroup, ResourceGroupArgs, tags};
use cumulus_sdk::{
    BoxFuture, Context, InputMap, Output, RegisterResourceRequest, RegisterResourceResponse,
    ResourceMonitor, RunInfo, SdkError, StackOutputs, UNKNOWN_VALUE,
};

/// Echoes inputs back as outputs; ids are "<name>-id" unless previewing.
#[derive(Default)]
struct EchoMonitor {
    dry_run: bool,
    fail_on: Option<String>,
    seen: Mutex<Vec<RegisterResourceRequest>>,
    stack_outputs: Mutex<Option<StackOutputs>>,
}

impl ResourceMonitor for EchoMonitor {
    fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    fn register_resource(
        &self,
        request: RegisterResourceRequest,
    ) -> BoxFuture<'_, Result<RegisterResourceResponse, SdkError>> {
        Box::pin(async move {
            if self.fail_on.as_deref() == Some(request.name.as_str()) {
                return Err(SdkError::Engine(format!("{}: rejected", request.urn)));
            }
            let mut outputs = request.inputs.clone();
            outputs.insert(
                "crn".into(),
                if self.dry_run {
                    json!(UNKNOWN_VALUE)
                } else {
                    json!(format!("crn:{}", request.name))
                },
            );
            let response = RegisterResourceResponse {
                urn: request.urn.clone(),
                id: (!self.dry_run).then(|| format!("{}-id", request.name)),
                outputs,
            };
            self.seen.lock().unwrap().push(request);
            Ok(response)
        })
    }

    fn register_stack_outputs(&self, outputs: StackOutputs) -> BoxFuture<'_, Result<(), SdkError>> {
        Box::pin(async move {
            *self.stack_outputs.lock().unwrap() = Some(outputs);
            Ok(())
        })
    }
}

fn group_args(name: &str) -> ResourceGroupArgs {
    ResourceGroupArgs {
        name: name.into(),
        tags: Some(tags(["a", "b"]).into()),
    }
}

#[tokio::test]
async fn run_resolves_exports_after_registration() {
    let monitor = Arc::new(EchoMonitor::default());
    let outputs = cumulus_sdk::run(RunInfo::new("proj", "dev"), monitor.clone(), |ctx| async move {
        let rg = ResourceGroup::new(&ctx, "rg", group_args("group-dev"))?;
        ctx.export("id", &rg.id);
        ctx.export("name", &rg.name);
        ctx.export("tags", &rg.tags);
        Ok::<_, SdkError>(())
    })
    .await
    .unwrap();

    assert_eq!(outputs["id"], json!("rg-id"));
    assert_eq!(outputs["name"], json!("group-dev"));
    assert_eq!(outputs["tags"], json!(["a", "b"]));
    assert_eq!(monitor.stack_outputs.lock().unwrap().as_ref(), Some(&outputs));
}

#[tokio::test]
async fn dependencies_follow_outputs_between_resources() {
    let monitor = Arc::new(EchoMonitor::default());
    cumulus_sdk::run(RunInfo::new("proj", "dev"), monitor.clone(), |ctx| async move {
        let parent = ResourceGroup::new(&ctx, "parent", group_args("p"))?;
        let mut inputs = InputMap::new();
        inputs.insert("parentId", &parent.id);
        ctx.register("test:index:Child", "child", inputs)?;
        Ok::<_, SdkError>(())
    })
    .await
    .unwrap();

    let seen = monitor.seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].name, "parent");
    assert_eq!(seen[1].name, "child");
    assert_eq!(seen[1].inputs["parentId"], json!("parent-id"));
    assert!(seen[1].dependencies.contains(&seen[0].urn));
}

#[tokio::test]
async fn preview_leaves_computed_values_unknown() {
    let monitor = Arc::new(EchoMonitor {
        dry_run: true,
        ..Default::default()
    });
    let outputs = cumulus_sdk::run(RunInfo::new("proj", "dev"), monitor.clone(), |ctx| async move {
        let rg = ResourceGroup::new(&ctx, "rg", group_args("group"))?;
        let mut inputs = InputMap::new();
        inputs.insert("parentId", &rg.id);
        ctx.register("test:index:Child", "child", inputs)?;
        ctx.export("id", &rg.id);
        ctx.export("crn", &rg.crn);
        ctx.export("name", &rg.name);
        Ok::<_, SdkError>(())
    })
    .await
    .unwrap();

    assert_eq!(outputs["id"], Value::Null);
    assert_eq!(outputs["crn"], Value::Null);
    assert_eq!(outputs["name"], json!("group"));
    let seen = monitor.seen.lock().unwrap();
    assert_eq!(seen[1].inputs["parentId"], json!(UNKNOWN_VALUE));
}

#[tokio::test]
async fn duplicate_declaration_is_rejected() {
    let monitor = Arc::new(EchoMonitor::default());
    let err = cumulus_sdk::run(RunInfo::new("proj", "dev"), monitor, |ctx| async move {
        ResourceGroup::new(&ctx, "rg", group_args("a"))?;
        ResourceGroup::new(&ctx, "rg", group_args("b"))?;
        Ok::<_, SdkError>(())
    })
    .await
    .unwrap_err();
    assert!(matches!(err, SdkError::DuplicateResource(_)), "got: {err}");
}

#[tokio::test]
async fn engine_errors_propagate_from_run() {
    let monitor = Arc::new(EchoMonitor {
        fail_on: Some("rg".into()),
        ..Default::default()
    });
    let err = cumulus_sdk::run(RunInfo::new("proj", "dev"), monitor, |ctx| async move {
        let rg = ResourceGroup::new(&ctx, "rg", group_args("a"))?;
        ctx.export("id", &rg.id);
        Ok::<_, SdkError>(())
    })
    .await
    .unwrap_err();
    assert!(err.to_string().contains("rejected"), "got: {err}");
}

#[tokio::test]
async fn declarations_and_exports_are_recorded_in_order() {
    let monitor: Arc<dyn ResourceMonitor> = Arc::new(EchoMonitor::default());
    let ctx = Context::new(RunInfo::new("proj", "qa"), monitor);
    let first = ResourceGroup::new(&ctx, "first", group_args("one")).unwrap();
    ResourceGroup::new(&ctx, "second", group_args("two")).unwrap();
    ctx.export("x", &first.name);
    ctx.export("y", &Output::known(1u8));
    ctx.export("x", &first.id);

    let names: Vec<_> = ctx.declarations().into_iter().map(|d| d.name).collect();
    assert_eq!(names, ["first", "second"]);
    assert_eq!(ctx.declarations()[0].input_keys, ["name", "tags"]);
    assert_eq!(ctx.export_names(), ["y", "x"]);
    assert_eq!(ctx.stack(), "qa");
}

#[tokio::test]
async fn blank_stack_is_refused_before_declaring() {
    let monitor = Arc::new(EchoMonitor::default());
    let err = cumulus_sdk::run(RunInfo::new("proj", " "), monitor.clone(), |ctx| async move {
        ResourceGroup::new(&ctx, "rg", group_args("group"))?;
        Ok::<_, SdkError>(())
    })
    .await
    .unwrap_err();

    assert!(matches!(err, SdkError::Config(_)), "got: {err}");
    assert!(monitor.seen.lock().unwrap().is_empty());
    assert!(monitor.stack_outputs.lock().unwrap().is_none());
}
