use super::{Context, Task, TaskResult, process_operations};
use crate::error::OverlayError;
use crate::resources::Operation;

/// Overlay the configs named in `build.json` onto `dist/configs/`.
#[derive(Debug)]
pub struct ApplyOverlays;

impl Task for ApplyOverlays {
    fn name(&self) -> &str {
        "Apply overlays"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.config.directives().is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult, OverlayError> {
        let copies = ctx.overlays();
        if copies.is_empty() {
            return Ok(TaskResult::Skipped("nothing to overlay".to_string()));
        }

        let mut ops = Vec::with_capacity(copies.len() + 1);
        ops.push(Operation::CreateDir {
            path: ctx.config.dist_configs_dir(),
        });
        for copy in copies {
            ctx.log.debug(&format!("overlay config '{}'", copy.name));
            ops.push(Operation::CopyTree {
                source: copy.source.clone(),
                destination: copy.destination.clone(),
            });
        }
        Ok(process_operations(ctx, &ops)?.finish(ctx))
    }
}
