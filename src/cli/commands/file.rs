use anyhow::Result;

use super::super::{
    args::FileCommand, exit_status::ExitStatus, progress::TerminalProgress, report,
};
use super::context::RunContext;
use crate::core::{ExtractionOrchestrator, FlutterGenL10n};

pub fn file(cmd: FileCommand) -> Result<ExitStatus> {
    let ctx = RunContext::new(&cmd.common)?;
    let mut document = ctx.open_document(&cmd.file)?;

    let mut prompt = ctx.prompt();
    let mut progress = TerminalProgress::new("Naming", ctx.verbose);
    let mut codegen = FlutterGenL10n::default();

    let report = ExtractionOrchestrator::new(
        &ctx.config,
        &ctx.project_root,
        &ctx.translator,
        prompt.as_mut(),
        &mut progress,
        &mut codegen,
    )
    .extract_file(&mut document);

    report::print(&report, ctx.verbose);
    Ok(ExitStatus::from_report(&report))
}
