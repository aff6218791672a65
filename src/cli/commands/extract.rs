use anyhow::{Result, bail};

use super::super::{
    args::ExtractCommand,
    exit_status::ExitStatus,
    prompt::FixedKeyPrompt,
    report::{self, print_warning},
};
use super::context::RunContext;
use crate::core::{
    ExtractionOrchestrator, ExtractionReport, ExtractionRequest, FlutterGenL10n, NamingMode,
    NoProgress, TextEditTarget, UserPrompt,
    naming::is_valid_key,
    scan::{LineIndex, is_plain_content, literal_at},
};

pub fn extract(cmd: ExtractCommand) -> Result<ExitStatus> {
    let mut ctx = RunContext::new(&cmd.common)?;
    let mut document = ctx.open_document(&cmd.file)?;

    let Some(offset) = LineIndex::new(document.text()).offset(cmd.at.line, cmd.at.col) else {
        bail!("{}:{} is outside {}", document.id(), cmd.at, cmd.file.display());
    };
    let Some(literal) = literal_at(document.text(), offset) else {
        print_warning(&format!(
            "no string literal at {}:{}",
            document.id(),
            cmd.at
        ));
        report::print(&ExtractionReport::default(), ctx.verbose);
        return Ok(ExitStatus::Success);
    };
    if !is_plain_content(&literal.value) {
        print_warning(&format!(
            "\"{}\" at {}:{} uses interpolation or escapes, skipped",
            literal.value,
            document.id(),
            cmd.at
        ));
        report::print(&ExtractionReport::default(), ctx.verbose);
        return Ok(ExitStatus::Success);
    }

    let request = ExtractionRequest::from_match(&literal, document.text(), document.id());

    let mut prompt: Box<dyn UserPrompt> = match cmd.key {
        Some(key) => {
            if !is_valid_key(&key) {
                bail!(
                    "\"{}\" is not a valid key (start with a letter, then letters, digits or _)",
                    key
                );
            }
            ctx.config.naming_mode = NamingMode::Manual;
            Box::new(FixedKeyPrompt::new(key))
        }
        None => ctx.prompt(),
    };
    let mut progress = NoProgress;
    let mut codegen = FlutterGenL10n::default();

    let report = ExtractionOrchestrator::new(
        &ctx.config,
        &ctx.project_root,
        &ctx.translator,
        prompt.as_mut(),
        &mut progress,
        &mut codegen,
    )
    .extract_selection(&mut document, &request);

    report::print(&report, ctx.verbose);
    Ok(ExitStatus::from_report(&report))
}
