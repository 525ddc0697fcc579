//! `methodgen generate` command

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::GenerateArgs;
use methodgen::ops::{generate, GenerateOptions};
use methodgen::util::diagnostic::{emit, Diagnostic};
use methodgen::util::fs::expand_inputs;

pub fn execute(args: GenerateArgs, config: Option<PathBuf>, color: bool) -> Result<()> {
    let mut config = super::load_config(config)?;
    config.merge_cli(args.namespace, args.usings, args.host_usings);

    let inputs = expand_inputs(&args.inputs)?;
    let opts = GenerateOptions::new(&args.output, args.library, inputs)
        .with_config(&config)
        .with_dry_run(args.dry_run);

    let rendered = generate(&opts)?;

    for list in &rendered.lists {
        for skipped in &list.skipped {
            emit(&skipped.to_diagnostic(&list.source), color);
        }
    }

    if args.dry_run {
        print!("{}", rendered.text);
        return Ok(());
    }

    let report = &rendered.report;
    if report.manual > 0 {
        emit(
            &Diagnostic::note(format!(
                "{} declarations take function pointers and need hand-written bindings",
                report.manual
            ))
            .with_suggestion("Search the output for `// SKIPPED`"),
            color,
        );
    }

    println!(
        "Generated {} ({} functions, {} enums from {} of {} files)",
        args.output.display(),
        report.functions,
        report.enums,
        report.regions,
        report.files
    );

    Ok(())
}
