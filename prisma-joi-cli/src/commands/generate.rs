//! `prisma-joi generate` command - Generate Joi schemas from generator options.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use prisma_joi_codegen::{FileWriter, FsWriter, GenerationReport, Generator, MemoryWriter};
use prisma_joi_dmmf::{ConfigValue, load_options};
use tracing::debug;

use crate::cli::GenerateArgs;
use crate::error::CliResult;
use crate::output::{self, success};

/// Run the generate command
pub async fn run(args: GenerateArgs) -> CliResult<()> {
    output::header("Generate Joi Schemas");

    let cwd = std::env::current_dir()?;
    let started = Instant::now();

    let mut run = super::layered_options(&cwd, &args.config)?;
    if args.no_index {
        run.overrides
            .insert("generateIndex".to_string(), ConfigValue::from("false"));
    }
    run.output = args.output.clone();

    output::kv("Input", &args.input.display().to_string());
    if let Some(out) = &run.output {
        output::kv("Output", &out.display().to_string());
    }
    if args.dry_run {
        output::info("Dry run, nothing is written to disk");
    }
    output::newline();

    output::step(1, 3, "Reading generator options...");
    let options = load_options(&args.input)?;
    debug!(
        models = options.dmmf.datamodel.models.len(),
        "loaded generator options"
    );

    output::step(2, 3, "Generating schemas...");
    let writer: Arc<dyn FileWriter> = if args.dry_run {
        Arc::new(MemoryWriter::new())
    } else {
        Arc::new(FsWriter)
    };
    let report = Generator::new()
        .with_writer(writer)
        .run(&options, &run)
        .await?;

    output::step(3, 3, "Collecting results...");
    print_report(&report, &cwd);

    output::newline();
    let verb = if args.dry_run { "Would generate" } else { "Generated" };
    success(&format!(
        "{} {} files ({} lines) in {:.2}s",
        verb,
        report.files.len(),
        report.total_lines,
        started.elapsed().as_secs_f64()
    ));

    Ok(())
}

fn print_report(report: &GenerationReport, cwd: &Path) {
    output::newline();
    output::section("Summary");
    output::kv("Schemas", &report.schemas.to_string());
    output::kv("Objects", &report.objects.to_string());
    output::kv("Enums", &report.enums.to_string());
    output::kv("Indexes", &report.indexes.to_string());

    output::newline();
    output::section("Generated files");
    for file in &report.files {
        let relative_path = file.strip_prefix(cwd).unwrap_or(file).display().to_string();
        output::list_item(&relative_path);
    }
}
