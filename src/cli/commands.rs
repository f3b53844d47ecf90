use crate::cli::args::{Cli, Commands, SheetArgs};
use crate::config::{Pipeline, WorklistConfig};
use crate::error::Result;
use crate::models::RecordSet;
use crate::processors::{normalize, select_followup, select_unobserved, Selection};
use crate::readers::SheetReader;
use crate::utils::coordinates::split_ra_dec;
use crate::utils::progress::ProgressReporter;
use crate::writers::Worklist;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use tracing::{debug, info, warn};

pub fn run(cli: Cli) -> Result<()> {
    let config = WorklistConfig::load(cli.config.as_deref())?;
    let effective = config.to_json()?;
    debug!(config = %effective, "effective configuration");

    match cli.command {
        Commands::New(args) => build_worklist(&config, &args, Pipeline::New, cli.quiet),
        Commands::FollowUp(args) => build_worklist(&config, &args, Pipeline::FollowUp, cli.quiet),
        Commands::Format(args) => build_worklist(&config, &args, Pipeline::Format, cli.quiet),
        Commands::Split { combined, divider } => {
            let divider = divider.unwrap_or_else(|| config.format.divider.clone());
            let coords = split_ra_dec(&combined, &divider)?;
            println!("{}", coords.ra);
            println!("{}", coords.dec);
            Ok(())
        }
    }
}

fn build_worklist(
    config: &WorklistConfig,
    args: &SheetArgs,
    pipeline: Pipeline,
    quiet: bool,
) -> Result<()> {
    let mut options = config.read_options(pipeline);
    if let Some(sheet) = args.sheet {
        options.sheet_index = sheet;
    }
    if let Some(header_row) = args.header_row {
        options.header_row = header_row;
    }
    if let Some(skip_rows) = args.skip_rows {
        options.skip_rows = skip_rows;
    }

    info!(input = %args.input.display(), ?pipeline, "building worklist");

    let progress =
        ProgressReporter::new_spinner(&format!("Reading {}...", args.input.display()), quiet);
    let sheet = SheetReader::new(options).read(&args.input)?;
    progress.finish_with_message(&format!("Read {} rows", sheet.len()));

    let selection = select(sheet, config, pipeline)?;
    if selection.rejected > 0 {
        warn!(
            rejected = selection.rejected,
            "rows dropped because their coordinates could not be split"
        );
    }

    let records = normalize(&selection.records, &config.format.default_epoch)?;
    let worklist = Worklist::new(&records);

    let written = match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let written = worklist.write_to(BufWriter::new(File::create(path)?))?;
            info!(output = %path.display(), "worklist written");
            written
        }
        None => worklist.write_to(io::stdout().lock())?,
    };

    info!(targets = written, "worklist complete");
    Ok(())
}

fn select(sheet: RecordSet, config: &WorklistConfig, pipeline: Pipeline) -> Result<Selection> {
    let divider = &config.format.divider;
    match pipeline {
        Pipeline::New => select_unobserved(sheet, &config.columns, divider),
        Pipeline::FollowUp => select_followup(sheet, &config.columns, divider),
        Pipeline::Format => Ok(Selection {
            records: sheet,
            rejected: 0,
        }),
    }
}
