use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "target-worklist")]
#[command(about = "Convert an observation target spreadsheet into a telescope worklist")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Configuration file (TOML)")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Hide the progress spinner")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Worklist of targets that have not been observed yet
    New(SheetArgs),

    /// Worklist of detected targets that still need a follow-up observation
    FollowUp(SheetArgs),

    /// Worklist from a sheet that already has Target, RA and DEC columns
    Format(SheetArgs),

    /// Split a combined RA/DEC string and print both halves
    Split {
        #[arg(help = "Combined coordinates, e.g. '18 36 56.3+38 47 01'")]
        combined: String,

        #[arg(short, long, help = "Separator between coordinate components")]
        divider: Option<String>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct SheetArgs {
    #[arg(short, long, help = "Input spreadsheet (csv, tsv, xls, xlsx, ods)")]
    pub input: PathBuf,

    #[arg(short, long, help = "Output worklist file [default: stdout]")]
    pub output: Option<PathBuf>,

    #[arg(long, help = "0-based sheet index for workbooks")]
    pub sheet: Option<usize>,

    #[arg(long, help = "0-based row holding the column headers")]
    pub header_row: Option<usize>,

    #[arg(long, help = "Data rows to discard after the header")]
    pub skip_rows: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_new_with_overrides() {
        let cli = Cli::try_parse_from([
            "target-worklist",
            "--verbose",
            "new",
            "--input",
            "Final_Sample.xls",
            "--sheet",
            "3",
            "--header-row",
            "8",
            "--skip-rows",
            "1",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::New(args) => {
                assert_eq!(args.input, PathBuf::from("Final_Sample.xls"));
                assert_eq!(args.sheet, Some(3));
                assert_eq!(args.header_row, Some(8));
                assert_eq!(args.skip_rows, Some(1));
                assert!(args.output.is_none());
            }
            _ => panic!("expected the new subcommand"),
        }
    }

    #[test]
    fn test_parse_split() {
        let cli = Cli::try_parse_from(["target-worklist", "split", "1 2 3-4 5 6", "-d", ":"]).unwrap();
        match cli.command {
            Commands::Split { combined, divider } => {
                assert_eq!(combined, "1 2 3-4 5 6");
                assert_eq!(divider.as_deref(), Some(":"));
            }
            _ => panic!("expected the split subcommand"),
        }
    }
}
