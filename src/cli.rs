use clap::Parser;

#[derive(Parser)]
#[command(name = "xlsx-merger")]
#[command(about = "Fold new rows from incremental Excel exports into a master workbook")]
#[command(version)]
pub struct Args {
    /// Directory holding the master workbook (the only .xlsx in it). Defaults to the current directory
    #[arg(short, long)]
    pub base_dir: Option<String>,

    /// Optional JSON file with the same keys as the options below. Command line options win over it
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory with the incremental .xlsx files, relative to the base directory unless absolute
    #[arg(long)]
    pub import_dir: Option<String>,

    /// Directory receiving the timestamped backups, relative to the base directory unless absolute
    #[arg(long)]
    pub backup_dir: Option<String>,

    /// Name of the worksheet table read from every workbook and written to the master
    #[arg(long)]
    pub table_name: Option<String>,

    /// Sheet replaced with the merged table
    #[arg(long)]
    pub sheet_name: Option<String>,

    /// Serial column (after header normalization) used as the watermark
    #[arg(long)]
    pub serial_column: Option<String>,

    /// Visual style of the published table
    #[arg(long)]
    pub table_style: Option<String>,

    /// Only report what would be merged, without backing up or writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print the run report as JSON once done
    #[arg(long)]
    pub json: bool,
}
