use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::symbols::{DateFormat, Granularity};
use crate::symbols::corrections::FamilyChoice;

#[derive(Debug, Parser)]
#[command(
    name = "kira-stagesqc",
    version,
    about = "Gene-symbol QC and log transform for comparison tables"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    Run(RunArgs),
    Validate(ValidateArgs),
    Reference(ReferenceArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[arg(long, num_args = 1.., required = true, help = "Input table (.csv/.tsv/.txt, optionally .gz; repeatable)")]
    pub input: Vec<PathBuf>,

    #[arg(long)]
    pub out: PathBuf,

    #[arg(long, help = "Reference CSV overlaid on the built-in symbol table")]
    pub reference: Option<PathBuf>,

    #[arg(long, help = "Session file holding decisions between runs")]
    pub session: Option<PathBuf>,

    #[arg(long, value_enum, help = "Symbol for the first MAR-01 occurrence")]
    pub first_mar01: Option<Mar01Arg>,

    #[arg(long, value_enum, help = "Symbol for the first MAR-02 occurrence")]
    pub first_mar02: Option<Mar02Arg>,

    #[arg(long, value_enum, help = "Field order of numeric date labels")]
    pub date_format: Option<DateFormatArg>,

    #[arg(long, value_enum, help = "Read numeric dates as month-year or month-day")]
    pub granularity: Option<GranularityArg>,

    #[arg(
        long,
        value_name = "DATASET:KEY=VALUE",
        help = "Per-dataset decision, e.g. plate2:first_mar01=MARCHF1 (repeatable)"
    )]
    pub choice: Vec<String>,

    #[arg(long, default_value_t = false, help = "Fill undecided keys with the built-in defaults")]
    pub accept_defaults: bool,

    #[arg(long, default_value_t = false, help = "Use adj_pval_* columns for -log10(p)")]
    pub use_adjusted_pval: bool,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(long, default_value_t = false)]
    pub tsv: bool,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[arg(long, num_args = 1.., required = true, help = "Input table (repeatable)")]
    pub input: Vec<PathBuf>,

    #[arg(long)]
    pub reference: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ReferenceArgs {
    #[command(subcommand)]
    pub command: ReferenceCommand,
}

#[derive(Debug, Subcommand)]
pub enum ReferenceCommand {
    Show(ReferenceShowArgs),
}

#[derive(Debug, Args)]
pub struct ReferenceShowArgs {
    #[arg(long, help = "Optional reference CSV to overlay on the built-in table")]
    pub reference: Option<PathBuf>,

    #[arg(help = "Symbols to look up; lists the whole table when omitted")]
    pub symbols: Vec<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Mar01Arg {
    Mtarc1,
    Marchf1,
}

impl From<Mar01Arg> for FamilyChoice {
    fn from(arg: Mar01Arg) -> Self {
        match arg {
            Mar01Arg::Mtarc1 => FamilyChoice::Mtarc1,
            Mar01Arg::Marchf1 => FamilyChoice::Marchf1,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Mar02Arg {
    Mtarc2,
    Marchf2,
}

impl From<Mar02Arg> for FamilyChoice {
    fn from(arg: Mar02Arg) -> Self {
        match arg {
            Mar02Arg::Mtarc2 => FamilyChoice::Mtarc2,
            Mar02Arg::Marchf2 => FamilyChoice::Marchf2,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DateFormatArg {
    #[value(name = "yyyy-dd-mm")]
    YyyyDdMm,
    #[value(name = "yyyy-mm-dd")]
    YyyyMmDd,
    #[value(name = "dd-mm-yyyy")]
    DdMmYyyy,
    #[value(name = "mm-dd-yyyy")]
    MmDdYyyy,
}

impl From<DateFormatArg> for DateFormat {
    fn from(arg: DateFormatArg) -> Self {
        match arg {
            DateFormatArg::YyyyDdMm => DateFormat::YyyyDdMm,
            DateFormatArg::YyyyMmDd => DateFormat::YyyyMmDd,
            DateFormatArg::DdMmYyyy => DateFormat::DdMmYyyy,
            DateFormatArg::MmDdYyyy => DateFormat::MmDdYyyy,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum GranularityArg {
    MonthYear,
    MonthDay,
}

impl From<GranularityArg> for Granularity {
    fn from(arg: GranularityArg) -> Self {
        match arg {
            GranularityArg::MonthYear => Granularity::MonthYear,
            GranularityArg::MonthDay => Granularity::MonthDay,
        }
    }
}
