use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "pltread")]
#[command(version)]
#[command(about = "Decode legacy Tecplot binary .plt files", long_about = None)]
#[command(after_help = "Examples:\n  \
  pltread flow.plt               print the file summary\n  \
  pltread -l flow.plt            list zones (name, type, sizes)\n  \
  pltread -v flow.plt            per-zone variable detail with min/max")]
pub struct Cli {
    /// Tecplot binary .plt file path
    #[arg(value_name = "FILE")]
    pub file: String,

    /// List zones (short format)
    #[arg(short = 'l')]
    pub list: bool,

    /// List zones verbosely with per-variable detail
    #[arg(short = 'v')]
    pub verbose: bool,

    /// Quiet mode (suppress the summary banner)
    #[arg(short = 'q')]
    pub quiet: bool,
}
