use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use ib_app::{AppResult, PROGRAM_NAME, RunOptions, RunRequest, VERSION, load_options, run};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

mod logging;

#[derive(Parser, Debug)]
#[command(name = "ib-graphviz")]
#[command(
    about = "InfiniBand-Graphviz-ualization - draw an InfiniBand fabric dump as a graph",
    long_about = None
)]
struct Cli {
    /// Show the program's version number and exit
    #[arg(short = 'v', long = "version")]
    version: bool,

    /// Topology file to load the data from
    #[arg(
        short = 'f',
        long = "topology-file",
        value_name = "TOPOLOGY",
        required_unless_present = "version"
    )]
    topology_file: Option<PathBuf>,

    /// Draw record-shaped nodes with one field per port (not supported by Gephi)
    #[arg(short = 'd', long = "detailed-topo")]
    detailed_topo: bool,

    /// Group HCAs connected to the same switch in one cluster (only 'dot' honors clusters)
    #[arg(short = 'c', long = "use-clusters")]
    use_clusters: bool,

    /// Use colors that look good on a black background
    #[arg(short = 'o', long = "optimized-for-black-bg")]
    optimized_for_black_bg: bool,

    /// Lay the graph out with 'neato' and save it as a PDF
    #[arg(short = 'r', long = "render-file")]
    render_file: bool,

    /// Also export a GEXF file for Gephi
    #[arg(short = 'e', long = "export-gexf")]
    export_gexf: bool,

    /// Fail on port lines without a node and on ports pointing at undeclared nodes
    #[arg(short = 's', long)]
    strict: bool,

    /// YAML file with default options
    #[arg(short = 'C', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory for the output files (default: working directory)
    #[arg(short = 'O', long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// CRITICAL, ERROR, WARNING, INFO or DEBUG
    #[arg(
        short = 'l',
        long = "loglevel",
        value_name = "LOG_LEVEL",
        default_value = "INFO",
        help_heading = "Logging Options"
    )]
    loglevel: String,

    /// Disable logging in the console
    #[arg(short = 'q', long, help_heading = "Logging Options")]
    quiet: bool,
}

impl Cli {
    /// Layer command-line flags over options from a file. Flags only switch
    /// features on; `--output-dir` replaces the file's value.
    fn apply_to(&self, options: &mut RunOptions) {
        options.detailed |= self.detailed_topo;
        options.use_clusters |= self.use_clusters;
        options.optimize_black_bg |= self.optimized_for_black_bg;
        options.render_pdf |= self.render_file;
        options.export_gexf |= self.export_gexf;
        options.strict |= self.strict;
        if let Some(dir) = &self.output_dir {
            options.output_dir = Some(dir.clone());
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.version {
        println!("{VERSION}");
        return ExitCode::SUCCESS;
    }

    match run_cli(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("\nFATAL ERROR:\n{err}\n");
            ExitCode::FAILURE
        }
    }
}

fn run_cli(cli: &Cli) -> AppResult<()> {
    if !cli.quiet {
        logging::init(logging::parse_level(&cli.loglevel)?);
    }
    info!("{} v{} is running...", PROGRAM_NAME, VERSION);

    let mut options = match &cli.config {
        Some(path) => load_options(path)?,
        None => RunOptions::default(),
    };
    cli.apply_to(&mut options);

    let Some(topology_path) = cli.topology_file.as_deref() else {
        Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "the following required arguments were not provided: --topology-file <TOPOLOGY>",
            )
            .exit();
    };

    run(&RunRequest {
        topology_path,
        options: &options,
    })?;
    Ok(())
}
