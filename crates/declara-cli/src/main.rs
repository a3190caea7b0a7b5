mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use declara_core::render::DEFAULT_TEMPLATE;

#[derive(Parser)]
#[command(
    name = "declara",
    version,
    about = "Fill the Correios content declaration from a shipping order PDF"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the filled declaration PDF (from an order PDF or a saved JSON record)
    Generate {
        /// Path to the order PDF or a JSON record written by `parse -O`
        input_file: PathBuf,

        /// Blank declaration form
        #[arg(short, long, default_value = DEFAULT_TEMPLATE)]
        template: PathBuf,

        /// JSON file with coordinate overrides, e.g. {"weight_x": 400}
        #[arg(short, long, value_name = "FILE")]
        layout: Option<PathBuf>,

        /// Output path (default: Pedido_<n>.pdf in the current directory)
        #[arg(short, long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Cut long addresses to one line instead of wrapping
        #[arg(long)]
        truncate_addresses: bool,
    },
    /// Parse an order PDF into structured data (without rendering)
    Parse {
        /// Path to the order PDF
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write parsed output to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Print the effective coordinate table as JSON
    Layout {
        /// JSON file with coordinate overrides
        #[arg(short, long, value_name = "FILE")]
        layout: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("declara=warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            input_file,
            template,
            layout,
            out,
            truncate_addresses,
        } => commands::generate::run(commands::generate::GenerateArgs {
            input_file,
            template,
            layout,
            out,
            truncate_addresses,
        }),
        Commands::Parse {
            input_file,
            output,
            out,
        } => commands::parse::run(input_file, &output, out),
        Commands::Layout { layout } => commands::layout::run(layout),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
