//! Area Plot CLI
//!
//! Turns a synthesis area report into a pruned, colored hierarchy table
//! ready for treemap and sunburst rendering.

use anyhow::Result;
use area_plot::aggregator::Fade;
use area_plot::commands::{
    display_schema, display_version, execute_build, validate_args, validate_table_file, BuildArgs,
};
use area_plot::utils::config::DEFAULT_PALETTE;
use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use env_logger::Env;
use std::path::PathBuf;

/// Area Plot - hierarchical area reports for visualization
#[derive(Parser, Debug)]
#[command(name = "area-plot")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// How child colors derive from their parent's
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FadeMode {
    /// Reduce alpha
    Transparent,
    /// Raise lightness
    Lighten,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the pruned, colored hierarchy table
    #[command(group(ArgGroup::new("input").required(true).args(["filename", "load_from_csv"])))]
    Build {
        /// Area report to parse
        #[arg(short, long)]
        filename: Option<PathBuf>,

        /// Load the hierarchy from a saved CSV table
        #[arg(long)]
        load_from_csv: Option<PathBuf>,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Top module id (defaults to the first instance)
        #[arg(short, long)]
        top_module: Option<String>,

        /// Hierarchy levels to keep below the top module (the top module itself is not counted)
        #[arg(short = 'd', long, default_value = "4")]
        max_levels_hier: usize,

        /// Minimum fraction of the parent area to keep an instance
        #[arg(long, default_value = "0")]
        threshold: f64,

        /// Root-level colors
        #[arg(long, num_args = 1.., default_values_t = DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect::<Vec<_>>())]
        colormap: Vec<String>,

        /// Skip duplicate resolution (faster, wrong if duplicates exist)
        #[arg(long)]
        skip_rename: bool,

        /// Additional id fragments to elide (repeatable)
        #[arg(long)]
        exclude: Vec<String>,

        /// Color fade applied below the first generation
        #[arg(long, value_enum, default_value = "transparent")]
        fade: FadeMode,

        /// Fade amount (defaults per mode)
        #[arg(long)]
        fade_amount: Option<f64>,

        /// Insert self-area rows for remainder rendering
        #[arg(long)]
        remainder: bool,

        /// Keep the report's last line (do not treat it as the total)
        #[arg(long)]
        keep_total_line: bool,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Validate a saved table
    Validate {
        /// Path to CSV table
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Build {
            filename,
            load_from_csv,
            out_dir,
            top_module,
            max_levels_hier,
            threshold,
            colormap,
            skip_rename,
            exclude,
            fade,
            fade_amount,
            remainder,
            keep_total_line,
            summary,
        } => {
            let fade = match fade {
                FadeMode::Transparent => fade_amount.map_or_else(Fade::default, Fade::Transparent),
                FadeMode::Lighten => fade_amount.map_or_else(Fade::lighten, Fade::Lighten),
            };

            let args = BuildArgs {
                report: filename,
                table: load_from_csv,
                out_dir,
                top_module,
                max_depth: max_levels_hier,
                threshold,
                palette: colormap,
                skip_rename,
                exclude,
                fade,
                remainder,
                keep_total_line,
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            execute_build(args)?;
        }

        Commands::Validate { file } => {
            validate_table_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
