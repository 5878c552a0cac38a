use clap::{Parser, Subcommand};
use robopack_core::error::Result;
use robopack_core::{
    ArchiveOptions, HyperParameters, ModelType, import_donkey_records, write_archive,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "robocar dataset tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a training archive from recorded sessions
    Archive {
        /// directory containing one subdirectory per recorded session
        basedir: PathBuf,
        /// output path for the zip archive
        out: PathBuf,

        /// pair each image with the record this many frames ahead
        #[arg(long, default_value_t = 0)]
        slice_size: usize,

        /// resize images to this width (0 keeps the native size)
        #[arg(long, default_value_t = 0)]
        width: u32,

        /// resize images to this height (0 keeps the native size)
        #[arg(long, default_value_t = 0)]
        height: u32,

        /// crop this many rows from the top of each image
        #[arg(long, default_value_t = 0)]
        horizon: u32,

        /// also emit mirrored images with negated steering angles
        #[arg(long)]
        flip: bool,
    },

    /// Copy donkeycar records into the session layout
    ImportDonkey {
        /// donkeycar data directory, one subdirectory per tub
        basedir: PathBuf,
        /// destination directory for the converted sessions
        dest: PathBuf,
    },

    /// Print the hyperparameters a training job derives from archive options
    Hyperparameters {
        #[arg(long, default_value = "categorical")]
        model_type: ModelType,
        #[arg(long, default_value_t = 0)]
        slice_size: usize,
        #[arg(long, default_value_t = 160)]
        width: u32,
        #[arg(long, default_value_t = 120)]
        height: u32,
        #[arg(long, default_value_t = 0)]
        horizon: u32,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Archive {
            basedir,
            out,
            slice_size,
            width,
            height,
            horizon,
            flip,
        } => {
            let opts = ArchiveOptions {
                slice_size,
                width,
                height,
                horizon,
                flip,
            };
            write_archive(&basedir, &out, &opts)?;
        }

        Commands::ImportDonkey { basedir, dest } => {
            import_donkey_records(&basedir, &dest)?;
        }

        Commands::Hyperparameters {
            model_type,
            slice_size,
            width,
            height,
            horizon,
        } => {
            let opts = ArchiveOptions {
                slice_size,
                width,
                height,
                horizon,
                flip: false,
            };
            let hp = HyperParameters::from_options(&opts, model_type);
            println!("{}", serde_json::to_string_pretty(&hp)?);
        }
    }

    Ok(())
}
