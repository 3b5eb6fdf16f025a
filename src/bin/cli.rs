//! kvlib CLI Client
//!
//! Command-line interface for issuing single operations to the driver.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use kvlib::config::DEFAULT_DEVICE_PATH;
use kvlib::{Client, Config};
use tracing_subscriber::{fmt, EnvFilter};

/// Exit code when the value cannot be written to stdout; 1..=3 are the
/// client error codes
const EXIT_WRITE_FAILED: i32 = 4;

/// kvlib CLI
#[derive(Parser, Debug)]
#[command(name = "kvlib-cli")]
#[command(about = "CLI for the kernel key-value store")]
#[command(version)]
struct Args {
    /// Control device path
    #[arg(short, long, default_value = DEFAULT_DEVICE_PATH)]
    device: PathBuf,

    /// ioctl magic number of the driver
    #[arg(long, default_value = "100")]
    magic: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// Delete a key
    Del {
        /// The key to delete
        key: String,
    },

    /// Erase every key on the device
    Format,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let args = Args::parse();

    let config = Config::builder()
        .device_path(&args.device)
        .ioctl_magic(args.magic)
        .build();

    let result = Client::new(config).and_then(|client| match &args.command {
        Commands::Get { key } => client.get(key.as_bytes()).map(Some),
        Commands::Set { key, value } => client.set(key.as_bytes(), value.as_bytes()).map(|_| None),
        Commands::Del { key } => client.del(key.as_bytes()).map(|_| None),
        Commands::Format => client.format().map(|_| None),
    });

    match result {
        Ok(Some(value)) => {
            if let Err(e) = write_value(&mut std::io::stdout().lock(), &value) {
                eprintln!("Error: failed to write value: {}", e);
                std::process::exit(EXIT_WRITE_FAILED);
            }
        }
        Ok(None) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.code().abs());
        }
    }
}

fn write_value<W: Write>(out: &mut W, value: &[u8]) -> std::io::Result<()> {
    out.write_all(value)?;
    out.write_all(b"\n")?;
    out.flush()
}
