//! kvlib Benchmark Binary
//!
//! Drives the client through write, read, update and delete workloads and
//! prints per-operation latency.

use std::path::PathBuf;

use clap::Parser;
use kvlib::bench::{self, KeySize, Phase, TestKind};
use kvlib::config::{DEFAULT_DEVICE_PATH, DEFAULT_MAX_VALUE_LEN};
use kvlib::{Client, Config, Device, MemoryDevice};
use tracing_subscriber::{fmt, EnvFilter};

/// kvlib latency benchmark
#[derive(Parser, Debug)]
#[command(name = "kvlib-bench")]
#[command(about = "Latency benchmark for the kernel key-value store")]
#[command(version)]
struct Args {
    /// 1 read/write, 2 delete, 3 update, 5 write only, 6 read only
    #[arg(value_parser = parse_test)]
    test: TestKind,

    /// Number of pages to be tested
    entries: u64,

    /// 1 for large keys, 0 for small keys
    #[arg(value_parser = clap::value_parser!(u8).range(0..=1))]
    large: u8,

    /// Control device path
    #[arg(short, long, default_value = DEFAULT_DEVICE_PATH)]
    device: PathBuf,

    /// Run against the in-memory device instead of the driver
    #[arg(long)]
    memory: bool,

    /// Value ceiling in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_VALUE_LEN)]
    max_value_len: usize,
}

fn parse_test(s: &str) -> Result<TestKind, String> {
    let selector: u32 = s.parse().map_err(|e| format!("{}", e))?;
    TestKind::from_selector(selector)
        .ok_or_else(|| format!("unknown test {} (expected 1, 2, 3, 5 or 6)", selector))
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,kvlib=info"));

    fmt().with_env_filter(filter).with_target(false).init();

    let args = Args::parse();

    let config = Config::builder()
        .device_path(&args.device)
        .max_value_len(args.max_value_len)
        .build();
    let size = KeySize::from_flag(args.large == 1);

    println!("\n{}", args.test);

    let code = if args.memory {
        tracing::info!("Using in-memory device");
        execute(Client::with_device(MemoryDevice::new(), config), &args, size)
    } else {
        tracing::info!("Device: {}", args.device.display());
        execute(Client::new(config), &args, size)
    };

    std::process::exit(code);
}

fn execute<D: Device>(client: kvlib::Result<Client<D>>, args: &Args, size: KeySize) -> i32 {
    let client = match client {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return 2;
        }
    };

    let report = match bench::run(&client, args.test, args.entries, size) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Benchmark aborted: {}", e);
            return 1;
        }
    };

    for phase in report.phases.iter().filter(|p| p.phase != Phase::Verify) {
        println!(
            "{} latency for {}:\t {:.6} \tms",
            phase.phase,
            report.test.label(),
            phase.latency_ms()
        );
    }

    let failures = report.failures();
    if failures > 0 {
        println!("{} per-key failures over {} entries", failures, report.entries);
    }
    0
}
