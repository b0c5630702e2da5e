//! bpfprobe - check that a wireless interface can be captured through BPF
//!
//! Acquires a BPF device, binds it to the interface and negotiates an
//! 802.11 data-link type, then reports what was set up.

mod output;

use std::path::PathBuf;

use clap::Parser;
use dot11bpf::{AcquireConfig, Acquirer, DataLinkType};

#[derive(Parser)]
#[command(name = "bpfprobe")]
#[command(about = "Check raw 802.11 capture setup on a BPF device", long_about = None)]
#[command(version)]
struct Cli {
    /// Wireless interface to bind (e.g. en0)
    interface: String,

    /// Device node tried before the numbered devices
    #[arg(long, default_value = dot11bpf::DEFAULT_DEVICE_PATH)]
    device: PathBuf,

    /// Prefix of the numbered device nodes
    #[arg(long, default_value = dot11bpf::DEFAULT_DEVICE_PATH)]
    prefix: String,

    /// Number of numbered device nodes to try
    #[arg(long, default_value_t = dot11bpf::DEFAULT_MAX_DEVICES)]
    max_devices: usize,

    /// Only try plain 802.11 (skip radiotap)
    #[arg(long)]
    plain: bool,

    /// Output JSON
    #[arg(short, long)]
    json: bool,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> dot11bpf::Result<()> {
    let config = AcquireConfig::new()
        .default_path(&cli.device)
        .numbered_prefix(&cli.prefix)
        .max_devices(cli.max_devices);

    let mut handle = Acquirer::with_config(config).acquire()?;
    handle.bind(&cli.interface)?;

    let dlt = if cli.plain {
        handle.setup_data_link_with(&[DataLinkType::Ieee80211])?
    } else {
        handle.setup_data_link()?
    };

    let report = output::Report {
        device: handle.path().display().to_string(),
        interface: cli.interface.clone(),
        data_link: dlt,
        dlt: dlt.as_raw(),
        radiotap: dlt.has_radiotap(),
    };

    if cli.json {
        output::print_json(&report)
    } else {
        output::print_text(&report);
        Ok(())
    }
}
