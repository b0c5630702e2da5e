//! Report formatting for bpfprobe.

use dot11bpf::DataLinkType;
use serde::Serialize;

/// What the probe set up.
#[derive(Debug, Serialize)]
pub struct Report {
    pub device: String,
    pub interface: String,
    pub data_link: DataLinkType,
    pub dlt: u32,
    pub radiotap: bool,
}

pub fn print_text(report: &Report) {
    println!("device:    {}", report.device);
    println!("interface: {}", report.interface);
    println!("data link: {}", report.data_link);
    if !report.radiotap {
        println!("note: driver has no radiotap support, frames carry no radio metadata");
    }
}

pub fn print_json(report: &Report) -> dot11bpf::Result<()> {
    let json = serde_json::to_string_pretty(report).map_err(std::io::Error::from)?;
    println!("{}", json);
    Ok(())
}
