//! jpegarith CLI - inspect JPEG arithmetic-coded scans.
//!
//! Decodes the entropy-coded data of a sequential arithmetic scan into
//! quantized DCT coefficient blocks and prints them.

use clap::{Parser, Subcommand, ValueEnum};
use jpegarith_rs::arithmetic::probability_table::probability_table;
use jpegarith_rs::arithmetic::to_natural_order;
use jpegarith_rs::constants::BLOCK_SIZE;
use jpegarith_rs::{ArithmeticScanDecoder, ConditioningTable, IoByteReader, ScanComponent};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// JPEG arithmetic entropy decoder
#[derive(Parser)]
#[command(name = "jpegarith")]
#[command(version)]
#[command(about = "Decode JPEG arithmetic-coded scans into coefficient blocks", long_about = None)]
#[command(after_help = "EXAMPLES:
    jpegarith decode -i scan.bin
    jpegarith decode -i scan.bin --dac 000601211114 -c 0:0 -c 1:1 -l 0,0,1 -n 4 -r 1
    jpegarith table

The input file holds the entropy-coded data of one scan, starting right
after the SOS header. Set RUST_LOG=debug to trace restarts and padding.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode coefficient blocks from an entropy-coded scan
    #[command(visible_alias = "d")]
    Decode {
        /// Entropy-coded scan data
        #[arg(short, long)]
        input: PathBuf,

        /// DAC segment in hex, starting at the length field
        #[arg(long)]
        dac: Option<String>,

        /// DC:AC table selectors of each scan component
        #[arg(short, long = "component", value_parser = parse_component, default_value = "0:0")]
        components: Vec<ScanComponent>,

        /// Scan component of each block in an MCU (default: one block per component)
        #[arg(short, long, value_delimiter = ',')]
        layout: Vec<usize>,

        /// Restart interval in MCUs (0 = none)
        #[arg(short, long, default_value = "0")]
        restart_interval: u16,

        /// Number of MCUs to decode
        #[arg(short = 'n', long, default_value = "1")]
        mcus: usize,

        /// Coefficient order of the printed blocks
        #[arg(short, long, default_value = "zigzag", value_enum)]
        order: BlockOrder,
    },

    /// Print the probability estimation table
    #[command(visible_alias = "t")]
    Table,
}

#[derive(Clone, Copy, ValueEnum)]
enum BlockOrder {
    /// Zig-zag scan order, as decoded
    Zigzag,
    /// Row-major order
    Natural,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Decode {
            input,
            dac,
            components,
            layout,
            restart_interval,
            mcus,
            order,
        } => decode_scan(
            &input,
            dac.as_deref(),
            &components,
            &layout,
            restart_interval,
            mcus,
            order,
        ),
        Commands::Table => {
            print_table();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn decode_scan(
    input: &PathBuf,
    dac: Option<&str>,
    components: &[ScanComponent],
    layout: &[usize],
    restart_interval: u16,
    mcus: usize,
    order: BlockOrder,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut conditioning = ConditioningTable::new();
    if let Some(hex) = dac {
        conditioning.read_dac_segment(&parse_hex(hex)?)?;
    }

    let layout: Vec<usize> = if layout.is_empty() {
        (0..components.len()).collect()
    } else {
        layout.to_vec()
    };

    let reader = IoByteReader::new(BufReader::new(File::open(input)?));
    let mut decoder =
        ArithmeticScanDecoder::new(reader, &conditioning, components, restart_interval)?;

    let mut blocks = vec![[0i16; BLOCK_SIZE]; layout.len()];
    for mcu in 0..mcus {
        decoder.decode_mcu(&mut blocks, &layout)?;
        for (index, (block, component)) in blocks.iter().zip(&layout).enumerate() {
            println!("MCU {} block {} (component {}):", mcu, index, component);
            let block = match order {
                BlockOrder::Zigzag => *block,
                BlockOrder::Natural => to_natural_order(block),
            };
            for row in block.chunks(8) {
                let line: Vec<String> = row.iter().map(|value| format!("{:6}", value)).collect();
                println!("{}", line.join(""));
            }
        }
    }
    Ok(())
}

fn print_table() {
    println!("{:>5} {:>6} {:>4} {:>4} {:>6}", "Index", "Qe", "NLPS", "NMPS", "SWITCH");
    for (index, entry) in probability_table().iter().enumerate() {
        println!(
            "{:>5} {:#06x} {:>4} {:>4} {:>6}",
            index, entry.qe, entry.next_lps, entry.next_mps, entry.switch_mps as u8
        );
    }
}

fn parse_hex(text: &str) -> Result<Vec<u8>, String> {
    let digits: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() % 2 != 0 {
        return Err("odd number of hex digits".to_string());
    }
    digits
        .chunks(2)
        .map(|pair| {
            let byte: String = pair.iter().collect();
            u8::from_str_radix(&byte, 16).map_err(|e| format!("invalid hex byte {:?}: {}", byte, e))
        })
        .collect()
}

fn parse_component(text: &str) -> Result<ScanComponent, String> {
    let (dc, ac) = text
        .split_once(':')
        .ok_or_else(|| format!("expected DC:AC, got {:?}", text))?;
    let dc_table = dc.parse::<u8>().map_err(|e| e.to_string())?;
    let ac_table = ac.parse::<u8>().map_err(|e| e.to_string())?;
    Ok(ScanComponent { dc_table, ac_table })
}
