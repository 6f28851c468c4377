//! RingKV CLI
//!
//! Drives a single block store from the command line: bulk fills for
//! sizing experiments, or a line-oriented script read from stdin.

use std::io::{self, BufRead, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Parser, Subcommand};
use ringkv::{BlockStore, Config, RingError};
use tracing_subscriber::{fmt, EnvFilter};

/// RingKV block store CLI
#[derive(Parser, Debug)]
#[command(name = "ringkv")]
#[command(about = "Fixed-capacity circular block store")]
#[command(version)]
struct Args {
    /// Ring capacity in bytes
    #[arg(short, long, default_value = "1048576")]
    capacity: usize,

    /// Largest frame a single put may write (defaults to capacity)
    #[arg(short = 'f', long)]
    max_frame: Option<usize>,

    /// Print stats and reports as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write synthetic blocks and report what survived
    Fill {
        /// Number of blocks to write
        #[arg(short = 'n', long, default_value = "10000")]
        count: u64,

        /// Key size in bytes
        #[arg(short, long, default_value = "16")]
        key_size: usize,

        /// Value size in bytes
        #[arg(short, long, default_value = "128")]
        value_size: usize,
    },

    /// Read `put <key> <value>`, `get <seq>`, `stats`, `verify` lines from stdin
    Run,
}

fn main() {
    // Logs go to stderr so command output stays parseable
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,ringkv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("RingKV v{}", ringkv::VERSION);
    tracing::info!("Capacity: {} bytes", args.capacity);

    let mut builder = Config::builder().capacity(args.capacity);
    if let Some(limit) = args.max_frame {
        builder = builder.max_frame_size(limit);
    }

    let mut store = match BlockStore::with_config(builder.build()) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to create store: {}", e);
            std::process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = match args.command {
        Commands::Fill {
            count,
            key_size,
            value_size,
        } => fill(&mut store, count, key_size, value_size, args.json, &mut out),
        Commands::Run => {
            let stdin = io::stdin();
            run_script(&mut store, stdin.lock(), args.json, &mut out)
        }
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {}", e);
        std::process::exit(1);
    }
}

/// Write `count` synthetic blocks, then print stats and a verify report
fn fill<W: Write>(
    store: &mut BlockStore,
    count: u64,
    key_size: usize,
    value_size: usize,
    json: bool,
    out: &mut W,
) -> ringkv::Result<()> {
    let value = vec![b'v'; value_size];

    for i in 0..count {
        let key = format!("{:0>width$}", i, width = key_size);
        store.put(key.as_bytes(), &value, unix_millis())?;
    }

    print_stats(store, json, out)?;
    print_verify(store, json, out)
}

/// Execute one command per input line
///
/// Misses and rejected puts are reported inline; only I/O failures abort.
fn run_script<R: BufRead, W: Write>(
    store: &mut BlockStore,
    input: R,
    json: bool,
    out: &mut W,
) -> ringkv::Result<()> {
    for line in input.lines() {
        let line = line?;
        let mut parts = line.split_whitespace();

        match (parts.next(), parts.next(), parts.next()) {
            (None, _, _) => continue,
            (Some("put"), Some(key), Some(value)) => {
                match store.put(key.as_bytes(), value.as_bytes(), unix_millis()) {
                    Ok(sequence) => writeln!(out, "OK {}", sequence)?,
                    Err(e) => writeln!(out, "ERR {}", e)?,
                }
            }
            (Some("get"), Some(sequence), None) => match sequence.parse::<u64>() {
                Ok(sequence) => match store.get(sequence) {
                    Ok(block) => writeln!(out, "VALUE {}", String::from_utf8_lossy(&block.value))?,
                    Err(RingError::Stale(_)) => writeln!(out, "STALE")?,
                    Err(RingError::NotFound(_)) => writeln!(out, "NOT_FOUND")?,
                    Err(e) => writeln!(out, "ERR {}", e)?,
                },
                Err(_) => writeln!(out, "ERR invalid sequence: {}", sequence)?,
            },
            (Some("stats"), None, _) => print_stats(store, json, out)?,
            (Some("verify"), None, _) => print_verify(store, json, out)?,
            _ => writeln!(out, "ERR unrecognized command: {}", line.trim())?,
        }
    }

    Ok(())
}

fn print_stats<W: Write>(store: &BlockStore, json: bool, out: &mut W) -> ringkv::Result<()> {
    let stats = store.stats();
    if json {
        let rendered = serde_json::to_string(&stats).map_err(io::Error::from)?;
        writeln!(out, "{}", rendered)?;
    } else {
        writeln!(
            out,
            "puts={} rejected={} evictions={} bytes_written={} live_blocks={} live_bytes={} capacity={}",
            stats.puts,
            stats.rejected,
            stats.evictions,
            stats.bytes_written,
            stats.live_blocks,
            stats.live_bytes,
            stats.capacity
        )?;
    }
    Ok(())
}

fn print_verify<W: Write>(store: &BlockStore, json: bool, out: &mut W) -> ringkv::Result<()> {
    let report = store.verify();
    if json {
        let rendered = serde_json::to_string(&report).map_err(io::Error::from)?;
        writeln!(out, "{}", rendered)?;
    } else {
        writeln!(
            out,
            "verified={} corrupted={} consistent={}",
            report.frames_verified, report.frames_corrupted, report.consistent
        )?;
    }
    Ok(())
}

/// Wall-clock time in unix millis; the store never reads a clock itself
fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}
