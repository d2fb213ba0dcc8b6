use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use huffpack::config::AppConfig;
use huffpack::engine::{compress, decompress};
use huffpack::protocol::container::Container;
use huffpack::stats::{CompressionStats, ContainerSummary};
use huffpack::utils::hash::sha256_hex;
use huffpack::utils::io::{is_stdio, read_input, write_output, STDIO_PATH};

#[derive(Parser)]
#[command(name = "huffpack")]
#[command(about = "Static Huffman compression for files and streams")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true, help = "Config file path")]
    config: Option<String>,

    #[arg(long, global = true, help = "Output as JSON")]
    json: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Compress INPUT ("-" for stdin) into a container
    Encode {
        input: PathBuf,
        #[arg(short, long, help = "Output path, \"-\" for stdout")]
        output: Option<PathBuf>,
    },
    /// Restore the original bytes from a container
    Decode {
        input: PathBuf,
        #[arg(short, long, help = "Output path, \"-\" for stdout")]
        output: Option<PathBuf>,
    },
    /// Show container header fields and the code table
    Inspect {
        input: PathBuf,
    },
    /// Decode CONTAINER and compare it with ORIGINAL
    Verify {
        container: PathBuf,
        original: PathBuf,
    },
    GenerateConfig {
        #[arg(long, default_value = "huffpack.toml", help = "Config file path")]
        output: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_filter).context("invalid log filter")?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    debug!("Loaded config: {:?}", config);

    match cli.command {
        Commands::Encode { input, output } => {
            let output = output.unwrap_or_else(|| encode_target(&input, &config.output_extension));
            run_encode(&config, &input, &output, cli.json)
        }
        Commands::Decode { input, output } => {
            let output = output.unwrap_or_else(|| decode_target(&input, &config.output_extension));
            run_decode(&config, &input, &output, cli.json)
        }
        Commands::Inspect { input } => run_inspect(&config, &input, cli.json),
        Commands::Verify { container, original } => {
            run_verify(&config, &container, &original, cli.json)
        }
        Commands::GenerateConfig { output } => {
            AppConfig::default().save(&output)?;
            if cli.json {
                println!("{}", serde_json::json!({"status": "created", "path": output}));
            } else {
                println!("✅ Configuration file created: {}", output);
            }
            Ok(())
        }
    }
}

fn encode_target(input: &Path, extension: &str) -> PathBuf {
    if is_stdio(input) {
        return PathBuf::from(STDIO_PATH);
    }
    let mut name = OsString::from(input.as_os_str());
    name.push(extension);
    PathBuf::from(name)
}

fn decode_target(input: &Path, extension: &str) -> PathBuf {
    if is_stdio(input) {
        return PathBuf::from(STDIO_PATH);
    }
    match input.to_str().and_then(|s| s.strip_suffix(extension)) {
        Some(stripped) if !stripped.is_empty() => PathBuf::from(stripped),
        _ => {
            let mut name = OsString::from(input.as_os_str());
            name.push(".out");
            PathBuf::from(name)
        }
    }
}

fn load_container(config: &AppConfig, path: &Path) -> Result<Container> {
    let data = read_input(path).with_context(|| format!("reading {}", path.display()))?;
    let container = Container::from_bytes(&data, config.verify_checksum)
        .with_context(|| format!("parsing container {}", path.display()))?;
    Ok(container)
}

/// Human-readable lines go to stderr when stdout carries data.
fn report(data_on_stdout: bool, line: String) {
    if data_on_stdout {
        eprintln!("{}", line);
    } else {
        println!("{}", line);
    }
}

fn run_encode(config: &AppConfig, input: &Path, output: &Path, json: bool) -> Result<()> {
    let data = read_input(input).with_context(|| format!("reading {}", input.display()))?;
    let container = compress(&data, &config.engine_config())?;
    let bytes = container.to_bytes();
    write_output(output, &bytes).with_context(|| format!("writing {}", output.display()))?;

    let stats = CompressionStats::measure(&data, &container, bytes.len());
    info!(
        "Encoded {} bytes into {} bytes ({} distinct symbols)",
        stats.original_bytes, stats.container_bytes, stats.distinct_symbols
    );

    let to_stdout = is_stdio(output);
    if json {
        report(to_stdout, serde_json::json!({
            "input": input.display().to_string(),
            "output": output.display().to_string(),
            "sha256": sha256_hex(&data),
            "stats": stats,
        }).to_string());
    } else {
        report(to_stdout, format!("✅ Compression complete: {}", output.display()));
        report(to_stdout, format!(
            "   {} → {} bytes ({:.1}%), {:.3} bits/symbol (entropy {:.3})",
            stats.original_bytes,
            stats.container_bytes,
            stats.ratio * 100.0,
            stats.average_code_length,
            stats.entropy_bits
        ));
    }
    Ok(())
}

fn run_decode(config: &AppConfig, input: &Path, output: &Path, json: bool) -> Result<()> {
    let container = load_container(config, input)?;
    let data = decompress(&container)
        .with_context(|| format!("decoding {}", input.display()))?;
    write_output(output, &data).with_context(|| format!("writing {}", output.display()))?;
    info!("Decoded {} bytes from {}", data.len(), input.display());

    let to_stdout = is_stdio(output);
    if json {
        report(to_stdout, serde_json::json!({
            "input": input.display().to_string(),
            "output": output.display().to_string(),
            "bytes": data.len(),
            "sha256": sha256_hex(&data),
        }).to_string());
    } else {
        report(to_stdout, format!("✅ Decompression complete: {} ({} bytes)", output.display(), data.len()));
    }
    Ok(())
}

fn run_inspect(config: &AppConfig, input: &Path, json: bool) -> Result<()> {
    let container = load_container(config, input)?;
    let summary = ContainerSummary::from_container(&container);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("📦 Container {}", input.display());
    println!("   Version: {}", summary.version);
    println!("   Symbols: {}", summary.symbol_count);
    println!("   Payload: {} bits in {} bytes ({} padding bits)",
        summary.bit_count, summary.payload_bytes, summary.padding_bits);
    println!("   Tree: {} bytes, {} leaves", summary.tree_bytes, summary.codes.len());
    for entry in &summary.codes {
        println!("   0x{:02x} {:>4}  {}", entry.symbol, printable(entry.symbol), entry.code);
    }
    Ok(())
}

fn printable(symbol: u8) -> String {
    if symbol.is_ascii_graphic() {
        format!("'{}'", symbol as char)
    } else {
        String::new()
    }
}

fn run_verify(config: &AppConfig, container_path: &Path, original: &Path, json: bool) -> Result<()> {
    let container = load_container(config, container_path)?;
    let decoded = decompress(&container)
        .with_context(|| format!("decoding {}", container_path.display()))?;
    let expected = read_input(original).with_context(|| format!("reading {}", original.display()))?;

    let decoded_hash = sha256_hex(&decoded);
    let expected_hash = sha256_hex(&expected);
    let hash_match = decoded_hash == expected_hash;

    if json {
        println!("{}", serde_json::json!({
            "hash_match": hash_match,
            "decoded_sha256": decoded_hash,
            "original_sha256": expected_hash,
        }));
    } else if hash_match {
        println!("✅ Verification PASSED ({})", decoded_hash);
    } else {
        println!("❌ Verification FAILED");
        println!("   decoded:  {}", decoded_hash);
        println!("   original: {}", expected_hash);
    }

    if !hash_match {
        bail!("{} does not decode to {}", container_path.display(), original.display());
    }
    Ok(())
}
