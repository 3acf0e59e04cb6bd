use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use trace_qr::config::overrides_from_env;
use trace_qr::tools::{read_scan_lines, scan_stats};
use trace_qr::{
    ECLevel, FsDownloadHost, OutputFormat, ProductInfo, RenderOverrides, TraceEncoder,
    build_envelope, decode_batch, decode_content, download_qr_image, is_valid_qr_text,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tracetool", version, about = "Product traceability QR tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the envelope JSON for a traceability code
    Envelope {
        #[arg(long)]
        code: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Render arbitrary text into a QR image
    Render {
        #[arg(long)]
        text: String,
        /// Option overrides as JSON, e.g. '{"darkColor":"#096dd9"}'
        #[arg(long)]
        options: Option<String>,
        #[arg(long)]
        level: Option<ECLevel>,
        #[arg(long)]
        format: Option<OutputFormat>,
        #[arg(long)]
        width: Option<u32>,
        /// Write the image here instead of printing the data URI
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Render a product trace image
    Product {
        #[arg(long)]
        code: String,
        #[arg(long)]
        name: Option<String>,
        /// Write the image here instead of printing the data URI
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Decode scanned text and print the result as JSON
    Decode { text: String },
    /// Check scanned text; exits non-zero when invalid
    Validate { text: String },
    /// Decode every line of a scan file and summarize
    ScanFile {
        #[arg(long)]
        file: PathBuf,
        /// Print each decoded scan
        #[arg(long)]
        verbose: bool,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("TRACE_QR_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::Envelope { code, name } => envelope_cmd(&code, name),
        Command::Render {
            text,
            options,
            level,
            format,
            width,
            out,
        } => {
            let flags = RenderOverrides {
                error_correction_level: level,
                output_format: format,
                pixel_width: width,
                ..RenderOverrides::default()
            };
            render_cmd(&text, options.as_deref(), flags, out.as_deref())
        }
        Command::Product { code, name, out } => product_cmd(&code, name, out.as_deref()),
        Command::Decode { text } => decode_cmd(&text),
        Command::Validate { text } => validate_cmd(&text),
        Command::ScanFile { file, verbose } => scan_file_cmd(&file, verbose),
    }
}

fn product_info(name: Option<String>) -> Option<ProductInfo> {
    name.map(ProductInfo::named)
}

fn envelope_cmd(code: &str, name: Option<String>) -> ExitCode {
    let info = product_info(name);
    match build_envelope(code, info.as_ref()).to_json() {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Failed to serialize envelope: {err}");
            ExitCode::FAILURE
        }
    }
}

fn render_cmd(text: &str, options: Option<&str>, flags: RenderOverrides, out: Option<&Path>) -> ExitCode {
    let json_overrides = match options.map(serde_json::from_str::<RenderOverrides>) {
        Some(Ok(overrides)) => overrides,
        Some(Err(err)) => {
            eprintln!("Invalid --options JSON: {err}");
            return ExitCode::FAILURE;
        }
        None => RenderOverrides::default(),
    };
    let overrides = overrides_from_env().layer(json_overrides).layer(flags);

    match TraceEncoder::new().render_qr_image(text, &overrides) {
        Ok(uri) => emit(&uri, out),
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn product_cmd(code: &str, name: Option<String>, out: Option<&Path>) -> ExitCode {
    let info = product_info(name);
    match TraceEncoder::new().build_product_trace_image(code, info.as_ref()) {
        Ok(uri) => emit(&uri, out),
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn emit(uri: &str, out: Option<&Path>) -> ExitCode {
    let Some(out) = out else {
        println!("{uri}");
        return ExitCode::SUCCESS;
    };

    let dir = match out.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let filename = out.file_name().and_then(|n| n.to_str());
    let host = FsDownloadHost::new(dir);
    match download_qr_image(&host, uri, filename) {
        Ok(()) => {
            println!("Wrote {}", out.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Failed to write {}: {}", out.display(), err);
            ExitCode::FAILURE
        }
    }
}

fn decode_cmd(text: &str) -> ExitCode {
    let decoded = decode_content(text);
    match serde_json::to_string_pretty(&decoded) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Failed to serialize result: {err}");
            ExitCode::FAILURE
        }
    }
}

fn validate_cmd(text: &str) -> ExitCode {
    let valid = is_valid_qr_text(text);
    println!("{valid}");
    if valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn scan_file_cmd(file: &Path, verbose: bool) -> ExitCode {
    let scans = match read_scan_lines(file) {
        Ok(scans) => scans,
        Err(err) => {
            eprintln!("Failed to read {}: {}", file.display(), err);
            return ExitCode::FAILURE;
        }
    };
    if scans.is_empty() {
        println!("No scans found in {}", file.display());
        return ExitCode::SUCCESS;
    }

    if verbose {
        for (i, decoded) in decode_batch(&scans).iter().enumerate() {
            println!(
                "  [{}] code={} name={} structured={}",
                i + 1,
                decoded.traceability_code,
                decoded.product_name,
                decoded.is_structured()
            );
        }
    }

    let stats = scan_stats(&scans);
    println!("Scans: {}", stats.total);
    println!("  structured: {}", stats.structured);
    println!("  bare:       {}", stats.bare);
    println!("  rejected:   {}", stats.rejected);
    println!("Accepted: {:.2}%", stats.accept_ratio() * 100.0);
    ExitCode::SUCCESS
}
