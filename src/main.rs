use clap::Parser;
use opencl_options::{FeatureMap, LangOptions, OpenClOptions, OptionsError};
use serde_json::json;
use tracing::Level;

/// Show which OpenCL extensions are supported and enabled for a target.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// OpenCL C version (100, 110, 120, 200 or 300)
    #[arg(long, default_value_t = 100)]
    cl_std: u32,
    /// C++ for OpenCL mode
    #[arg(long)]
    cpp: bool,
    /// JSON language configuration; overrides --cl-std and --cpp
    #[arg(long)]
    config: Option<std::path::PathBuf>,
    /// Target features, e.g. "-all,+cl_khr_fp64"
    #[arg(long, default_value = "")]
    cl_ext: String,
    /// Enable an extension as a pragma would (repeatable)
    #[arg(long)]
    enable: Vec<String>,
    /// Clear every enabled flag after --enable
    #[arg(long)]
    disable_all: bool,
    /// Enable supported core and optional core features
    #[arg(long)]
    enable_core: bool,
    /// Print predicate results for one extension instead of the full state
    #[arg(long)]
    query: Option<String>,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

// Language configuration from --config when given, else from --cl-std/--cpp.
fn lang_options(args: &Args) -> Result<LangOptions, OptionsError> {
    match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| OptionsError::Io(format!("{}: {e}", path.display())))?;
            LangOptions::from_json(&text)
        }
        None => LangOptions::new(args.cl_std, args.cpp),
    }
}

// Build the registry the flags describe and render the requested output.
fn run(args: &Args) -> Result<serde_json::Value, OptionsError> {
    let lang = lang_options(args)?;

    // Seed the catalog and apply target features.
    let mut opts = OpenClOptions::new();
    let features = FeatureMap::parse_cl_ext(&args.cl_ext, &opts)?;
    opts.add_support(&features, &lang);

    // Pragma-style enables, then bulk operations.
    for ext in &args.enable {
        opts.enable(ext, true)?;
    }
    if args.disable_all {
        opts.disable_all();
    }
    if args.enable_core {
        opts.enable_supported_core(&lang);
    }

    // One name's predicates, or the full snapshot.
    match &args.query {
        Some(ext) => Ok(json!({
            "name": ext,
            "known": opts.is_known(ext),
            "enabled": opts.is_enabled(ext),
            "supported": opts.is_supported(ext, &lang),
            "supported_core": opts.is_supported_core(ext, &lang),
            "supported_optional_core": opts.is_supported_optional_core(ext, &lang),
            "supported_extension": opts.is_supported_extension(ext, &lang),
        })),
        None => serde_json::to_value(opts.snapshot())
            .map_err(|e| OptionsError::Snapshot(e.to_string())),
    }
}

fn main() {
    // Parse CLI arguments.
    let args = Args::parse();

    // Map -v count to a log level; logs go to stderr.
    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    // Print result as pretty JSON, or the error and exit non-zero.
    match run(&args) {
        Ok(out) => match serde_json::to_string_pretty(&out) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
