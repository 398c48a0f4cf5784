use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, Subcommand};
use tower_lsp::{LspService, Server};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use verse_explorer::{
    VerseExplorerServer,
    cli::{MapRequest, run_map},
};

#[derive(Parser, Debug)]
#[command(name = "verse-explorer", version, about)]
struct Args {
    #[arg(long, short)]
    verbose: bool,

    #[arg(long)]
    log_file: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the Language Server Protocol over stdio (the default).
    Lsp,
    /// Print the graph messages for one caret position as JSON.
    Map {
        file: PathBuf,

        /// Zero-based caret line.
        #[arg(long)]
        line: u32,

        /// Zero-based caret column, in UTF-16 code units.
        #[arg(long, default_value_t = 0)]
        character: u32,

        /// Directory to index before exploring; repeatable.
        #[arg(long = "root")]
        roots: Vec<PathBuf>,

        /// JSON settings file shaped like the LSP initialization options.
        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long)]
        pretty: bool,
    },
}

fn default_log_path() -> PathBuf {
    let dir = dirs_or_tmp();
    dir.join("verse-explorer.log")
}

fn dirs_or_tmp() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        let dir = PathBuf::from(home).join(".verse-explorer");
        if std::fs::create_dir_all(&dir).is_ok() {
            return dir;
        }
    }
    std::env::temp_dir()
}

fn init_tracing(args: &Args) -> PathBuf {
    let stderr_filter = if args.verbose {
        EnvFilter::new("verse_explorer=debug,tower_lsp=debug")
    } else {
        EnvFilter::new("verse_explorer=info,tower_lsp=warn")
    };

    let file_filter = if args.verbose {
        EnvFilter::new("verse_explorer=debug,tower_lsp=info")
    } else {
        EnvFilter::new("verse_explorer=info,tower_lsp=warn")
    };

    let log_path = args.log_file.as_ref().map(PathBuf::from).unwrap_or_else(default_log_path);

    let file_appender = tracing_appender::rolling::never(
        log_path.parent().unwrap_or(Path::new(".")),
        log_path.file_name().unwrap_or(std::ffi::OsStr::new("verse-explorer.log")),
    );

    let file_layer = fmt::layer().with_writer(file_appender).with_ansi(false).with_target(false).with_filter(file_filter);

    let stderr_layer =
        fmt::layer().with_writer(std::io::stderr).with_ansi(false).with_target(false).with_filter(stderr_filter);

    tracing_subscriber::registry().with(file_layer).with(stderr_layer).init();
    log_path
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_path = init_tracing(&args);

    match args.command {
        None | Some(Command::Lsp) => {
            info!("Starting verse-explorer server v{}", env!("CARGO_PKG_VERSION"));
            info!("Log file: {}", log_path.display());

            let stdin = tokio::io::stdin();
            let stdout = tokio::io::stdout();
            let (service, socket) = LspService::new(VerseExplorerServer::new);
            Server::new(stdin, stdout, socket).serve(service).await;

            info!("verse-explorer server stopped");
            ExitCode::SUCCESS
        },
        Some(Command::Map {
            file,
            line,
            character,
            roots,
            config,
            pretty,
        }) => {
            let request = MapRequest {
                file,
                line,
                character,
                roots,
                config,
            };
            let rendered = run_map(&request).await.and_then(|messages| {
                let json = if pretty {
                    serde_json::to_string_pretty(&messages)
                } else {
                    serde_json::to_string(&messages)
                };
                json.map_err(Into::into)
            });
            match rendered {
                Ok(json) => {
                    println!("{json}");
                    ExitCode::SUCCESS
                },
                Err(err) => {
                    error!("map failed: {err}");
                    eprintln!("verse-explorer: {err}");
                    ExitCode::FAILURE
                },
            }
        },
    }
}
