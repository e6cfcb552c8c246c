use flowplot::{Edge, LayoutRequest, LayoutSession, SessionConfig, fingerprint_graph};
use serde::{Deserialize, Serialize};
use std::io::Read;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "FLOWPLOT_LOG";

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Layout(flowplot::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Layout(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<flowplot::Error> for CliError {
    fn from(value: flowplot::Error) -> Self {
        Self::Layout(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Run,
    Fingerprint,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    config: Option<String>,
    capacity: Option<usize>,
    pretty: bool,
}

/// `{nodes, edges}` as accepted by the `fingerprint` command.
#[derive(Deserialize)]
struct Snapshot {
    nodes: Vec<String>,
    #[serde(default)]
    edges: Vec<Edge>,
}

fn usage() -> &'static str {
    "flowplot-cli\n\
\n\
USAGE:\n\
  flowplot-cli [run] [--pretty] [--config <path>] [--capacity <n>] [<path>|-]\n\
  flowplot-cli fingerprint [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - run accepts one request object or an array of requests; an array is executed in order\n\
    against a single session, so repeated BiFlow topologies are served from the cache.\n\
  - --config reads a session config JSON ({\"cache\":{...},\"biflow\":{...},\"timeline\":{...}}).\n\
  - fingerprint prints the topology hash of a {\"nodes\":[...],\"edges\":[...]} snapshot.\n\
  - Set FLOWPLOT_LOG (e.g. FLOWPLOT_LOG=debug) to log to stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "run" => args.command = Command::Run,
            "fingerprint" => args.command = Command::Fingerprint,
            "--pretty" => args.pretty = true,
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--capacity" => {
                let Some(n) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let n = n.parse::<usize>().map_err(|_| CliError::Usage(usage()))?;
                if n == 0 {
                    return Err(CliError::Usage(usage()));
                }
                args.capacity = Some(n);
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn load_config(args: &Args) -> Result<SessionConfig, CliError> {
    let mut config = match args.config.as_deref() {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => SessionConfig::default(),
    };
    if let Some(capacity) = args.capacity {
        config.cache.capacity = capacity;
    }
    Ok(config)
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;

    match args.command {
        Command::Fingerprint => {
            let snapshot: Snapshot = serde_json::from_str(&text)?;
            println!("{}", fingerprint_graph(&snapshot.nodes, &snapshot.edges));
            Ok(())
        }
        Command::Run => {
            let mut session = LayoutSession::new(load_config(&args)?);
            let requests = LayoutRequest::batch_from_json(&text)?;
            tracing::debug!(requests = requests.len(), "running layout requests");

            let responses = requests
                .iter()
                .map(|req| req.execute(&mut session))
                .collect::<Vec<_>>();
            if text.trim_start().starts_with('[') {
                write_json(&responses, args.pretty)
            } else {
                match responses.first() {
                    Some(resp) => write_json(resp, args.pretty),
                    None => write_json(&responses, args.pretty),
                }
            }
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be installed when embedded in a test harness; keep going.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_logging();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
