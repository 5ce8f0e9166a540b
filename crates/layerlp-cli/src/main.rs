use layerlp::{Bounds, GeneratorConfig, Graph, Header, Metric, Solution, Summary};
use serde::Serialize;
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Config(layerlp::Error),
    Io(std::io::Error),
    Layerlp(layerlp::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Config(err) => write!(f, "error: {err}\n\n{}", usage()),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Layerlp(err) => write!(f, "error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<layerlp::Error> for CliError {
    fn from(value: layerlp::Error) -> Self {
        Self::Layerlp(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Command {
    #[default]
    Lp,
    Stats,
    Sol2Sgf,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    out: Option<String>,
    objective: Option<Metric>,
    bounds: Bounds,
    seed: Option<u64>,
    pretty: bool,
    name: Option<String>,
}

impl Args {
    fn config(&self) -> GeneratorConfig {
        GeneratorConfig {
            objective: self.objective,
            bounds: self.bounds,
            seed: self.seed,
        }
    }
}

#[derive(Serialize)]
struct StatsOut<'a> {
    naming_version: u32,
    config: &'a GeneratorConfig,
    summary: Summary,
}

fn usage() -> &'static str {
    "layerlp\n\
\n\
USAGE:\n\
  layerlp [lp] --objective <metric> [--total <n>] [--bottleneck <n>] [--stretch <x>] [--bn-stretch <x>] [--seed <n>] [--out <path>] [<path>|-]\n\
  layerlp stats --objective <metric> [--total <n>] [--bottleneck <n>] [--stretch <x>] [--bn-stretch <x>] [--pretty] [<path>|-]\n\
  layerlp sol2sgf [--name <graph-name>] [--out <path>] [<path>|-]\n\
\n\
METRICS:\n\
  total | bottleneck | stretch | bn_stretch | quadratic\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - lp prints the program to stdout by default; use --out to write a file.\n\
  - Bounds add `<metric> <= bound` side constraints and may be combined with any objective.\n\
  - --seed shuffles constraint and term order reproducibly.\n\
  - Set LAYERLP_LOG (e.g. LAYERLP_LOG=debug) to see diagnostics on stderr.\n\
"
}

fn next_value<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<&'a String, CliError> {
    it.next().ok_or(CliError::Usage(usage()))
}

fn parse_number<T: std::str::FromStr>(value: &str) -> Result<T, CliError> {
    value.parse::<T>().map_err(|_| CliError::Usage(usage()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "lp" => args.command = Command::Lp,
            "stats" => args.command = Command::Stats,
            "sol2sgf" => args.command = Command::Sol2Sgf,
            "--pretty" => args.pretty = true,
            "--objective" | "-o" => {
                let value = next_value(&mut it)?;
                args.objective = Some(value.parse::<Metric>().map_err(CliError::Config)?);
            }
            "--total" => args.bounds.total = Some(parse_number(next_value(&mut it)?)?),
            "--bottleneck" => args.bounds.bottleneck = Some(parse_number(next_value(&mut it)?)?),
            "--stretch" => args.bounds.stretch = Some(parse_number(next_value(&mut it)?)?),
            "--bn-stretch" => args.bounds.bn_stretch = Some(parse_number(next_value(&mut it)?)?),
            "--seed" => args.seed = Some(parse_number(next_value(&mut it)?)?),
            "--out" => args.out = Some(next_value(&mut it)?.clone()),
            "--name" => args.name = Some(next_value(&mut it)?.clone()),
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
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    if args.command != Command::Sol2Sgf {
        args.config().validate().map_err(CliError::Config)?;
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

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
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

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("LAYERLP_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args, argv: &[String]) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;

    match args.command {
        Command::Lp => {
            let header = Header::now(argv);
            let program = layerlp::compile(&text, &args.config(), &header)?;
            write_text(&program, args.out.as_deref())
        }
        Command::Stats => {
            let config = args.config();
            let graph = Graph::parse(&text)?;
            let formulation = layerlp::generate(&graph, &config)?;
            let out = StatsOut {
                naming_version: layerlp::NAMING_VERSION,
                config: &config,
                summary: formulation.summary(),
            };
            write_json(&out, args.pretty)
        }
        Command::Sol2Sgf => {
            let solution = Solution::parse(&text)?;
            let graph = solution.to_graph(args.name.as_deref())?;
            tracing::info!(
                variables = solution.len(),
                nodes = graph.node_count(),
                edges = graph.edge_count(),
                "translated solution"
            );
            write_text(&graph.to_sgf(), args.out.as_deref())
        }
    }
}

fn main() {
    init_tracing();

    let argv = std::env::args().collect::<Vec<_>>();
    let args = match parse_args(&argv) {
        Ok(v) => v,
        Err(err @ (CliError::Usage(_) | CliError::Config(_))) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args, &argv) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
