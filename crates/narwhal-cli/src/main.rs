use narwhal::graph::{GraphDocument, LayoutConfig, VisibilityPreset};
use narwhal::{LayoutDump, LayoutRequest, LayoutSummary, layout};
use serde::Serialize;
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Graph(narwhal::graph::Error),
    Layout(narwhal::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Graph(err) => write!(f, "invalid graph: {err}"),
            CliError::Layout(err) => write!(f, "layout failed: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<narwhal::graph::Error> for CliError {
    fn from(value: narwhal::graph::Error) -> Self {
        Self::Graph(value)
    }
}

impl From<narwhal::Error> for CliError {
    fn from(value: narwhal::Error) -> Self {
        Self::Layout(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Default)]
struct Args {
    input: Option<String>,
    config: Option<String>,
    pretty: bool,
    show_types: bool,
    control_only: bool,
    cached_twice: bool,
    version: bool,
}

fn usage() -> &'static str {
    "narwhal-cli\n\
\n\
USAGE:\n\
  narwhal-cli --version\n\
  narwhal-cli [layout] [--pretty] [--show-types] [--control-only] [--cached-twice] [--config <path>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the graph document is read from stdin.\n\
  - --config replaces the document's layout constants with the JSON object in <path>.\n\
  - --control-only hides every node that is not part of the control skeleton.\n\
  - --cached-twice runs a cached rebuild after the full one and dumps its result.\n\
  - Set NARWHAL_LAYOUT_TIMING=1 to print per-pass timings to stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--version" | "-V" => args.version = true,
            "layout" => {}
            "--pretty" => args.pretty = true,
            "--show-types" => args.show_types = true,
            "--control-only" => args.control_only = true,
            "--cached-twice" => args.cached_twice = true,
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
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

fn timing_enabled() -> bool {
    std::env::var("NARWHAL_LAYOUT_TIMING")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn report_timings(summary: &LayoutSummary) {
    let t = &summary.timings;
    eprintln!(
        "[narwhal-timing] mode={:?} total={:?} rank={:?} order={:?} place={:?} back_edges={:?} bounds={:?}",
        summary.mode, t.total, t.rank, t.order, t.place, t.back_edges, t.bounds,
    );
}

fn run(args: Args) -> Result<(), CliError> {
    if args.version {
        println!("narwhal-cli {}", narwhal::VERSION);
        return Ok(());
    }

    let text = read_input(args.input.as_deref())?;
    let mut doc = GraphDocument::from_json_str(&text)?;
    if let Some(path) = args.config.as_deref() {
        let config: LayoutConfig = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        doc.config = config;
    }

    let mut graph = doc.into_graph()?;
    if args.control_only {
        graph.set_visibility_preset(VisibilityPreset::ControlOnly);
        graph.make_edges_visible();
    }

    let timings = timing_enabled();
    let request = LayoutRequest::full().with_show_types(args.show_types);
    let mut summary = layout(&mut graph, &request)?;
    if timings {
        report_timings(&summary);
    }
    if args.cached_twice {
        let request = LayoutRequest::cached().with_show_types(args.show_types);
        summary = layout(&mut graph, &request)?;
        if timings {
            report_timings(&summary);
        }
    }

    let dump = LayoutDump::new(&graph, &summary, args.show_types);
    write_json(&dump, args.pretty)
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
