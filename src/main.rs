use quickbb_td::graph::{BaseGraph, EliminationGraph};
use quickbb_td::io::{DotWriter, JsonWriter, PaceReader, PaceWriter};
use quickbb_td::solver::{build_decomposition, Solver};
use quickbb_td::tree_decomposition::TreeDecomposition;
use std::convert::TryFrom;
use std::fs::{File, OpenOptions};
use std::io;
use std::io::{stdin, stdout, BufReader, Write};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use structopt::StructOpt;

#[cfg(not(target_env = "msvc"))]
use jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

#[derive(Debug)]
enum Format {
    Pace,
    Dot,
    Json,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pace" => Ok(Format::Pace),
            "dot" => Ok(Format::Dot),
            "json" => Ok(Format::Json),
            _ => Err(format!("unknown format: {}", s)),
        }
    }
}

#[derive(Debug, StructOpt)]
#[structopt(
    name = "quickbb-cli",
    about = "Reads a graph in .gr format and writes a tree decomposition of minimum width."
)]
struct Opt {
    /// Input file, using the graph format of the PACE challenge.
    /// `stdin` if not specified.
    #[structopt(short, long, parse(from_os_str))]
    input: Option<PathBuf>,

    /// Output file. `stdout` if not specified.
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Time limit in seconds. The best decomposition found so far is written
    /// once it expires.
    #[structopt(short, long, default_value = "360")]
    time: u64,

    /// Output format: pace, dot or json.
    #[structopt(short, long, default_value = "pace")]
    format: Format,
}

fn write_output<W: Write>(
    format: &Format,
    graph: &EliminationGraph,
    td: &TreeDecomposition,
    writer: W,
) -> io::Result<()> {
    match format {
        Format::Pace => PaceWriter::new(td, graph, writer).output(),
        Format::Dot => DotWriter(writer).write_tree(td),
        Format::Json => JsonWriter(writer).write_tree(td),
    }
}

fn main() -> io::Result<()> {
    #[cfg(feature = "pace-logging")]
    quickbb_td::logging::build_pace_logger();
    #[cfg(feature = "handle-ctrlc")]
    quickbb_td::signals::initialize()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    let opt = Opt::from_args();

    let graph: EliminationGraph = match opt.input {
        Some(ref path) => {
            let file = File::open(path)?;
            EliminationGraph::try_from(PaceReader(BufReader::new(file)))?
        }
        None => {
            let stdin = stdin();
            let reader = PaceReader(stdin.lock());
            EliminationGraph::try_from(reader)?
        }
    };

    let solution = Solver::default_exact()
        .time_limit(Some(Duration::from_secs(opt.time)))
        .solve(&graph);
    let td = build_decomposition(&graph, &solution.elimination_order);
    eprintln!(
        "c order {} width {} ({})",
        graph.order(),
        solution.treewidth,
        if solution.optimal { "optimal" } else { "upper bound" }
    );

    match opt.output {
        Some(path) => {
            let writer = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(path)?;
            write_output(&opt.format, &graph, &td, writer)
        }
        None => write_output(&opt.format, &graph, &td, stdout()),
    }
}
