use crate::graph::{BaseGraph, EliminationGraph, MutableGraph};
use crate::tree_decomposition::TreeDecomposition;
use fxhash::FxHashMap;
use std::cell::RefCell;
use std::convert::TryFrom;
use std::fmt::Write as FmtWrite;
use std::io;
use std::io::{BufRead, ErrorKind, Write};

fn invalid_line(line: &str) -> io::Error {
    io::Error::new(ErrorKind::InvalidInput, format!("Invalid line: {}", line))
}

fn parse_pair<'a>(line: &str, mut tokens: impl Iterator<Item = &'a str>) -> io::Result<(usize, usize)> {
    let u = tokens.next().and_then(|s| s.parse().ok());
    let v = tokens.next().and_then(|s| s.parse().ok());
    match (u, v, tokens.next()) {
        (Some(u), Some(v), None) => Ok((u, v)),
        _ => Err(invalid_line(line)),
    }
}

/// `p <kind> n m` header. Returns `(n, m)`.
fn parse_header(line: &str, kind: &str) -> io::Result<(usize, usize)> {
    let mut tokens = line.split_whitespace().skip(1);
    if tokens.next() != Some(kind) {
        return Err(invalid_line(line));
    }
    parse_pair(line, tokens)
}

/// PACE `.gr` input: `p tw n m` header, `c` comments and one `u v` edge per
/// line. Vertex ids are kept as they appear in the file.
pub struct PaceReader<T: BufRead>(pub T);

impl<T: BufRead> TryFrom<PaceReader<T>> for EliminationGraph {
    type Error = io::Error;

    fn try_from(reader: PaceReader<T>) -> Result<Self, Self::Error> {
        let mut graph = EliminationGraph::new();
        for line in reader.0.lines() {
            let line = line?;
            let trimmed = line.trim();
            match trimmed.chars().next() {
                None | Some('c') => {}
                Some('p') => {
                    parse_header(trimmed, "tw")?;
                }
                _ => {
                    let (u, v) = parse_pair(trimmed, trimmed.split_whitespace())?;
                    graph.add_edge(u, v);
                }
            }
        }
        Ok(graph)
    }
}

/// DIMACS `.col` input: `p edge n m` header and `e u v` edge lines.
pub struct DimacsReader<T: BufRead>(pub T);

impl<T: BufRead> TryFrom<DimacsReader<T>> for EliminationGraph {
    type Error = io::Error;

    fn try_from(reader: DimacsReader<T>) -> Result<Self, Self::Error> {
        let mut graph = EliminationGraph::new();
        for line in reader.0.lines() {
            let line = line?;
            let trimmed = line.trim();
            match trimmed.chars().next() {
                None | Some('c') => {}
                Some('p') => {
                    parse_header(trimmed, "edge")?;
                }
                Some('e') => {
                    let (u, v) = parse_pair(trimmed, trimmed.split_whitespace().skip(1))?;
                    graph.add_edge(u, v);
                }
                _ => return Err(invalid_line(trimmed)),
            }
        }
        Ok(graph)
    }
}

/// Writes the PACE `.td` format. Bags are numbered from 1 in pre-order.
pub struct PaceWriter<'a, W: Write> {
    td: &'a TreeDecomposition,
    graph: &'a EliminationGraph,
    writer: W,
}

impl<'a, W: Write> PaceWriter<'a, W> {
    pub fn new(td: &'a TreeDecomposition, graph: &'a EliminationGraph, writer: W) -> Self {
        Self { td, graph, writer }
    }

    pub fn output(mut self) -> io::Result<()> {
        let index: FxHashMap<usize, usize> = self
            .td
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id, i + 1))
            .collect();
        writeln!(
            self.writer,
            "s td {} {} {}",
            self.td.order(),
            self.td.max_bag_size(),
            self.graph.order()
        )?;
        for node in self.td.iter() {
            let bag: Vec<String> = node.bag.iter().map(|v| v.to_string()).collect();
            if bag.is_empty() {
                writeln!(self.writer, "b {}", index[&node.id])?;
            } else {
                writeln!(self.writer, "b {} {}", index[&node.id], bag.join(" "))?;
            }
        }
        for (parent, child) in self.td.edges() {
            writeln!(self.writer, "{} {}", index[&parent], index[&child])?;
        }
        self.writer.flush()
    }
}

/// Writes a graph in the PACE `.gr` format.
pub fn write_pace_graph<W: Write>(graph: &EliminationGraph, mut writer: W) -> io::Result<()> {
    writeln!(writer, "p tw {} {}", graph.order(), graph.size())?;
    for (u, v) in graph.edges() {
        writeln!(writer, "{} {}", u, v)?;
    }
    writer.flush()
}

/// Graphviz output.
pub struct DotWriter<W: Write>(pub W);

impl<W: Write> DotWriter<W> {
    pub fn write_graph(mut self, graph: &EliminationGraph) -> io::Result<()> {
        writeln!(self.0, "graph {{")?;
        for (u, v) in graph.edges() {
            writeln!(self.0, "\t{} -- {}", u, v)?;
        }
        writeln!(self.0, "}}")?;
        self.0.flush()
    }

    pub fn write_tree(mut self, td: &TreeDecomposition) -> io::Result<()> {
        writeln!(self.0, "digraph {{")?;
        for node in td.iter() {
            let bag: Vec<String> = node.bag.iter().map(|v| v.to_string()).collect();
            writeln!(self.0, "\t{} [label = \"{{{}}}\"]", node.id, bag.join(", "))?;
        }
        for (parent, child) in td.edges() {
            writeln!(self.0, "\t{} -> {}", parent, child)?;
        }
        writeln!(self.0, "}}")?;
        self.0.flush()
    }
}

/// JSON output. Trees are nested `{"children": [..], "bag": [..]}` objects,
/// leaves omit `children`; graphs are an adjacency object.
pub struct JsonWriter<W: Write>(pub W);

fn join<'a>(values: impl Iterator<Item = &'a usize>) -> String {
    values.map(|v| v.to_string()).collect::<Vec<_>>().join(", ")
}

impl<W: Write> JsonWriter<W> {
    pub fn write_tree(mut self, td: &TreeDecomposition) -> io::Result<()> {
        if td.root().is_none() {
            writeln!(self.0, "null")?;
            return self.0.flush();
        }
        let out = RefCell::new(String::new());
        td.dfs(
            |_, _, is_leaf, _| {
                let mut out = out.borrow_mut();
                out.push('{');
                if !is_leaf {
                    out.push_str("\"children\": [");
                }
            },
            |node, _, is_leaf, is_last| {
                let mut out = out.borrow_mut();
                if !is_leaf {
                    out.push_str("], ");
                }
                // writing into a String cannot fail
                let _ = write!(out, "\"bag\": [{}]}}", join(node.bag.iter()));
                if !is_last {
                    out.push_str(", ");
                }
            },
        );
        writeln!(self.0, "{}", out.into_inner())?;
        self.0.flush()
    }

    pub fn write_graph(mut self, graph: &EliminationGraph) -> io::Result<()> {
        let mut entries = Vec::with_capacity(graph.order());
        for v in graph.vertices() {
            let nb = graph
                .neighborhood(v)
                .map_err(|e| io::Error::new(ErrorKind::Other, e))?;
            entries.push(format!("\t\"{}\": [{}]", v, join(nb.iter())));
        }
        writeln!(self.0, "{{")?;
        if !entries.is_empty() {
            writeln!(self.0, "{}", entries.join(",\n"))?;
        }
        writeln!(self.0, "}}")?;
        self.0.flush()
    }
}

#[cfg(test)]
mod tests {
    use crate::elimination_order::build_decomposition;
    use crate::graph::{BaseGraph, EliminationGraph};
    use crate::io::{write_pace_graph, DimacsReader, DotWriter, JsonWriter, PaceReader, PaceWriter};
    use crate::tree_decomposition::TreeDecomposition;
    use std::convert::TryFrom;
    use std::io::{BufReader, ErrorKind};

    fn read_pace(input: &str) -> std::io::Result<EliminationGraph> {
        EliminationGraph::try_from(PaceReader(BufReader::new(input.as_bytes())))
    }

    #[test]
    fn read_pace_graph() {
        let input = "c a comment\np tw 4 3\n1 2\n2 3\n\n3 4\n";
        let graph = read_pace(input).unwrap();
        assert_eq!(graph.order(), 4);
        assert_eq!(graph.size(), 3);
        assert!(graph.has_edge(1, 2));
        assert!(!graph.has_vertex(0));
    }

    #[test]
    fn read_pace_rejects_garbage() {
        let err = read_pace("p tw 2 1\n1 x\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(read_pace("p td 2 1\n1 2\n").is_err());
        assert!(read_pace("1 2 3\n").is_err());
    }

    #[test]
    fn read_dimacs_graph() {
        let input = "c comment\np edge 3 3\ne 1 2\ne 2 3\ne 3 1\n";
        let graph = EliminationGraph::try_from(DimacsReader(BufReader::new(input.as_bytes())))
            .unwrap();
        assert_eq!(graph.order(), 3);
        assert!(graph.is_clique(&[1, 2, 3]));

        let bad = "p edge 2 1\nx 1 2\n";
        assert!(EliminationGraph::try_from(DimacsReader(BufReader::new(bad.as_bytes()))).is_err());
    }

    #[test]
    fn pace_td_output() {
        let graph = EliminationGraph::from_edges(&[(1, 2), (2, 3)]);
        let td = build_decomposition(&graph, &[1, 2, 3]);
        let mut out = Vec::new();
        PaceWriter::new(&td, &graph, &mut out).output().unwrap();
        let out = String::from_utf8(out).unwrap();
        let lines: Vec<_> = out.lines().collect();
        // bags in pre-order: {3}, {2, 3}, {1, 2}
        assert_eq!(
            lines,
            vec!["s td 3 2 3", "b 1 3", "b 2 2 3", "b 3 1 2", "2 3", "1 2"]
        );
    }

    #[test]
    fn pace_graph_round_trip() {
        let graph = EliminationGraph::from_edges(&[(1, 2), (2, 3), (3, 1), (3, 7)]);
        let mut out = Vec::new();
        write_pace_graph(&graph, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("p tw 4 4\n"));
        let read = read_pace(&text).unwrap();
        let mut edges: Vec<_> = read.edges().collect();
        edges.sort_unstable();
        assert_eq!(edges, vec![(1, 2), (1, 3), (2, 3), (3, 7)]);
    }

    #[test]
    fn dot_output() {
        let graph = EliminationGraph::from_edges(&[(0, 1)]);
        let mut out = Vec::new();
        DotWriter(&mut out).write_graph(&graph).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "graph {\n\t0 -- 1\n}\n");

        let td = build_decomposition(&graph, &[0, 1]);
        let mut out = Vec::new();
        DotWriter(&mut out).write_tree(&td).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("digraph {\n"));
        assert!(text.contains("\t1 [label = \"{1}\"]"));
        assert!(text.contains("\t0 [label = \"{0, 1}\"]"));
        assert!(text.contains("\t1 -> 0"));
    }

    #[test]
    fn json_tree_output() {
        let mut td = TreeDecomposition::with_root(0, vec![0, 1].into_iter().collect());
        td.add_node(1).bag.extend(vec![1, 2]);
        td.connect_to_parent(0, 1);
        td.add_node(2).bag.extend(vec![1, 3]);
        td.connect_to_parent(0, 2);
        let mut out = Vec::new();
        JsonWriter(&mut out).write_tree(&td).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"children\": [{\"bag\": [1, 2]}, {\"bag\": [1, 3]}], \"bag\": [0, 1]}\n"
        );

        let mut out = Vec::new();
        JsonWriter(&mut out)
            .write_tree(&TreeDecomposition::default())
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "null\n");
    }

    #[test]
    fn json_graph_output() {
        let graph = EliminationGraph::from_edges(&[(0, 1), (0, 2)]);
        let mut out = Vec::new();
        JsonWriter(&mut out).write_graph(&graph).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\n\t\"0\": [1, 2],\n\t\"1\": [0],\n\t\"2\": [0]\n}\n"
        );
    }
}
