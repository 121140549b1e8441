//! Courier CLI: command-line interface for the delivery network engine
//!
//! Loads a network description and an optional engine configuration, runs
//! one analysis and prints the result as a table, JSON or CSV.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use courier::{
    classify, euler_circuit, eulerize, odd_degree_vertices, shortest_path, shortest_paths_from,
    EngineConfig, GraphStore, NetworkSpec, PathAlgorithm,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "courier", version, about = "Courier delivery network CLI")]
struct Cli {
    /// Network description (.yaml, .yml or .json)
    #[arg(long, short, global = true, env = "COURIER_NETWORK")]
    network: Option<PathBuf>,

    /// Engine configuration (.yaml, .yml or .json)
    #[arg(long, short, global = true, env = "COURIER_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum AlgorithmArg {
    Dijkstra,
    BellmanFord,
}

impl From<AlgorithmArg> for PathAlgorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Dijkstra => PathAlgorithm::Dijkstra,
            AlgorithmArg::BellmanFord => PathAlgorithm::BellmanFord,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show network statistics
    Info,
    /// Shortest route between two vertices, or a distance table
    Route {
        /// Start vertex
        from: String,

        /// Destination; omit to list distances to every reachable vertex
        to: Option<String>,

        #[arg(long, default_value = "dijkstra")]
        algorithm: AlgorithmArg,
    },
    /// Eulerian classification and odd-degree vertices
    Classify,
    /// Duplicate edges at minimum cost until the network is Eulerian
    Eulerize,
    /// Eulerize, then print a circuit travelling every edge once
    Circuit {
        /// Vertex the circuit starts and ends at
        #[arg(long)]
        start: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    let path = cli
        .network
        .as_ref()
        .context("no network given; pass --network <file> or set COURIER_NETWORK")?;
    let spec = NetworkSpec::from_file(path)
        .with_context(|| format!("failed to load network {}", path.display()))?;
    let mut store = spec.build()?;

    match cli.command {
        Commands::Info => run_info(&store, &cli.format),
        Commands::Route { from, to, algorithm } => {
            run_route(&store, &from, to.as_deref(), algorithm.into(), &cli.format)
        }
        Commands::Classify => run_classify(&store, &cli.format),
        Commands::Eulerize => run_eulerize(&mut store, &config, &cli.format),
        Commands::Circuit { start } => run_circuit(&mut store, &config, start.as_deref(), &cli.format),
    }
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header.to_vec());
    table
}

fn run_info(store: &GraphStore, format: &OutputFormat) -> Result<()> {
    let stats = store.statistics();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Csv => {
            println!("vertices,edges,total_weight,average_degree");
            println!(
                "{},{},{},{}",
                stats.vertex_count, stats.edge_count, stats.total_weight, stats.average_degree
            );
        }
        OutputFormat::Table => {
            println!("Vertices:       {}", stats.vertex_count);
            println!("Edges:          {}", stats.edge_count);
            println!("Total weight:   {:.3}", stats.total_weight);
            println!("Average degree: {:.3}", stats.average_degree);
            println!("Connected:      {}", store.is_connected());

            let mut table = new_table(&["Vertex", "Degree"]);
            for (id, name) in store.vertices() {
                table.add_row(vec![name.to_string(), store.degree(id).to_string()]);
            }
            println!("{}", table);
        }
    }
    Ok(())
}

fn run_route(
    store: &GraphStore,
    from: &str,
    to: Option<&str>,
    algorithm: PathAlgorithm,
    format: &OutputFormat,
) -> Result<()> {
    let Some(to) = to else {
        let distances = shortest_paths_from(store, from, algorithm)?;
        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&distances)?),
            OutputFormat::Csv => {
                println!("vertex,distance,predecessor");
                for entry in &distances {
                    println!(
                        "{},{},{}",
                        csv_field(&entry.vertex),
                        entry.distance,
                        csv_field(entry.predecessor.as_deref().unwrap_or(""))
                    );
                }
            }
            OutputFormat::Table => {
                let mut table = new_table(&["Vertex", "Distance", "Predecessor"]);
                for entry in &distances {
                    table.add_row(vec![
                        entry.vertex.clone(),
                        format!("{:.3}", entry.distance),
                        entry.predecessor.clone().unwrap_or_else(|| "-".to_string()),
                    ]);
                }
                println!("{}", table);
                println!("{} reachable from {} ({})", distances.len(), from, algorithm);
            }
        }
        return Ok(());
    };

    let route = shortest_path(store, from, to, algorithm)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&route)?),
        OutputFormat::Csv => {
            println!("step,vertex");
            for (step, vertex) in route.path.iter().enumerate() {
                println!("{},{}", step, csv_field(vertex));
            }
        }
        OutputFormat::Table => {
            println!("{}", route.path.join(" -> "));
            println!("Distance: {:.3} ({} hops, {})", route.distance, route.hops(), algorithm);
        }
    }
    Ok(())
}

fn run_classify(store: &GraphStore, format: &OutputFormat) -> Result<()> {
    let class = classify(store)?;
    let odd = odd_degree_vertices(store)?;
    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "classification": class,
                "odd_vertices": odd,
                "connected": store.is_connected(),
            }))?
        ),
        OutputFormat::Csv => {
            println!("classification,odd_vertices");
            println!("{},{}", class, odd.len());
        }
        OutputFormat::Table => {
            println!("Classification: {}", class);
            if odd.is_empty() {
                println!("Odd-degree vertices: none");
            } else {
                println!("Odd-degree vertices: {}", odd.join(", "));
            }
        }
    }
    Ok(())
}

fn run_eulerize(store: &mut GraphStore, config: &EngineConfig, format: &OutputFormat) -> Result<()> {
    let report = eulerize(store, config)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Csv => {
            println!("from,to,cost");
            for pair in &report.pairs {
                println!("{},{},{}", csv_field(&pair.from), csv_field(&pair.to), pair.cost);
            }
        }
        OutputFormat::Table => {
            if report.is_noop() {
                println!("Already Eulerian; no edges added");
                return Ok(());
            }
            let mut table = new_table(&["From", "To", "Cost", "Duplicated route"]);
            for pair in &report.pairs {
                table.add_row(vec![
                    pair.from.clone(),
                    pair.to.clone(),
                    format!("{:.3}", pair.cost),
                    pair.path.join(" -> "),
                ]);
            }
            println!("{}", table);
            println!(
                "{} edges added, weight {:.3}{}",
                report.added_edges.len(),
                report.added_weight,
                if report.exact { "" } else { " (greedy approximation)" }
            );
        }
    }
    Ok(())
}

fn run_circuit(
    store: &mut GraphStore,
    config: &EngineConfig,
    start: Option<&str>,
    format: &OutputFormat,
) -> Result<()> {
    let report = eulerize(store, config)?;
    let circuit = euler_circuit(store, start)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&circuit)?),
        OutputFormat::Csv => {
            println!("step,vertex");
            for (step, vertex) in circuit.vertices.iter().enumerate() {
                println!("{},{}", step, csv_field(vertex));
            }
        }
        OutputFormat::Table => {
            println!("{}", circuit.vertices.join(" -> "));
            println!(
                "{} edges ({} duplicated), total weight {:.3}",
                circuit.len(),
                report.added_edges.len(),
                circuit.total_weight
            );
        }
    }
    Ok(())
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
