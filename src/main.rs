use anyhow::{Context, Result};
use courier::{
    classify, euler_circuit, eulerize, odd_degree_vertices, shortest_path, shortest_paths_from,
    EngineConfig, GraphStore, NetworkSpec, PathAlgorithm,
};

const FOOD_REPS: &str = include_str!("../data/food_reps.yaml");

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("Courier delivery network engine v{}", courier::version());
    println!("==========================================");
    println!();

    let spec = match std::env::args().nth(1) {
        Some(path) => NetworkSpec::from_file(&path)
            .with_context(|| format!("failed to load network from {}", path))?,
        None => NetworkSpec::from_yaml_str(FOOD_REPS).context("embedded FoodReps network")?,
    };
    let mut store = spec.build()?;

    demo_network(&store);
    demo_routes(&store)?;
    demo_eulerize(&mut store)?;

    Ok(())
}

fn demo_network(store: &GraphStore) {
    println!("=== Demo 1: Delivery Network ===");
    let stats = store.statistics();
    println!("  Vertices: {}", stats.vertex_count);
    println!("  Edges: {}", stats.edge_count);
    println!("  Total distance: {:.2}", stats.total_weight);
    println!("  Connected: {}", store.is_connected());
    println!();
}

fn demo_routes(store: &GraphStore) -> Result<()> {
    println!("=== Demo 2: Shortest Routes ===");
    let Some((_, depot)) = store.vertices().next() else {
        println!("  (empty network)");
        return Ok(());
    };

    for (_, target) in store.vertices().skip(1) {
        let route = shortest_path(store, depot, target, PathAlgorithm::Dijkstra)?;
        println!(
            "  {} -> {}: {:.2} via {}",
            depot,
            target,
            route.distance,
            route.path.join(" -> ")
        );
    }

    println!("\n  Bellman-Ford distance table from {}:", depot);
    for entry in shortest_paths_from(store, depot, PathAlgorithm::BellmanFord)? {
        println!(
            "    {:<12} {:>6.2}  (via {})",
            entry.vertex,
            entry.distance,
            entry.predecessor.as_deref().unwrap_or("-")
        );
    }
    println!();
    Ok(())
}

fn demo_eulerize(store: &mut GraphStore) -> Result<()> {
    println!("=== Demo 3: Delivery Circuit ===");
    println!("  Classification: {}", classify(store)?);

    let odd = odd_degree_vertices(store)?;
    if !odd.is_empty() {
        println!("  Odd-degree vertices: {}", odd.join(", "));
    }

    let report = eulerize(store, &EngineConfig::default())?;
    if report.is_noop() {
        println!("  Already Eulerian, nothing to duplicate");
    } else {
        for pair in &report.pairs {
            println!("  Drive twice: {} (cost {:.2})", pair.path.join(" -> "), pair.cost);
        }
        println!(
            "  Added {} edges, weight {:.2}",
            report.added_edges.len(),
            report.added_weight
        );
    }

    let circuit = euler_circuit(store, None)?;
    println!(
        "  Circuit ({} edges, {:.2} total): {}",
        circuit.edges.len(),
        circuit.total_weight,
        circuit.vertices.join(" -> ")
    );
    Ok(())
}
