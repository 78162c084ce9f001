// Rebuild + query timing across jump ranges on random star fields.
use std::fs::File;
use std::io::Write;
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use starnav_core::{analysis, shortest_path_with_stats, Catalog};

fn run_one(n: usize, radius: f64, range: f64, seed: u64) -> serde_json::Value {
    let mut rng = SmallRng::seed_from_u64(seed);
    let catalog = match Catalog::random_field(&mut rng, n, radius) { Ok(c) => c, Err(e) => return serde_json::json!({ "n": n, "radius": radius, "error": e.to_string() }) };
    let t0 = Instant::now();
    let g = match catalog.build_graph(range) { Ok(g) => g, Err(e) => return serde_json::json!({ "n": n, "range": range, "error": e.to_string() }) };
    let build_ms = t0.elapsed().as_secs_f64() * 1000.0;

    let (from, to) = (g.id(0).clone(), g.id(n as u32 - 1).clone());
    let t1 = Instant::now();
    let (outcome, stats) = match shortest_path_with_stats(&g, &from, &to) { Ok(r) => r, Err(e) => return serde_json::json!({ "n": n, "range": range, "error": e.to_string() }) };
    let query_ms = t1.elapsed().as_secs_f64() * 1000.0;
    let components = { let mut l = analysis::connected_components(&g); l.sort_unstable(); l.dedup(); l.len() };

    serde_json::json!({
        "n": n, "radius": radius, "range": range, "seed": seed,
        "edges": g.edge_count(),
        "components": components,
        "build_ms": build_ms, "query_ms": query_ms,
        "reachable": outcome.is_reachable(),
        "jumps": outcome.path().map(|p| p.jump_count()),
        "total": outcome.total(),
        "relaxations": stats.relaxations, "settled": stats.settled,
        "heap_pushes": stats.heap.pushes, "heap_max": stats.heap.max_size,
    })
}

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help") { eprintln!("Usage: range_sweep --sizes 100,300 --ranges 5,10,20 --radius 60 --seed 42 [--out sweep.json]"); return; }
    let arg = |name: &str| args.iter().position(|a| a == name).and_then(|i| args.get(i + 1)).cloned();
    let sizes: Vec<usize> = arg("--sizes").unwrap_or("100,300".into()).split(',').filter_map(|s| s.parse().ok()).collect();
    let ranges: Vec<f64> = arg("--ranges").unwrap_or("5,10,15,20".into()).split(',').filter_map(|s| s.parse().ok()).collect();
    let radius: f64 = arg("--radius").and_then(|v| v.parse().ok()).unwrap_or(60.0);
    let seed: u64 = arg("--seed").and_then(|v| v.parse().ok()).unwrap_or(42);

    let mut results = Vec::new();
    for &n in &sizes {
        if n < 2 { eprintln!("skipping n={n}: need two systems"); continue; }
        for &r in &ranges { results.push(run_one(n, radius, r, seed)); }
    }
    let json = serde_json::Value::Array(results);
    let text = match serde_json::to_string_pretty(&json) { Ok(t) => t, Err(e) => { eprintln!("error: {e}"); return; } };
    match arg("--out") {
        Some(path) => {
            if let Some(dir) = std::path::Path::new(&path).parent() { std::fs::create_dir_all(dir).ok(); }
            match File::create(&path).and_then(|mut f| f.write_all(text.as_bytes())) {
                Ok(()) => eprintln!("wrote {}", path),
                Err(e) => eprintln!("error writing {}: {e}", path),
            }
        }
        None => println!("{text}"),
    }
}
