use rand::rngs::SmallRng;
use rand::SeedableRng;
use starnav_core::{Catalog, NavConfig, Navigator};

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help") {
        eprintln!("usage: plot_route [catalog.json | --config cfg.json] [<from> <to>]  (STARNAV_N, STARNAV_RADIUS, STARNAV_SEED, STARNAV_RANGE for a random field)");
        return;
    }

    let mut config_path = None;
    let mut positional: Vec<String> = Vec::new();
    let mut it = args.iter().skip(1);
    while let Some(a) = it.next() {
        if a == "--config" { config_path = it.next().cloned(); } else { positional.push(a.clone()); }
    }

    let cfg = match config_path {
        Some(path) => match NavConfig::load(&path) { Ok(c) => c, Err(e) => { eprintln!("error: {e}"); std::process::exit(1); } },
        None => NavConfig { jump_range: env_or("STARNAV_RANGE", 12.0), ..NavConfig::default() },
    };

    let catalog_path = positional.first().filter(|p| p.ends_with(".json")).map(std::path::PathBuf::from).or_else(|| cfg.catalog.clone());
    let catalog = match catalog_path {
        Some(path) => match Catalog::load(&path) { Ok(c) => c, Err(e) => { eprintln!("error: {e}"); std::process::exit(1); } },
        None => {
            let mut rng = SmallRng::seed_from_u64(env_or("STARNAV_SEED", 42u64));
            match Catalog::random_field(&mut rng, env_or("STARNAV_N", 200usize), env_or("STARNAV_RADIUS", 60.0)) {
                Ok(c) => c,
                Err(e) => { eprintln!("error: {e}"); std::process::exit(1); }
            }
        }
    };
    let names: Vec<&String> = positional.iter().filter(|p| !p.ends_with(".json")).collect();

    let nav = match Navigator::from_config(&NavConfig { catalog: None, ..cfg.clone() }, Some(catalog)) {
        Ok(n) => n,
        Err(e) => { eprintln!("error: {e}"); std::process::exit(1); }
    };
    let (from, to) = match (names.first(), names.get(1), &cfg.origin, &cfg.destination) {
        (Some(a), Some(b), _, _) => (a.to_string(), b.to_string()),
        (_, _, Some(o), Some(d)) => (o.clone(), d.clone()),
        _ => {
            let systems = nav.catalog().systems();
            if systems.len() < 2 { eprintln!("need at least two systems"); return; }
            (systems[0].name.clone(), systems[systems.len() - 1].name.clone())
        }
    };

    let (outcome, stats) = match nav.route_with_stats(&from, &to) {
        Ok(r) => r,
        Err(e) => { eprintln!("error: {e}"); std::process::exit(1); }
    };
    let required = nav.required_range(&from, &to).ok();
    let out = serde_json::json!({
        "systems": nav.catalog().len(),
        "jumps_available": nav.snapshot().edge_count(),
        "jump_range": nav.jump_range(),
        "required_range": required,
        "route": outcome,
        "stats": stats,
    });
    match serde_json::to_string_pretty(&out) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("error: {e}"),
    }
}
