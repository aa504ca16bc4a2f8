use bst_map::{BstMap, RemovalPolicy};
use tracing::info;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let mut map: BstMap<u32, &str> = BstMap::with_policy(RemovalPolicy::Seeded(0));

    for (key, value) in [
        (50, "fifty"),
        (30, "thirty"),
        (70, "seventy"),
        (20, "twenty"),
        (40, "forty"),
        (60, "sixty"),
        (80, "eighty"),
    ] {
        if let Err(err) = map.insert(key, value) {
            info!(key, %err, "insert failed");
        }
    }
    info!(keys = ?map.keys().collect::<Vec<_>>(), height = map.tree().height());

    if let Err(err) = map.insert(40, "again") {
        info!(%err, "duplicate rejected");
    }

    let removed = map.remove(&50);
    info!(?removed, keys = ?map.keys().collect::<Vec<_>>(), "removed root");

    let mut dot = String::new();
    if map.tree().dotgraph("demo", &mut dot).is_ok() {
        println!("{dot}");
    }

    map.clear();
    info!(len = map.len(), "cleared");
}
