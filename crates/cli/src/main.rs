use anyhow::Context;

use almacen_inventory::{DEFAULT_PATH, InventoryStore};

mod menu;

fn main() -> anyhow::Result<()> {
    almacen_observability::init();

    let path = std::env::var("ALMACEN_FILE").unwrap_or_else(|_| {
        tracing::info!(default = DEFAULT_PATH, "ALMACEN_FILE not set; using default backing file");
        DEFAULT_PATH.to_string()
    });

    let mut store = InventoryStore::open(path);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    menu::run(&mut store, &mut stdin.lock(), &mut stdout.lock())
        .context("console I/O failed")?;
    Ok(())
}
