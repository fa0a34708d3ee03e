//! Interactive menu loop: stdin/stdout glue around the store.
//!
//! All user-facing text is Spanish; raw input parsing (integers, floats)
//! happens here, never in the store.

use std::io::{self, BufRead, Write};

use almacen_inventory::{InventoryStore, Outcome};
use almacen_products::Product;

/// Drive the menu until the user exits or input runs out.
pub fn run<R, W>(store: &mut InventoryStore, input: &mut R, out: &mut W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    for warning in store.load_warnings() {
        writeln!(out, "Aviso: {warning}")?;
    }

    loop {
        print_menu(out)?;
        let Some(choice) = prompt(input, out, "Seleccione una opción: ")? else {
            break;
        };

        match choice.trim() {
            "1" => add_flow(store, input, out)?,
            "2" => remove_flow(store, input, out)?,
            "3" => update_flow(store, input, out)?,
            "4" => search_flow(store, input, out)?,
            "5" => list_flow(store, out)?,
            "0" => {
                writeln!(out, "Saliendo del sistema...")?;
                break;
            }
            _ => writeln!(out, "Opción inválida.")?,
        }
    }
    Ok(())
}

fn print_menu<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "===== SISTEMA DE INVENTARIO DG =====")?;
    writeln!(out, "1. Añadir producto")?;
    writeln!(out, "2. Eliminar producto")?;
    writeln!(out, "3. Actualizar producto")?;
    writeln!(out, "4. Buscar producto")?;
    writeln!(out, "5. Listar inventario")?;
    writeln!(out, "0. Salir")
}

/// Print `label`, read one line. `None` means end of input.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> io::Result<Option<String>> {
    write!(out, "{label}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

fn add_flow<R: BufRead, W: Write>(
    store: &mut InventoryStore,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    let Some(id) = prompt(input, out, "ID: ")? else { return Ok(()) };
    let Some(name) = prompt(input, out, "Nombre: ")? else { return Ok(()) };
    let Some(quantity) = prompt(input, out, "Cantidad: ")? else { return Ok(()) };
    let Some(price) = prompt(input, out, "Precio: ")? else { return Ok(()) };

    let Ok(quantity) = quantity.trim().parse::<i64>() else {
        return writeln!(out, "Entrada inválida: la cantidad debe ser un número entero.");
    };
    let Ok(price) = price.trim().parse::<f64>() else {
        return writeln!(out, "Entrada inválida: el precio debe ser un número.");
    };

    let product = match Product::new(id, name, quantity, price) {
        Ok(product) => product,
        Err(err) => return writeln!(out, "Error: {err}"),
    };

    match store.add(product) {
        Ok(Outcome::Saved) => writeln!(out, "Producto añadido correctamente."),
        Ok(Outcome::NotSaved(err)) => {
            writeln!(out, "Producto añadido, pero no se pudo guardar el archivo: {err}")
        }
        Err(err) => writeln!(out, "Error: {err}"),
    }
}

fn remove_flow<R: BufRead, W: Write>(
    store: &mut InventoryStore,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    let Some(id) = prompt(input, out, "ID del producto a eliminar: ")? else {
        return Ok(());
    };

    match store.remove(id.trim()) {
        Ok(Outcome::Saved) => writeln!(out, "Producto eliminado."),
        Ok(Outcome::NotSaved(err)) => {
            writeln!(out, "Producto eliminado, pero no se pudo guardar el archivo: {err}")
        }
        Err(err) => writeln!(out, "Error: {err}"),
    }
}

fn update_flow<R: BufRead, W: Write>(
    store: &mut InventoryStore,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    let Some(id) = prompt(input, out, "ID del producto a actualizar: ")? else {
        return Ok(());
    };
    let Some(quantity) = prompt(input, out, "Nueva cantidad (vacío para no cambiar): ")? else {
        return Ok(());
    };
    let Some(price) = prompt(input, out, "Nuevo precio (vacío para no cambiar): ")? else {
        return Ok(());
    };

    // An empty answer leaves the field unchanged.
    let quantity = match parse_optional::<i64>(&quantity) {
        Ok(quantity) => quantity,
        Err(()) => {
            return writeln!(out, "Entrada inválida: la cantidad debe ser un número entero.");
        }
    };
    let price = match parse_optional::<f64>(&price) {
        Ok(price) => price,
        Err(()) => return writeln!(out, "Entrada inválida: el precio debe ser un número."),
    };

    match store.update(id.trim(), quantity, price) {
        Ok(Outcome::Saved) => writeln!(out, "Producto actualizado."),
        Ok(Outcome::NotSaved(err)) => {
            writeln!(out, "Producto actualizado, pero no se pudo guardar el archivo: {err}")
        }
        Err(err) => writeln!(out, "Error: {err}"),
    }
}

fn parse_optional<T: std::str::FromStr>(raw: &str) -> Result<Option<T>, ()> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<T>().map(Some).map_err(|_| ())
}

fn search_flow<R: BufRead, W: Write>(
    store: &mut InventoryStore,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    let Some(query) = prompt(input, out, "Ingrese nombre o parte del nombre: ")? else {
        return Ok(());
    };

    let results = store.search_by_name(&query);
    if results.is_empty() {
        return writeln!(out, "No se encontraron productos.");
    }
    for product in results {
        writeln!(out, "{product}")?;
    }
    Ok(())
}

fn list_flow<W: Write>(store: &InventoryStore, out: &mut W) -> io::Result<()> {
    if store.list_all().is_empty() {
        return writeln!(out, "Inventario vacío.");
    }
    for product in store.list_all() {
        writeln!(out, "{product}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_session(store: &mut InventoryStore, script: &str) -> String {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        run(store, &mut input, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn add_list_remove_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = InventoryStore::open(dir.path().join("inventario.txt"));

        let out = run_session(
            &mut store,
            "1\nA1\nWidget\n5\n9.99\n5\n2\nA1\n5\n0\n",
        );

        assert!(out.contains("Producto añadido correctamente."));
        assert!(out.contains("ID: A1 | Nombre: Widget | Cantidad: 5 | Precio: $9.99"));
        assert!(out.contains("Producto eliminado."));
        assert!(out.contains("Inventario vacío."));
        assert!(out.contains("Saliendo del sistema..."));
    }

    #[test]
    fn invalid_option_reprints_the_menu() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = InventoryStore::open(dir.path().join("inventario.txt"));

        let out = run_session(&mut store, "9\n0\n");
        assert!(out.contains("Opción inválida."));
        // The banner shows up again after the bad choice.
        assert_eq!(out.matches("===== SISTEMA DE INVENTARIO DG =====").count(), 2);
    }

    #[test]
    fn non_numeric_quantity_is_handled_at_the_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = InventoryStore::open(dir.path().join("inventario.txt"));

        let out = run_session(&mut store, "1\nA1\nWidget\ncinco\n9.99\n0\n");
        assert!(out.contains("Entrada inválida: la cantidad debe ser un número entero."));
        assert!(store.list_all().is_empty());
    }

    #[test]
    fn update_with_blank_price_keeps_it() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = InventoryStore::open(dir.path().join("inventario.txt"));
        let p = Product::new("A1", "Widget", 5, 9.99).unwrap();
        let _ = store.add(p).unwrap();

        let out = run_session(&mut store, "3\nA1\n7\n\n0\n");
        assert!(out.contains("Producto actualizado."));
        assert_eq!(store.list_all()[0].quantity(), 7);
        assert_eq!(store.list_all()[0].price(), 9.99);
    }

    #[test]
    fn update_unknown_id_prints_the_not_found_message() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = InventoryStore::open(dir.path().join("inventario.txt"));

        let out = run_session(&mut store, "3\nA1\n7\n1.0\n0\n");
        assert!(out.contains("Error: no existe producto con ID 'A1'"));
    }

    #[test]
    fn load_warnings_are_printed_at_startup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventario.txt");
        std::fs::write(&path, "malo\n").unwrap();
        let mut store = InventoryStore::open(&path);

        let out = run_session(&mut store, "0\n");
        assert!(out.contains("Aviso: línea 1:"));
    }
}
