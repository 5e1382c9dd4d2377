//! Cart commands.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use torq_commerce::cart::CartStore;
use torq_commerce::catalog::{find_by_code, find_selection};

use super::{CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store();

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => show_cart(&store, ctx),
        CartCommand::Add { code } => add_code(&mut store, &code, ctx),
        CartCommand::Pick {
            surface,
            diameter,
            length,
        } => pick(&mut store, &surface, &diameter, &length, ctx),
        CartCommand::Remove { code } => remove(&mut store, &code, ctx),
        CartCommand::Set { code, quantity } => set_quantity(&mut store, &code, quantity, ctx),
        CartCommand::Clear { yes } => clear(&mut store, yes, ctx),
    }
}

/// Print the cart contents and totals.
fn show_cart(store: &CartStore, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "items": store.items(),
            "totalItems": store.get_total_items(),
        }));
        return Ok(());
    }

    ctx.output.header("Cart");

    if store.items().is_empty() {
        ctx.output.info("Your cart is empty.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = store
        .items()
        .iter()
        .map(|item| {
            vec![
                item.code.to_string(),
                item.surface.clone(),
                item.size_label(),
                item.quantity.to_string(),
            ]
        })
        .collect();
    ctx.output.table(&["CODE", "SURFACE", "SIZE", "QTY"], &rows);

    ctx.output.info("");
    ctx.output.kv("Total items", &store.get_total_items().to_string());

    Ok(())
}

fn add_code(store: &mut CartStore, code: &str, ctx: &Context) -> Result<()> {
    let Some(entry) = find_by_code(code) else {
        ctx.output.warn(&format!("Unknown product code: {}", code));
        return Ok(());
    };
    store.add_item(&entry);

    report_line(store, code, ctx);
    Ok(())
}

fn pick(
    store: &mut CartStore,
    surface: &str,
    diameter: &str,
    length: &str,
    ctx: &Context,
) -> Result<()> {
    let Some(entry) = find_selection(surface, diameter, length) else {
        ctx.output.warn(&format!(
            "No {} implant with diameter {} and length {}",
            surface, diameter, length
        ));
        return Ok(());
    };
    store.add_item(&entry);

    report_line(store, entry.code.as_str(), ctx);
    Ok(())
}

fn remove(store: &mut CartStore, code: &str, ctx: &Context) -> Result<()> {
    if store.cart().get_item(code).is_none() {
        bail!("Code {} is not in the cart", code);
    }
    store.remove_item(code);

    if ctx.output.is_json() {
        return show_cart(store, ctx);
    }
    ctx.output.success(&format!("Removed {}", code));
    Ok(())
}

fn set_quantity(store: &mut CartStore, code: &str, quantity: i64, ctx: &Context) -> Result<()> {
    if store.cart().get_item(code).is_none() {
        bail!("Code {} is not in the cart", code);
    }
    store.update_quantity(code, quantity);

    if ctx.output.is_json() {
        return show_cart(store, ctx);
    }
    match store.cart().get_item(code) {
        Some(item) => ctx
            .output
            .success(&format!("{} quantity set to {}", code, item.quantity)),
        None => ctx.output.success(&format!("Removed {}", code)),
    }
    Ok(())
}

fn clear(store: &mut CartStore, yes: bool, ctx: &Context) -> Result<()> {
    if store.items().is_empty() {
        ctx.output.info("Your cart is already empty.");
        return Ok(());
    }

    if !yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Remove all {} item(s) from the cart?",
                store.get_total_items()
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Cart left unchanged");
            return Ok(());
        }
    }

    store.clear_cart();

    if ctx.output.is_json() {
        return show_cart(store, ctx);
    }
    ctx.output.success("Cart cleared");
    Ok(())
}

fn report_line(store: &CartStore, code: &str, ctx: &Context) {
    if ctx.output.is_json() {
        if let Some(item) = store.cart().get_item(code) {
            ctx.output.json(item);
        }
        return;
    }

    if let Some(item) = store.cart().get_item(code) {
        ctx.output.success(&format!(
            "Added {} {} ({}), now {} in cart",
            item.surface,
            item.size_label(),
            item.code,
            item.quantity
        ));
    }
    ctx.output.kv("Total items", &store.get_total_items().to_string());
}
