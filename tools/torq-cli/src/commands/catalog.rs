//! Catalog browsing commands.

use anyhow::Result;
use torq_commerce::catalog::{
    catalog, generate_product_codes, require_product, resolve_hotspots, ProductCodeEntry,
};

use super::{CatalogArgs, CatalogCommand};
use crate::context::Context;

/// Run the catalog command.
pub fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    match args.command {
        CatalogCommand::Products => list_products(ctx),
        CatalogCommand::Codes { surface } => list_codes(surface.as_deref(), ctx),
        CatalogCommand::Hotspots { product } => list_hotspots(&product, ctx),
    }
}

fn list_products(ctx: &Context) -> Result<()> {
    let products = catalog();

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    for product in products {
        ctx.output.header(&product.name);
        ctx.output.kv("id", product.id.as_str());
        ctx.output.kv("description", &product.description);
        ctx.output.kv("combinations", &product.combination_count().to_string());

        for variant in &product.variations {
            ctx.output.info("");
            ctx.output
                .info(&format!("{} ({})", variant.name, variant.key.as_str()));
            for range in &variant.diameters {
                ctx.output.list_item(&format!(
                    "Ø{}: {} mm",
                    range.diameter,
                    range.lengths.join(", ")
                ));
            }
        }

        if !product.features.is_empty() {
            ctx.output.info("");
            ctx.output.info("Características:");
            for feature in &product.features {
                ctx.output.list_item(feature);
            }
        }

        if !product.indications.is_empty() {
            ctx.output.info("");
            ctx.output.info("Indicações:");
            for indication in &product.indications {
                ctx.output.list_item(indication);
            }
        }
    }

    Ok(())
}

/// Keep entries whose surface name contains `surface`, ignoring case.
fn filter_by_surface(entries: Vec<ProductCodeEntry>, surface: Option<&str>) -> Vec<ProductCodeEntry> {
    match surface {
        Some(needle) => {
            let needle = needle.to_lowercase();
            entries
                .into_iter()
                .filter(|e| e.surface.to_lowercase().contains(&needle))
                .collect()
        }
        None => entries,
    }
}

fn list_codes(surface: Option<&str>, ctx: &Context) -> Result<()> {
    let entries = filter_by_surface(generate_product_codes(), surface);

    if ctx.output.is_json() {
        ctx.output.json(&entries);
        return Ok(());
    }

    ctx.output.header(&format!("Product codes ({})", entries.len()));
    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|e| {
            vec![
                e.code.to_string(),
                e.surface.clone(),
                e.diameter.clone(),
                e.length.clone(),
            ]
        })
        .collect();
    ctx.output
        .table(&["CODE", "SURFACE", "DIAMETER", "LENGTH"], &rows);

    Ok(())
}

fn list_hotspots(product_id: &str, ctx: &Context) -> Result<()> {
    let product = require_product(product_id)?;
    let resolved = resolve_hotspots(product_id);

    if ctx.output.is_json() {
        let rows: Vec<_> = resolved
            .iter()
            .map(|(hotspot, entry)| {
                serde_json::json!({
                    "hotspot": hotspot,
                    "entry": entry,
                })
            })
            .collect();
        ctx.output.json(&rows);
        return Ok(());
    }

    ctx.output.header(&format!("Hotspots: {}", product.name));
    ctx.output.kv("image", &product.image);

    if resolved.is_empty() {
        ctx.output.info("No hotspots configured for this product.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = resolved
        .iter()
        .map(|(hotspot, entry)| {
            vec![
                hotspot.code.to_string(),
                hotspot.position.top.clone(),
                hotspot.position.left.clone(),
                entry.surface.clone(),
                format!("Ø{} × {}mm", entry.diameter, entry.length),
            ]
        })
        .collect();
    ctx.output
        .table(&["CODE", "TOP", "LEFT", "SURFACE", "SIZE"], &rows);

    Ok(())
}
