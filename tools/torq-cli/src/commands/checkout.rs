//! Send the cart as a WhatsApp order.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use torq_commerce::checkout::{
    build_deep_link, validate_phone_number, DeepLink, Handoff, HandoffOutcome, HandoffReport,
};

use super::CheckoutArgs;
use crate::context::Context;
use crate::handoff::{ManualCopy, SystemOpener, TerminalLink};

/// Run the checkout command.
pub fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_store();

    let message = store.get_order_message();
    if message.is_empty() {
        ctx.output.warn("Your cart is empty. Add items with `torq cart add <code>`.");
        return Ok(());
    }

    let whatsapp = ctx.whatsapp();
    if whatsapp.is_placeholder() {
        ctx.output.warn(&format!(
            "No WhatsApp number configured; using placeholder {}. Set contact.phone_number or {}.",
            whatsapp.phone_number(),
            crate::config::PHONE_ENV_VAR
        ));
    } else if !validate_phone_number(whatsapp.phone_number()) {
        ctx.output.warn(&format!(
            "WhatsApp number '{}' does not look valid (expected 10 to 15 digits)",
            whatsapp.phone_number()
        ));
    }

    let link = build_deep_link(&whatsapp, &message)?;

    if args.dry_run {
        print_preview(&link, store.get_total_items(), ctx);
        return Ok(());
    }

    if !ctx.output.is_json() {
        ctx.output.header("Order");
        ctx.output.block(&link.decoded_message());
    }

    if !args.yes && !ctx.output.is_json() {
        ctx.output.info("");
        let confirmed = Confirm::new()
            .with_prompt("Send this order through WhatsApp?")
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Checkout cancelled");
            return Ok(());
        }
    }

    let handoff = Handoff::new()
        .with(SystemOpener::new(
            ctx.config.checkout.open_browser && !args.no_open,
        ))
        .with(TerminalLink::new(ctx.output.clone()))
        .with(ManualCopy::new(
            ctx.resolve_path(&ctx.config.checkout.handoff_file),
        ));

    let report = handoff.run(&link);
    for failure in report.failures() {
        ctx.output
            .debug(&format!("{}: {}", failure.strategy, failure.error));
    }

    match report {
        HandoffReport::Delivered {
            strategy, outcome, ..
        } => {
            if ctx.output.is_json() {
                ctx.output.json(&serde_json::json!({
                    "delivered": true,
                    "strategy": strategy,
                    "url": link.url(),
                    "totalItems": store.get_total_items(),
                }));
            } else {
                match outcome {
                    HandoffOutcome::Opened => ctx.output.success("Opened WhatsApp"),
                    HandoffOutcome::Navigated => {
                        ctx.output.success("Follow the link above to send the order")
                    }
                    HandoffOutcome::Copied { instructions } => ctx.output.success(&instructions),
                }
            }

            if args.clear {
                store.clear_cart();
                ctx.output.info("Cart cleared");
            }
            Ok(())
        }
        HandoffReport::Exhausted { failures } => {
            ctx.output.warn("Could not hand the order off. Send it from this link:");
            ctx.output.link(link.url());
            bail!("All {} hand-off strategies failed", failures.len())
        }
    }
}

fn print_preview(link: &DeepLink, total_items: u64, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "url": link.url(),
            "message": link.decoded_message(),
            "totalItems": total_items,
        }));
        return;
    }

    ctx.output.header("Order (dry run)");
    ctx.output.block(&link.decoded_message());
    ctx.output.info("");
    ctx.output.link(link.url());
    ctx.output.success("Dry run completed; nothing was sent");
}
