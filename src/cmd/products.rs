//! Product listing and creation commands (`amatta products`, `amatta add`).

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use amatta::config::AmattaConfig;
use amatta::storefront::Storefront;
use amatta::storefront::display::{ListingEntry, format_price};
use amatta::storefront::metadata::ProxyMetadataClient;
use amatta::storefront::models::NewProduct;

pub async fn cmd_products(config: &AmattaConfig, json: bool, via_proxy: Option<&str>) -> Result<()> {
    let storefront = match via_proxy {
        Some(base) => {
            let proxy = ProxyMetadataClient::new(base, config.metadata.timeout())
                .context("Failed to build proxy metadata client")?;
            Storefront::with_metadata(config, Arc::new(proxy))?
        }
        None => Storefront::from_config(config)?,
    };

    let spinner = if json {
        None
    } else {
        Some(loading_spinner()?)
    };
    let listing = storefront.listing().await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    if listing.is_empty() {
        println!("{}", style("No products.").dim());
        return Ok(());
    }

    println!();
    for entry in &listing {
        print_entry(entry);
    }
    println!("{} product(s)", listing.len());
    Ok(())
}

pub async fn cmd_add(config: &AmattaConfig, product: NewProduct) -> Result<()> {
    let storefront = Storefront::from_config(config)?;
    let sent = storefront
        .add_product(product)
        .await
        .context("상품 추가에 실패했습니다")?;
    println!(
        "{} {} ({}, {})",
        style("Added").green().bold(),
        sent.name,
        format_price(sent.price),
        sent.seller
    );
    Ok(())
}

fn loading_spinner() -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message("Loading products...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}

fn print_entry(entry: &ListingEntry) {
    println!(
        "{} {}  {}",
        style(format!("#{}", entry.id)).dim(),
        style(&entry.name).bold(),
        style(&entry.price_label).yellow().bold()
    );

    let mut preview = format!("{} · {}", entry.company, entry.og_title);
    if let Some(description) = &entry.og_description {
        preview.push_str(" · ");
        preview.push_str(description);
    }
    println!("    {}", preview);
    println!("    {}", style(&entry.link).underlined().dim());
    println!();
}
