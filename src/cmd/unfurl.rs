//! Single-link metadata lookup (`amatta unfurl`).

use anyhow::{Context, Result};
use console::style;

use amatta::config::AmattaConfig;
use amatta::storefront::display::PreviewCard;
use amatta::storefront::metadata::{MetadataSource, MicrolinkClient};

pub async fn cmd_unfurl(
    config: &AmattaConfig,
    url: &str,
    raw: bool,
    product_name: Option<&str>,
) -> Result<()> {
    let client = MicrolinkClient::new(&config.metadata.endpoint, config.metadata.timeout())
        .context("Failed to build metadata client")?;

    if raw {
        let body = client
            .preview(url)
            .await
            .context("Failed to fetch link preview")?;
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    // Preview card mode
    if let Some(name) = product_name {
        let card = match client.preview(url).await {
            Ok(body) => PreviewCard::from_preview(&body, name),
            Err(e) => {
                tracing::warn!(url, error = %e, "link preview failed, using fallback card");
                Some(PreviewCard::fallback(name))
            }
        };
        match card {
            Some(card) => print_card(&card),
            None => println!("{}", style("No preview available.").dim()),
        }
        return Ok(());
    }

    let info = client.company_info(url).await;
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

fn print_card(card: &PreviewCard) {
    let badge = if card.logo.is_empty() {
        card.initial().map(|c| format!("({})", c)).unwrap_or_default()
    } else {
        card.logo.clone()
    };
    println!(
        "{} {} | {} ›",
        style(badge).dim(),
        style(&card.publisher).bold(),
        card.title
    );
}
