//! Crypto swap widget

use anyhow::Result;
use comfy_table::Cell;

use super::client::{ExchangeClient, WidgetError};
use super::ui;
use super::widget::{Widget, WidgetState};
use crate::core::{SwapRequest, SwapResult};

pub const DEFAULT_FROM: &str = "pi-network";
pub const DEFAULT_TO: &str = "bitcoin";
pub const ASSET_OPTIONS: [&str; 3] = ["pi-network", "bitcoin", "ethereum"];

const TITLE: &str = "Crypto Swap";

pub struct SwapWidget<'a> {
    client: &'a ExchangeClient,
    widget: Widget<SwapRequest, SwapResult>,
}

impl<'a> SwapWidget<'a> {
    pub fn new(client: &'a ExchangeClient) -> Self {
        SwapWidget {
            client,
            widget: Widget::new("swap"),
        }
    }

    pub fn state(&self) -> &WidgetState<SwapResult> {
        self.widget.state()
    }

    pub async fn submit(&mut self, from: &str, to: &str, amount: f64) -> Result<(), WidgetError> {
        let request = SwapRequest::new(from, to, amount)
            .map_err(|e| WidgetError::InvalidInput(e.to_string()))?;

        let client = self.client;
        self.widget
            .submit(request, |req| async move {
                let rate = client.swap_rate(&req.from_asset, &req.to_asset).await?;
                Ok::<_, WidgetError>(SwapResult {
                    rate,
                    converted_amount: req.amount * rate,
                })
            })
            .await
    }

    pub fn render(&self) -> String {
        let (Some(request), Some(result)) = (self.widget.request(), self.widget.result()) else {
            return ui::failure_line(TITLE);
        };

        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Amount"),
            ui::header_cell("From"),
            ui::header_cell("To"),
            ui::header_cell("Rate"),
        ]);
        table.add_row(vec![
            ui::number_cell(request.amount),
            Cell::new(&request.from_asset),
            Cell::new(&request.to_asset),
            ui::number_cell(result.rate),
        ]);

        format!(
            "{}\n\n{}\n\n{} {} {}",
            ui::style_text(TITLE, ui::StyleType::Title),
            table,
            ui::style_text("Result:", ui::StyleType::TotalLabel),
            ui::style_text(&result.converted_amount.to_string(), ui::StyleType::TotalValue),
            request.to_asset.to_uppercase()
        )
    }
}

/// Swaps `amount` of `from` into `to` through the service.
pub async fn run(client: &ExchangeClient, from: &str, to: &str, amount: f64) -> Result<()> {
    let mut widget = SwapWidget::new(client);

    let pb = ui::new_spinner("Fetching swap rate...");
    let submitted = widget.submit(from, to, amount).await;
    pb.finish_and_clear();

    if let Err(e) = submitted {
        tracing::error!(error = %e, "Swap rejected");
        println!("{}", ui::style_text(&e.to_string(), ui::StyleType::Error));
        return Ok(());
    }

    for asset in [from, to] {
        if !ASSET_OPTIONS.contains(&asset.to_lowercase().as_str()) {
            println!(
                "{}",
                ui::style_text(
                    &format!("Note: {asset} is not one of {}", ASSET_OPTIONS.join(", ")),
                    ui::StyleType::Subtle
                )
            );
        }
    }
    println!("{}", widget.render());
    Ok(())
}
