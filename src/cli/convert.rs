//! Pi Coin conversion widget

use anyhow::Result;
use comfy_table::Cell;

use super::client::{ExchangeClient, WidgetError};
use super::ui;
use super::widget::{Widget, WidgetState};
use crate::core::{ConversionRequest, ConversionResult};

pub const DEFAULT_CURRENCY: &str = "usd";
pub const CURRENCY_OPTIONS: [&str; 4] = ["usd", "eur", "btc", "eth"];

const TITLE: &str = "Pi Coin Conversion";

pub struct ConvertWidget<'a> {
    client: &'a ExchangeClient,
    base_asset: String,
    widget: Widget<ConversionRequest, ConversionResult>,
}

impl<'a> ConvertWidget<'a> {
    pub fn new(client: &'a ExchangeClient, base_asset: &str) -> Self {
        ConvertWidget {
            client,
            base_asset: base_asset.to_string(),
            widget: Widget::new("convert"),
        }
    }

    pub fn state(&self) -> &WidgetState<ConversionResult> {
        self.widget.state()
    }

    pub async fn submit(&mut self, currency: &str, amount: f64) -> Result<(), WidgetError> {
        let request = ConversionRequest::new(currency, amount)
            .map_err(|e| WidgetError::InvalidInput(e.to_string()))?;

        let client = self.client;
        let base_asset = self.base_asset.as_str();
        self.widget
            .submit(request, |req| async move {
                let unit_price = client
                    .unit_price(base_asset, &req.target_currency)
                    .await?;
                Ok::<_, WidgetError>(ConversionResult {
                    value: unit_price * req.amount,
                    currency: req.target_currency,
                    unit_price,
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
            ui::header_cell("Asset"),
            ui::header_cell(&format!("Price ({})", result.currency.to_uppercase())),
        ]);
        table.add_row(vec![
            ui::number_cell(request.amount),
            Cell::new(&self.base_asset),
            ui::number_cell(result.unit_price),
        ]);

        format!(
            "{}\n\n{}\n\n{} {} {}",
            ui::style_text(TITLE, ui::StyleType::Title),
            table,
            ui::style_text("Result:", ui::StyleType::TotalLabel),
            ui::style_text(&result.value.to_string(), ui::StyleType::TotalValue),
            result.currency.to_uppercase()
        )
    }
}

/// Converts `amount` of the base asset into `currency` through the service.
pub async fn run(client: &ExchangeClient, base_asset: &str, currency: &str, amount: f64) -> Result<()> {
    let mut widget = ConvertWidget::new(client, base_asset);

    let pb = ui::new_spinner("Fetching exchange rate...");
    let submitted = widget.submit(currency, amount).await;
    pb.finish_and_clear();

    if let Err(e) = submitted {
        tracing::error!(error = %e, "Conversion rejected");
        println!("{}", ui::style_text(&e.to_string(), ui::StyleType::Error));
        return Ok(());
    }

    if !CURRENCY_OPTIONS.contains(&currency.to_lowercase().as_str()) {
        println!(
            "{}",
            ui::style_text(
                &format!("Note: {currency} is not one of {}", CURRENCY_OPTIONS.join(", ")),
                ui::StyleType::Subtle
            )
        );
    }
    println!("{}", widget.render());
    Ok(())
}
