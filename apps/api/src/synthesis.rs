//! Response synthesis: canned formatting or prompt render + generation.
//!
//! With no generator configured the service answers from category-specific
//! canned strings. With one configured, the category's template is rendered
//! with the query and the JSON context and sent out once. Errors come back
//! typed; the chat layer decides how to present them.

use tracing::info;

use crate::classify::{InventoryPayload, QueryContext};
use crate::dataset::LOW_STOCK_THRESHOLD;
use crate::llm_client::{GenerationError, TextGenerator};
use crate::prompts::TemplateStore;

/// Produces the reply for one request.
pub async fn synthesize(
    query: &str,
    context: &QueryContext,
    templates: &TemplateStore,
    generator: Option<&dyn TextGenerator>,
) -> Result<String, GenerationError> {
    let Some(generator) = generator else {
        return Ok(canned_response(context));
    };

    let category = context.category().as_str();
    let context_json = serde_json::to_string_pretty(context)?;
    let prompt = templates.render(category, query, &context_json);

    info!("Using '{category}' prompt template for generation");
    let text = generator.generate(&prompt).await?;
    info!("Received generated response (chars={})", text.len());
    Ok(text)
}

/// Category-specific formatted reply built straight from the payload.
pub fn canned_response(context: &QueryContext) -> String {
    match context {
        QueryContext::Inventory(InventoryPayload::Item(item)) => {
            let indicator = if item.quantity < LOW_STOCK_THRESHOLD {
                "⚠️ Running low!"
            } else {
                "✅ Stock looks good!"
            };
            format!(
                "You currently have {} {}s left in stock, priced at ₹{} each. {indicator}",
                item.quantity,
                item.name.to_lowercase(),
                item.unit_price
            )
        }
        QueryContext::Inventory(InventoryPayload::All(items)) => {
            let lines: Vec<String> = items
                .iter()
                .map(|item| format!("{}: {} units", item.name, item.quantity))
                .collect();
            format!("📦 **Inventory Overview:**\n{}", lines.join("\n"))
        }
        QueryContext::Sales(summary) => match summary.date {
            Some(date) => format!(
                "📊 **Sales Report for {date}:**\n💰 Total Profit: ₹{}\n📈 Number of transactions: {}",
                format_rupees(summary.total_profit),
                summary.records.len()
            ),
            None => format!(
                "💰 **All-time total profit:** ₹{}\n🎯 Great job managing your restaurant!",
                format_rupees(summary.total_profit)
            ),
        },
        QueryContext::LowStock(items) => {
            if items.is_empty() {
                "✅ All items are well-stocked! No items are running low.".to_string()
            } else {
                let lines: Vec<String> = items
                    .iter()
                    .map(|item| format!("• {}: Only {} left", item.name, item.quantity))
                    .collect();
                format!(
                    "⚠️ **Low Stock Alert:**\n{}\n\n💡 Consider restocking these items soon!",
                    lines.join("\n")
                )
            }
        }
        QueryContext::TopSelling(ranking) => {
            if ranking.is_empty() {
                "📊 No sales data available yet to determine top-selling items.".to_string()
            } else {
                let lines: Vec<String> = ranking
                    .iter()
                    .take(5)
                    .enumerate()
                    .map(|(i, totals)| {
                        format!(
                            "{}. {}: {} sold (₹{} profit)",
                            i + 1,
                            totals.item_name,
                            totals.total_sold,
                            totals.total_profit
                        )
                    })
                    .collect();
                format!("🏆 **Top Selling Items:**\n{}", lines.join("\n"))
            }
        }
        QueryContext::Overview(overview) => format!(
            "🏪 **Restaurant Overview:**\n📦 Inventory Items: {}\n📊 Today's Sales: {} transactions\n💰 All-time Profit: ₹{}\n\n🤖 *Offline mode active - configure a Gemini API key for smarter responses!*",
            overview.inventory.len(),
            overview.recent_sales.len(),
            format_rupees(overview.total_profit)
        ),
    }
}

/// Thousands-separated rupee amount, e.g. `3870` → `"3,870"`.
fn format_rupees(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if amount < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
