use crate::domain::model::{CandidateLines, Query};
use crate::domain::ports::TextGenerator;
use crate::utils::error::Result;
use std::sync::Arc;

/// Fixed instruction the model runs under for every request.
pub const SYSTEM_INSTRUCTION: &str = r#"
You are an AI specialized in determining the price of items based on user-provided data.

#### Pricing Rules:
1. Currency Conversion:
   - If a price is given without a currency name, assume WL.
   - 100 WL = 1 DL, 100 DL = 1 BGL.

2. Response Format:
   - Respond only with JSON following:
     - "each" type for individual items.
     - "per" type for bulk items.

### JSON Examples:

For "each":
{
  "Item_Name": "<item name>",
  "item_price": <average price in WL>,
  "priceindl": "<formatted BGL/DL/WL>",
  "type": "each"
}

For "per":
{
  "Item_Name": "<item name>",
  "item_price": <amount per WL>,
  "type": "per"
}

Ignore unreasonable prices and filter by fuzzy matching.
"#;

/// `itnm: <item>` followed by one candidate line per row.
pub fn build_prompt(query: &Query, lines: &CandidateLines) -> String {
    let mut prompt = format!("itnm: {}\n", query);
    let body: Vec<&str> = lines.iter().collect();
    prompt.push_str(&body.join("\n"));
    prompt
}

pub struct PriceInterpreter {
    generator: Arc<dyn TextGenerator>,
}

impl PriceInterpreter {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn interpret(&self, query: &Query, lines: &CandidateLines) -> Result<String> {
        let prompt = build_prompt(query, lines);
        tracing::debug!(
            "Sending {} candidate lines ({} bytes) to the model",
            lines.len(),
            prompt.len()
        );
        self.generator.generate(&prompt).await
    }
}
