//! Prompt construction for rental agreement extraction

use leasehold_domain::{ChatMessage, ExtractionPrompt};

/// Marker wrapping the agreement text in the user message
pub const AGREEMENT_TAG: &str = "rental_agreement";

/// Marker the model writes its reasoning into
pub const SCRATCHPAD_TAG: &str = "scratchpad";

/// Marker the model writes the JSON answer into
pub const OUTPUT_TAG: &str = "output";

/// Default token limit for a response
pub const DEFAULT_MAX_TOKENS: u32 = 10_000;

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f64 = 0.5;

/// Builds the extraction prompt for one agreement
pub struct PromptBuilder {
    text: String,
    max_tokens: u32,
    temperature: f64,
}

impl PromptBuilder {
    /// Create a new prompt builder for the agreement text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Override the token limit
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Override the sampling temperature
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> ExtractionPrompt {
        ExtractionPrompt {
            system: SYSTEM_INSTRUCTIONS.to_string(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            messages: vec![ChatMessage::user(format!(
                "<{tag}> {text} </{tag}>",
                tag = AGREEMENT_TAG,
                text = self.text
            ))],
        }
    }
}

/// System instruction sent with every agreement
const SYSTEM_INSTRUCTIONS: &str = r#"You are a Data Processor. You will receive the text of a rental agreement for a residential unit such as an apartment, house or condo, inside <rental_agreement> tags.

Extract these items from the agreement:
    Rental agreement title (shorten the title to 6 words or less)
    Name of the owner of the rental unit
    Name of the tenant of the rental unit
    Tenancy start date and tenancy end date (write dates as mm/dd/yyyy, converting from dd/mm/yyyy or dd.mm.yyyy when needed)
    Monthly rent (write the currency amount as a plain number)
    Deposit amount (write the currency amount as a plain number)
    Terms on who pays utilities such as electricity, water, sewer and internet
    Terms on who pays property tax and homeowner or condo association fees
    Terms for terminating the rental

Answer with a single valid JSON object that uses exactly these keys:
<example_format>
{"Rental Agreement Title": "(title)", "Owner Name": "(owner)", "Tenant Name": "(tenant)", "Tenancy Start Date": "(start date in mm/dd/yyyy)", "Tenancy End Date": "(end date in mm/dd/yyyy)", "Monthly Rent": "(monthly rent)", "Deposit": "(deposit)", "Utility Terms": "(utilities)", "Property Tax and HOA": "(tax and hoa)", "Rental Termination Terms": "(termination)"}
</example_format>

Read the legal language of the agreement carefully before answering.

Think through the agreement step by step and write your reasoning inside <scratchpad> tags.

Write the JSON object inside <output> tags. Put nothing but the JSON inside the <output> tags."#;

#[cfg(test)]
mod tests {
    use super::*;
    use leasehold_domain::{Role, TermField};

    #[test]
    fn test_user_message_wraps_text() {
        let prompt = PromptBuilder::new("This lease is made between...").build();

        assert_eq!(prompt.messages.len(), 1);
        assert_eq!(prompt.messages[0].role, Role::User);
        assert_eq!(
            prompt.messages[0].content,
            "<rental_agreement> This lease is made between... </rental_agreement>"
        );
    }

    #[test]
    fn test_defaults() {
        let prompt = PromptBuilder::new("text").build();
        assert_eq!(prompt.max_tokens, 10_000);
        assert_eq!(prompt.temperature, 0.5);
    }

    #[test]
    fn test_overrides() {
        let prompt = PromptBuilder::new("text")
            .with_max_tokens(2048)
            .with_temperature(0.0)
            .build();
        assert_eq!(prompt.max_tokens, 2048);
        assert_eq!(prompt.temperature, 0.0);
    }

    #[test]
    fn test_instructions_name_every_field() {
        let prompt = PromptBuilder::new("text").build();
        for field in TermField::ALL {
            assert!(
                prompt.system.contains(&format!("\"{}\"", field.json_key())),
                "missing {}",
                field.json_key()
            );
        }
    }

    #[test]
    fn test_instructions_mention_format_rules() {
        let system = PromptBuilder::new("text").build().system;
        assert!(system.contains("6 words or less"));
        assert!(system.contains("mm/dd/yyyy"));
        assert!(system.contains("<example_format>"));
        assert!(system.contains("<scratchpad>"));
        assert!(system.contains("<output>"));
    }

    #[test]
    fn test_empty_text_still_builds() {
        let prompt = PromptBuilder::new("").build();
        assert_eq!(
            prompt.messages[0].content,
            "<rental_agreement>  </rental_agreement>"
        );
    }
}
