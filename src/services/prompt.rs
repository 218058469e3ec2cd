//! Instruction prompts sent to the AI provider.
//!
//! The wording here shapes what the model returns, so treat edits as a contract change and
//! bump [`PROMPT_VERSION`] with them.

pub const PROMPT_VERSION: &str = "2";

const RESPONSE_SHAPE: &str = r#"Return strictly JSON:
{
  "product_name": "String",
  "inferred_intent": "String",
  "verdict": "Green | Yellow | Red",
  "reasoning": "String",
  "key_insights": ["String", "String", "String"]
}"#;

const IMAGE_INSTRUCTIONS: &str = "You are an expert Nutritional Co-Pilot. The user will upload a photo of a food label.\n\
Your goal is NOT to transcribe the text. Your goal is to INFER INTENT and REASON.\n\
\n\
1. Identify the Product\n\
2. Infer what the user cares about\n\
3. Analyze ingredients\n\
4. Give a Green, Yellow, or Red verdict\n";

const TEXT_INSTRUCTIONS: &str = "You are an expert Nutritional Co-Pilot. The user will paste an ingredient list or a short product description.\n\
Your goal is NOT to repeat the text. Your goal is to INFER INTENT and REASON.\n\
\n\
1. Identify the Product (use \"Unknown product\" if it cannot be named)\n\
2. Infer what the user cares about\n\
3. Analyze ingredients\n\
4. Give a Green, Yellow, or Red verdict\n";

/// Prompt for label photos. The image itself travels as an inline attachment.
pub fn image_prompt() -> String {
    format!("{}\n{}\n", IMAGE_INSTRUCTIONS, RESPONSE_SHAPE)
}

/// Prompt for free-text ingredient lists; the user's text goes last, after a delimiter.
pub fn text_prompt(ingredients: &str) -> String {
    format!(
        "{}\n{}\n\nIngredient text:\n---\n{}\n---\n",
        TEXT_INSTRUCTIONS,
        RESPONSE_SHAPE,
        ingredients.trim()
    )
}
