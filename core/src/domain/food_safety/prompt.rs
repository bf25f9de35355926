use crate::domain::food_safety::value_objects::{ChatMessage, CompletionRequest};

const RECORD_SHAPE: &str = r#"{
  "name": string,
  "isSafe": boolean,
  "confidence": number (0-1),
  "explanation": string,
  "safeQuantity": string (optional),
  "risks": string[] (optional),
  "benefits": string[] (optional),
  "alternatives": string[] (optional),
  "sourceUrl": string (optional)
}"#;

/// Builds the fixed system instruction, listing every trusted source domain.
pub fn system_instruction(trusted_domains: &[String]) -> String {
    let domains = trusted_domains
        .iter()
        .map(|domain| format!("   - {domain}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a pregnancy food safety expert. You MUST respond with a valid JSON object. \
Your response should be a single JSON object with the following structure:

{RECORD_SHAPE}

IMPORTANT:
1. Your response MUST be a valid JSON object
2. Do not include any text before or after the JSON object
3. Do not include markdown formatting
4. ALWAYS include a sourceUrl field with a real, working URL from one of these trusted medical websites:
{domains}
5. The sourceUrl must be a direct link to the specific food safety information
6. If you cannot find a specific URL, use the main website URL of one of these sources"
    )
}

pub fn user_instruction(query: &str) -> String {
    format!(
        "Is {query} safe to eat during pregnancy? Respond with a valid JSON object containing \
the safety information. Make sure to include a sourceUrl from one of the trusted medical websites."
    )
}

pub fn build_completion_request(query: &str, trusted_domains: &[String]) -> CompletionRequest {
    CompletionRequest {
        messages: vec![
            ChatMessage::system(system_instruction(trusted_domains)),
            ChatMessage::user(user_instruction(query)),
        ],
    }
}
