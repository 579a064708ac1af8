//! Prompt templates.

use crate::pipeline::Profile;

/// Prompt asking the model to pull `feature_names` out of `query`, in order,
/// as a comma-separated list with `?` for anything it cannot find.
pub fn extraction_prompt(query: &str, feature_names: &[String], profile: Option<&Profile>) -> String {
    let profile_context = match profile {
        Some(profile) if !profile.is_empty() => {
            let items: Vec<String> = profile
                .iter()
                .map(|(name, value)| format!("{}: {}", name, value))
                .collect();
            format!("Known profile so far:\n{}\n", items.join("\n"))
        }
        _ => String::new(),
    };

    format!(
        "You are an expert AI assistant. {profile_context}\
         Extract the following details from the user's message and output a comma-separated list in this exact order (no labels, just values):\n\
         {features}\n\n\
         User message:\n{query}\n\n\
         If a value is missing or unclear, output a question mark (?) for that value. Use no extra text.",
        features = feature_names.join(", "),
    )
}

/// Prompt asking the model to turn the model summary into advice.
pub fn advice_prompt(query: &str, domain: &str, summary: &str) -> String {
    format!(
        "You are a supportive, friendly AI life coach.\n\
         Always use relevant, positive, and engaging emojis to make the advice more interactive and approachable.\n\
         User query: {query}\n\
         Domain: {domain}\n\
         Model insights:\n\
         {summary}\n\
         \n\
         Summarize results and provide actionable, encouraging advice in a conversational, upbeat tone. Use emojis for each step or section! If some insights are missing, gently encourage the user to provide more details for even more personalized advice.\n"
    )
}
