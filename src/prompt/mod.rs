// src/prompt/mod.rs

/// Prompt for the sentiment endpoint. The JSON-only instruction is advisory;
/// models wrap the object in prose or fences anyway, which is why the
/// extractor exists.
pub fn sentiment_prompt(text: &str) -> String {
    format!(
        "Return a sentiment analysis of the following text. Respond with a JSON object \
        with exactly two keys: \"message\" (a description of the tone, 10 words or fewer) \
        and \"score\" (a number from -1 for very negative to 1 for very positive). \
        Respond with only the JSON object.\n\nText: {text}"
    )
}

/// Prompt for the email-rewrite endpoint.
pub fn rewrite_prompt(email: &str, tone: &str) -> String {
    format!(
        "Rewrite the following email in a {tone} tone. Respond with a JSON object \
        with exactly one key: \"email\" (the full rewritten email body). \
        Respond with only the JSON object.\n\nEmail: {email}"
    )
}
