// Cross-cutting prompt fragments shared by every provider.
// Task-specific templates live next to the code that fills them (adaptation::prompts).

/// System message for chat-style providers. Gemini receives the user prompt only.
pub const JSON_ONLY_SYSTEM: &str =
    "You are a helpful assistant that returns ONLY valid JSON responses with no additional text.";
