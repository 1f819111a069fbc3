// Cross-cutting prompt fragments shared by every JSON-producing call.
// Feature-specific prompts live next to the feature (see roadmap::prompts).

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";
