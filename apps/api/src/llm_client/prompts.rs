// Shared prompt fragments. The analysis module keeps its own prompts.rs
// alongside it; this file holds only cross-cutting pieces.

/// System prompt that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str =
    "Eres un consultor de negocios que solo responde con formato JSON.";

/// Closing instruction appended to prompts that expect a single JSON object.
pub const JSON_OBJECT_INSTRUCTION: &str = "\
    No incluyas ningún texto, explicación o markdown antes o después del JSON.";
