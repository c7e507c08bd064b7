// Résumé adaptation: role catalogue, prompt templates, the AI JSON pipeline
// and the /api/ai handlers that drive it.

pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod roles;
