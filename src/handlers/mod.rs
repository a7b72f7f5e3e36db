// handlers/mod.rs - Two handler tiers
//
// Public (no identity needed) → Protected (identity resolved from the bearer
// token and enforced by the notes service)
pub mod public;    // Tier 1: service info and health (/, /health)
pub mod protected; // Tier 2: per-user notes (/api/notes*)
