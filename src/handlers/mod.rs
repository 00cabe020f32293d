// handlers/mod.rs - three security tiers
//
// Public (no auth) → Protected (caller identity) → Elevated (admin gate)
pub mod elevated; // Tier 3: AdminGate on every route (/admin/*)
pub mod protected; // Tier 2: resolved identity required (/api/*)
pub mod public; // Tier 1: no authentication
