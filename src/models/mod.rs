// ============================================================================
// Module : models
// ============================================================================
// Structures de données fournies par la source externe (holdings et
// snapshots de plus-values). Aucune logique de présentation ici.
// ============================================================================

pub mod capital_gains; // Snapshots STCG / LTCG
pub mod holding;       // Lignes du tableau des holdings

// Re-export des structures principales pour simplifier les imports
pub use capital_gains::{CapitalGainsSnapshot, GainBucket};
pub use holding::{Holding, HoldingGain};
