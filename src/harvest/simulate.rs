// ============================================================================
// Simulation post-harvesting
// ============================================================================
// Recalcule le snapshot "courant" à partir du snapshot original et des
// holdings sélectionnés : vendre un holding réalise ses gains latents.
//
// Pour chaque holding sélectionné et chaque bucket :
// - gain > 0 : ajouté aux profits
// - gain < 0 : magnitude ajoutée aux pertes
// ============================================================================

use crate::harvest::SelectionSet;
use crate::models::{CapitalGainsSnapshot, Holding};

/// Snapshot après vente des holdings sélectionnés
pub fn simulate_harvest(
    original: &CapitalGainsSnapshot,
    holdings: &[Holding],
    selection: &SelectionSet,
) -> CapitalGainsSnapshot {
    holdings
        .iter()
        .filter(|h| selection.contains(&h.coin))
        .fold(*original, |mut snapshot, holding| {
            snapshot.stcg.absorb(holding.stcg.gain);
            snapshot.ltcg.absorb(holding.ltcg.gain);
            snapshot
        })
}
