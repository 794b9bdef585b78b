// ============================================================================
// Module : harvest
// ============================================================================
// Logique métier du dashboard, indépendante du terminal :
// - summary   : plus-values réalisées avant/après et économie
// - selection : holdings sélectionnés pour le harvesting
// - simulate  : snapshot courant recalculé à partir de la sélection
// ============================================================================

pub mod selection;
pub mod simulate;
pub mod summary;

pub use selection::{SelectionSet, SelectionView};
pub use simulate::simulate_harvest;
pub use summary::{GainsSummary, SnapshotFigures, SummaryState};
