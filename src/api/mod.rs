// ============================================================================
// Module : api
// ============================================================================
// Chargement des holdings et des plus-values depuis la source configurée
// (données embarquées, fichier JSON ou API HTTP)
// ============================================================================

pub mod source;

// Re-export des éléments principaux
pub use source::{load_dashboard_data, DashboardData, DataSource};
