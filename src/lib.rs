// ============================================================================
// harvestdash - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod api;     // Source des holdings et plus-values
pub mod app;     // État de l'application (transitions nommées)
pub mod config;  // Configuration via l'environnement
pub mod harvest; // Résumé des plus-values, sélection, simulation
pub mod models;  // Structures de données
pub mod ui;      // Interface utilisateur
