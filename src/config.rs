// ============================================================================
// Configuration
// ============================================================================
// Lue depuis l'environnement, après chargement d'un fichier .env optionnel
//
// Variables :
// - HARVESTDASH_DATA_FILE : charge les données depuis un fichier JSON
// - HARVESTDASH_API_URL   : charge les données depuis une API HTTP
// - HARVESTDASH_LOG_DIR   : répertoire des logs
// - RUST_LOG              : filtre tracing (lu directement par EnvFilter)
//
// Le fichier l'emporte sur l'URL ; sans les deux, on utilise les données
// d'exemple embarquées dans le binaire.
// ============================================================================

use std::path::PathBuf;

use tracing::debug;

use crate::api::DataSource;

pub const DATA_FILE_VAR: &str = "HARVESTDASH_DATA_FILE";
pub const API_URL_VAR: &str = "HARVESTDASH_API_URL";
pub const LOG_DIR_VAR: &str = "HARVESTDASH_LOG_DIR";

/// Filtre tracing par défaut si RUST_LOG n'est pas défini
pub const DEFAULT_LOG_FILTER: &str = "harvestdash=debug,info";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub source: DataSource,
    pub log_dir: PathBuf,
}

impl Config {
    /// Charge .env (s'il existe) puis lit l'environnement du process
    pub fn from_env() -> Self {
        // Un .env absent n'est pas une erreur
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Construit la config à partir d'une fonction de lookup
    ///
    /// CONCEPT RUST : Generic + closure
    /// - Permet de tester sans toucher aux variables d'environnement du process
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let source = if let Some(path) = non_empty(DATA_FILE_VAR) {
            DataSource::File(PathBuf::from(path))
        } else if let Some(url) = non_empty(API_URL_VAR) {
            DataSource::Http {
                base_url: url.trim_end_matches('/').to_string(),
            }
        } else {
            DataSource::Bundled
        };

        let log_dir = non_empty(LOG_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(default_log_dir);

        debug!(?source, ?log_dir, "Configuration resolved");
        Self { source, log_dir }
    }
}

/// ~/.local/share/harvestdash/logs sur Linux, ./logs si introuvable
fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("harvestdash").join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}
