// ============================================================================
// Source de données : holdings et plus-values
// ============================================================================
// Le dashboard ne calcule pas les données brutes, il les reçoit d'un
// collaborateur externe. Trois sources possibles :
// - Bundled : jeu d'exemple embarqué dans le binaire (include_str!)
// - File    : fichier JSON { "capitalGains": {...}, "holdings": [...] }
// - Http    : API REST, GET <base>/capital-gains et GET <base>/holdings
//
// CONCEPTS RUST :
// 1. async/await : les chargements s'exécutent dans le runtime du worker
// 2. anyhow::Context : chaque étape d'I/O ajoute son contexte à l'erreur
// 3. Serde : désérialisation directe vers les modèles
// ============================================================================

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

use crate::models::{CapitalGainsSnapshot, Holding};

/// Données d'exemple compilées dans le binaire
const BUNDLED_DATA: &str = include_str!("../../data/sample.json");

/// D'où viennent les données du dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Bundled,
    File(PathBuf),
    Http { base_url: String },
}

impl DataSource {
    /// Libellé court pour le header et les logs
    pub fn label(&self) -> String {
        match self {
            DataSource::Bundled => "sample data".to_string(),
            DataSource::File(path) => path.display().to_string(),
            DataSource::Http { base_url } => base_url.clone(),
        }
    }
}

/// Tout ce qu'il faut pour afficher le dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    /// Plus-values avant harvesting
    pub capital_gains: CapitalGainsSnapshot,
    pub holdings: Vec<Holding>,
    pub loaded_at: DateTime<Utc>,
}

// ============================================================================
// Formats JSON
// ============================================================================

/// Réponse de GET /capital-gains : { "capitalGains": { "stcg": .., "ltcg": .. } }
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CapitalGainsResponse {
    capital_gains: CapitalGainsSnapshot,
}

/// Fichier complet (source File et Bundled)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DashboardFile {
    capital_gains: CapitalGainsSnapshot,
    holdings: Vec<Holding>,
}

impl From<DashboardFile> for DashboardData {
    fn from(file: DashboardFile) -> Self {
        Self {
            capital_gains: file.capital_gains,
            holdings: file.holdings,
            loaded_at: Utc::now(),
        }
    }
}

// ============================================================================
// Chargement
// ============================================================================

/// Charge les données du dashboard depuis la source configurée
#[instrument(skip(source), fields(source = %source.label()))]
pub async fn load_dashboard_data(source: &DataSource) -> Result<DashboardData> {
    let data = match source {
        DataSource::Bundled => parse_dashboard_json(BUNDLED_DATA)
            .context("Données d'exemple embarquées invalides")?,
        DataSource::File(path) => load_from_file(path).await?,
        DataSource::Http { base_url } => fetch_from_api(base_url).await?,
    };

    info!(holdings = data.holdings.len(), "Dashboard data loaded");
    Ok(data)
}

/// Parse un document JSON complet (capitalGains + holdings)
pub fn parse_dashboard_json(json: &str) -> Result<DashboardData> {
    let file: DashboardFile =
        serde_json::from_str(json).context("Échec du parsing JSON des données du dashboard")?;
    Ok(file.into())
}

async fn load_from_file(path: &Path) -> Result<DashboardData> {
    debug!(path = %path.display(), "Reading dashboard data file");

    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Impossible de lire {}", path.display()))?;

    parse_dashboard_json(&json)
}

/// Récupère les deux ressources de l'API REST
async fn fetch_from_api(base_url: &str) -> Result<DashboardData> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("harvestdash/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Échec de la création du client HTTP")?;

    let gains: CapitalGainsResponse = get_json(&client, &capital_gains_url(base_url)).await?;
    let holdings: Vec<Holding> = get_json(&client, &holdings_url(base_url)).await?;

    Ok(DashboardData {
        capital_gains: gains.capital_gains,
        holdings,
        loaded_at: Utc::now(),
    })
}

/// GET + vérification du status + désérialisation
///
/// CONCEPT RUST : Generic avec trait bound
/// - T: DeserializeOwned : n'importe quel type désérialisable sans emprunt
async fn get_json<T: serde::de::DeserializeOwned>(client: &reqwest::Client, url: &str) -> Result<T> {
    debug!(url = %url, "Sending HTTP request");

    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Échec de la requête HTTP vers {}", url))?;

    let status = response.status();
    debug!(status = %status, "Received HTTP response");

    if !status.is_success() {
        error!(status = %status, url = %url, "Data API returned error status");
        anyhow::bail!("L'API a retourné une erreur : HTTP {} ({})", status, url);
    }

    response
        .json()
        .await
        .with_context(|| format!("Échec du parsing JSON de {}", url))
}

fn capital_gains_url(base_url: &str) -> String {
    format!("{}/capital-gains", base_url)
}

fn holdings_url(base_url: &str) -> String {
    format!("{}/holdings", base_url)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_bundled_data_parses() {
        let data = parse_dashboard_json(BUNDLED_DATA).unwrap();
        assert!(data.holdings.len() > 6);
        assert_eq!(data.capital_gains.stcg.profits, 70200.88);

        // Les identifiants doivent être uniques
        let mut coins: Vec<_> = data.holdings.iter().map(|h| h.coin.as_str()).collect();
        coins.sort_unstable();
        coins.dedup();
        assert_eq!(coins.len(), data.holdings.len());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = parse_dashboard_json("{ \"holdings\": [] }").unwrap_err();
        assert!(err.to_string().contains("parsing JSON"));
    }

    #[test]
    fn test_api_urls() {
        assert_eq!(capital_gains_url("http://localhost:3000"), "http://localhost:3000/capital-gains");
        assert_eq!(holdings_url("http://localhost:3000"), "http://localhost:3000/holdings");
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "capitalGains": {{
                    "stcg": {{ "profits": 1000, "losses": 200 }},
                    "ltcg": {{ "profits": 500, "losses": 100 }}
                }},
                "holdings": [{{
                    "coin": "BTC", "coinName": "Bitcoin",
                    "currentPrice": 10, "totalHolding": 2, "averageBuyPrice": 12,
                    "stcg": {{ "balance": 2, "gain": -4 }},
                    "ltcg": {{ "balance": 0, "gain": 0 }}
                }}]
            }}"#
        )
        .unwrap();

        let source = DataSource::File(file.path().to_path_buf());
        let data = load_dashboard_data(&source).await.unwrap();

        assert_eq!(data.capital_gains.realised_gains(), 1200.0);
        assert_eq!(data.holdings.len(), 1);
        assert_eq!(data.holdings[0].stcg.gain, -4.0);
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let source = DataSource::File(PathBuf::from("/nonexistent/harvestdash.json"));
        let err = load_dashboard_data(&source).await.unwrap_err();
        assert!(err.to_string().contains("/nonexistent/harvestdash.json"));
    }

    #[tokio::test]
    async fn test_load_bundled() {
        let data = load_dashboard_data(&DataSource::Bundled).await.unwrap();
        assert!(!data.holdings.is_empty());
    }
}
