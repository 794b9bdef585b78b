// ============================================================================
// Structure : Holding
// ============================================================================
// Une position crypto détenue, avec ses plus-values latentes court/long terme
//
// CONCEPTS RUST :
// 1. #[serde(rename_all = "camelCase")] : "coinName" (JSON) -> coin_name (Rust)
// 2. Option : le logo peut être absent du JSON
// ============================================================================

use serde::{Deserialize, Serialize};

/// Plus-value latente d'un holding pour un bucket (stcg ou ltcg)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HoldingGain {
    /// Gain latent (négatif = perte)
    pub gain: f64,

    /// Quantité de coins concernée par ce bucket
    pub balance: f64,
}

/// Une ligne du tableau des holdings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    /// Identifiant du coin (ex: "BTC"), unique dans une liste de holdings
    pub coin: String,

    /// Nom complet (ex: "Bitcoin")
    pub coin_name: String,

    /// URL du logo, purement décorative
    #[serde(default)]
    pub logo: Option<String>,

    pub total_holding: f64,
    pub average_buy_price: f64,
    pub current_price: f64,
    pub stcg: HoldingGain,
    pub ltcg: HoldingGain,
}

impl Holding {
    /// Crée un holding sans plus-values (utile pour les tests et les fixtures)
    pub fn new(coin: impl Into<String>, coin_name: impl Into<String>) -> Self {
        Self {
            coin: coin.into(),
            coin_name: coin_name.into(),
            logo: None,
            total_holding: 0.0,
            average_buy_price: 0.0,
            current_price: 0.0,
            stcg: HoldingGain::default(),
            ltcg: HoldingGain::default(),
        }
    }

    /// Builder : fixe les gains latents court et long terme
    pub fn with_gains(mut self, stcg: f64, ltcg: f64) -> Self {
        self.stcg.gain = stcg;
        self.ltcg.gain = ltcg;
        self
    }

    /// Builder : fixe quantité, prix moyen d'achat et prix courant
    pub fn with_position(mut self, total_holding: f64, average_buy_price: f64, current_price: f64) -> Self {
        self.total_holding = total_holding;
        self.average_buy_price = average_buy_price;
        self.current_price = current_price;
        self
    }

    /// Valeur actuelle totale : quantité × prix courant
    pub fn total_value(&self) -> f64 {
        self.total_holding * self.current_price
    }

    /// Nom tronqué pour l'affichage dans une colonne de largeur fixe
    ///
    /// Note : on compte en chars (pas en bytes) pour ne pas couper
    /// un caractère UTF-8 en deux
    pub fn short_name(&self, max: usize) -> String {
        if self.coin_name.chars().count() <= max {
            self.coin_name.clone()
        } else {
            let truncated: String = self.coin_name.chars().take(max.saturating_sub(1)).collect();
            format!("{}…", truncated)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
