// ============================================================================
// Structure : CapitalGainsSnapshot
// ============================================================================
// Photographie des plus-values réalisées, découpée en deux buckets :
// - stcg : short-term capital gains
// - ltcg : long-term capital gains
//
// Chaque bucket porte des profits et des pertes en valeur absolue (>= 0).
// Le net d'un bucket (profits - losses) peut être négatif.
// ============================================================================

use serde::{Deserialize, Serialize};

/// Un bucket de plus-values (court terme ou long terme)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GainBucket {
    /// Profits réalisés (magnitude, >= 0)
    pub profits: f64,

    /// Pertes réalisées (magnitude, >= 0)
    pub losses: f64,
}

impl GainBucket {
    pub fn new(profits: f64, losses: f64) -> Self {
        Self { profits, losses }
    }

    /// Net du bucket : profits - losses (peut être négatif)
    pub fn net(&self) -> f64 {
        self.profits - self.losses
    }

    /// Ajoute une plus-value latente au bucket
    ///
    /// Un gain positif s'ajoute aux profits, un gain négatif ajoute
    /// sa magnitude aux pertes. Les deux champs restent >= 0.
    pub fn absorb(&mut self, gain: f64) {
        if gain > 0.0 {
            self.profits += gain;
        } else {
            self.losses += gain.abs();
        }
    }
}

/// Snapshot complet des plus-values
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CapitalGainsSnapshot {
    pub stcg: GainBucket,
    pub ltcg: GainBucket,
}

impl CapitalGainsSnapshot {
    pub fn new(stcg: GainBucket, ltcg: GainBucket) -> Self {
        Self { stcg, ltcg }
    }

    pub fn net_stcg(&self) -> f64 {
        self.stcg.net()
    }

    pub fn net_ltcg(&self) -> f64 {
        self.ltcg.net()
    }

    /// Plus-values réalisées : net STCG + net LTCG
    pub fn realised_gains(&self) -> f64 {
        self.net_stcg() + self.net_ltcg()
    }
}

// ============================================================================
// Tests
// ============================================================================
