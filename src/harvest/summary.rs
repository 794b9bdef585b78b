// ============================================================================
// GainsSummary : cartes "Pre Harvesting" / "After Harvesting"
// ============================================================================
// Dérive, à partir de deux snapshots (original et courant) :
// - net STCG / net LTCG de chaque snapshot
// - plus-values réalisées de chaque snapshot
// - économie (savings) = réalisé original - réalisé courant
//
// Si l'un des deux snapshots manque, on retourne NotReady : l'UI affiche
// un placeholder plutôt que des zéros.
// ============================================================================

use crate::models::CapitalGainsSnapshot;

/// Chiffres dérivés d'un snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapshotFigures {
    pub snapshot: CapitalGainsSnapshot,
    pub net_stcg: f64,
    pub net_ltcg: f64,
    pub realised_gains: f64,
}

impl SnapshotFigures {
    pub fn from_snapshot(snapshot: &CapitalGainsSnapshot) -> Self {
        Self {
            snapshot: *snapshot,
            net_stcg: snapshot.net_stcg(),
            net_ltcg: snapshot.net_ltcg(),
            realised_gains: snapshot.realised_gains(),
        }
    }
}

/// View-model des deux cartes de plus-values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainsSummary {
    /// Avant harvesting
    pub original: SnapshotFigures,

    /// Après harvesting
    pub current: SnapshotFigures,

    /// Économie réalisée (peut être négative ou nulle)
    pub savings: f64,
}

impl GainsSummary {
    pub fn new(original: &CapitalGainsSnapshot, current: &CapitalGainsSnapshot) -> Self {
        let original = SnapshotFigures::from_snapshot(original);
        let current = SnapshotFigures::from_snapshot(current);

        Self {
            original,
            current,
            savings: original.realised_gains - current.realised_gains,
        }
    }

    /// L'indicateur d'économie n'est affiché que si savings > 0.
    /// Zéro et négatif sont traités pareil : masqué.
    pub fn show_savings(&self) -> bool {
        self.savings > 0.0
    }
}

/// État du résumé : prêt ou en attente de données
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SummaryState {
    /// Au moins un snapshot n'est pas encore chargé
    NotReady,

    Ready(GainsSummary),
}

impl SummaryState {
    /// Point d'entrée du summarizer
    pub fn derive(
        original: Option<&CapitalGainsSnapshot>,
        current: Option<&CapitalGainsSnapshot>,
    ) -> Self {
        match (original, current) {
            (Some(original), Some(current)) => Self::Ready(GainsSummary::new(original, current)),
            _ => Self::NotReady,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn summary(&self) -> Option<&GainsSummary> {
        match self {
            Self::Ready(summary) => Some(summary),
            Self::NotReady => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GainBucket;

    fn snapshot(stcg: (f64, f64), ltcg: (f64, f64)) -> CapitalGainsSnapshot {
        CapitalGainsSnapshot::new(GainBucket::new(stcg.0, stcg.1), GainBucket::new(ltcg.0, ltcg.1))
    }

    #[test]
    fn test_harvest_scenario() {
        let original = snapshot((1000.0, 200.0), (500.0, 100.0));
        let current = snapshot((1000.0, 200.0), (500.0, 700.0));

        let state = SummaryState::derive(Some(&original), Some(&current));
        let summary = state.summary().unwrap();

        assert_eq!(summary.original.net_stcg, 800.0);
        assert_eq!(summary.original.net_ltcg, 400.0);
        assert_eq!(summary.original.realised_gains, 1200.0);

        assert_eq!(summary.current.net_ltcg, -200.0);
        assert_eq!(summary.current.realised_gains, 600.0);

        assert_eq!(summary.savings, 600.0);
        assert!(summary.show_savings());
    }

    #[test]
    fn test_zero_savings_hidden() {
        let original = snapshot((1000.0, 200.0), (500.0, 100.0));
        let summary = GainsSummary::new(&original, &original);

        assert_eq!(summary.savings, 0.0);
        assert!(!summary.show_savings());
    }

    #[test]
    fn test_negative_savings_hidden() {
        let original = snapshot((100.0, 0.0), (0.0, 0.0));
        let current = snapshot((300.0, 0.0), (0.0, 0.0));
        let summary = GainsSummary::new(&original, &current);

        assert_eq!(summary.savings, -200.0);
        assert!(!summary.show_savings());
    }

    #[test]
    fn test_not_ready_when_snapshot_missing() {
        let original = snapshot((1.0, 0.0), (0.0, 0.0));

        assert_eq!(SummaryState::derive(None, None), SummaryState::NotReady);
        assert_eq!(SummaryState::derive(Some(&original), None), SummaryState::NotReady);
        assert_eq!(SummaryState::derive(None, Some(&original)), SummaryState::NotReady);
        assert!(SummaryState::derive(Some(&original), Some(&original)).is_ready());
    }

    #[test]
    fn test_realised_matches_bucket_arithmetic() {
        let cases = [
            ((70200.88, 1548.53), (5020.0, 3050.0)),
            ((0.0, 0.0), (0.0, 0.0)),
            ((10.0, 10.0), (250.0, 0.0)),
        ];

        for (stcg, ltcg) in cases {
            let figures = SnapshotFigures::from_snapshot(&snapshot(stcg, ltcg));
            let expected = (stcg.0 - stcg.1) + (ltcg.0 - ltcg.1);
            assert_eq!(figures.realised_gains, expected);
        }
    }
}
