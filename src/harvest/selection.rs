// ============================================================================
// Sélection des holdings à harvester
// ============================================================================
// Chaque holding est sélectionné ou non. L'état est un ensemble d'identifiants
// de coins ; il n'existe que deux états logiques par ligne.
//
// "someSelected" (case indéterminée du "select all") est une dérivation
// d'affichage, pas un troisième état.
// ============================================================================

use std::collections::BTreeSet;

use crate::models::Holding;

/// Ensemble des coins sélectionnés
///
/// CONCEPT RUST : BTreeSet
/// - Ordre déterministe (utile pour les logs et les tests)
/// - contains / insert / remove en O(log n)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    coins: BTreeSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.coins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }

    pub fn contains(&self, coin: &str) -> bool {
        self.coins.contains(coin)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.coins.iter().map(String::as_str)
    }

    /// Inverse l'appartenance de `coin`. Un coin inconnu est simplement
    /// inséré (ou retiré), sans erreur.
    ///
    /// Retourne true si le coin est sélectionné après l'appel.
    pub fn toggle_holding(&mut self, coin: &str) -> bool {
        if self.coins.remove(coin) {
            false
        } else {
            self.coins.insert(coin.to_string());
            true
        }
    }

    /// "Select all" : sélectionne tout, sauf si tout est déjà sélectionné,
    /// auquel cas on vide la sélection.
    pub fn toggle_all(&mut self, holdings: &[Holding]) {
        let every: BTreeSet<String> = holdings.iter().map(|h| h.coin.clone()).collect();

        if self.coins == every {
            self.coins.clear();
        } else {
            self.coins = every;
        }
    }

    /// Retire les coins qui ne figurent plus dans la liste de holdings
    /// (après un rechargement des données)
    pub fn retain_known(&mut self, holdings: &[Holding]) {
        self.coins
            .retain(|coin| holdings.iter().any(|h| &h.coin == coin));
    }

    /// |sélection| == |holdings|
    pub fn all_selected(&self, holdings: &[Holding]) -> bool {
        self.coins.len() == holdings.len()
    }

    /// 0 < |sélection| < |holdings|
    pub fn some_selected(&self, holdings: &[Holding]) -> bool {
        !self.coins.is_empty() && self.coins.len() < holdings.len()
    }
}

/// View-model de la sélection, consommé par le tableau
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionView {
    /// Un flag par ligne, dans l'ordre des holdings
    pub rows: Vec<bool>,
    pub all_selected: bool,
    pub some_selected: bool,
    pub selected_count: usize,
}

impl SelectionView {
    pub fn derive(holdings: &[Holding], selection: &SelectionSet) -> Self {
        Self {
            rows: holdings.iter().map(|h| selection.contains(&h.coin)).collect(),
            all_selected: selection.all_selected(holdings),
            some_selected: selection.some_selected(holdings),
            selected_count: selection.len(),
        }
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.rows.get(index).copied().unwrap_or(false)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn holdings(coins: &[&str]) -> Vec<Holding> {
        coins.iter().map(|c| Holding::new(*c, *c)).collect()
    }

    #[test]
    fn test_toggle_all_scenario() {
        let holdings = holdings(&["A", "B", "C"]);
        let mut selection = SelectionSet::new();

        selection.toggle_all(&holdings);
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec!["A", "B", "C"]);
        assert!(selection.all_selected(&holdings));

        selection.toggle_all(&holdings);
        assert!(selection.is_empty());
        assert!(!selection.all_selected(&holdings));
    }

    #[test]
    fn test_toggle_all_from_partial_selects_everything() {
        let holdings = holdings(&["A", "B", "C"]);
        let mut selection = SelectionSet::new();
        selection.toggle_holding("B");

        selection.toggle_all(&holdings);
        assert_eq!(selection.len(), 3);
        assert!(selection.all_selected(&holdings));

        selection.toggle_all(&holdings);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_empty_holdings_count_as_all_selected() {
        let holdings: Vec<Holding> = Vec::new();
        let mut selection = SelectionSet::new();

        assert!(selection.all_selected(&holdings));
        assert!(!selection.some_selected(&holdings));

        selection.toggle_all(&holdings);
        assert!(selection.is_empty());
        assert!(selection.all_selected(&holdings));
    }

    #[test]
    fn test_toggle_holding_is_self_inverse() {
        let mut selection = SelectionSet::new();
        selection.toggle_holding("A");

        assert!(selection.toggle_holding("B"));
        assert!(!selection.toggle_holding("B"));
        assert!(!selection.contains("B"));

        assert!(!selection.toggle_holding("A"));
        assert!(selection.toggle_holding("A"));
        assert!(selection.contains("A"));
    }

    #[test]
    fn test_toggle_unknown_coin_is_no_error() {
        let holdings = holdings(&["A"]);
        let mut selection = SelectionSet::new();

        assert!(selection.toggle_holding("ZZZ"));
        selection.retain_known(&holdings);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_all_and_some_are_exclusive() {
        let holdings = holdings(&["A", "B", "C"]);
        let mut selection = SelectionSet::new();

        let check = |s: &SelectionSet| {
            let all = s.all_selected(&holdings);
            let some = s.some_selected(&holdings);
            assert!(!(all && some));
            assert_eq!(all, s.len() == holdings.len());
            assert_eq!(some, s.len() > 0 && s.len() < holdings.len());
        };

        check(&selection);
        for coin in ["A", "B", "C"] {
            selection.toggle_holding(coin);
            check(&selection);
        }
        assert!(selection.all_selected(&holdings));
    }

    #[test]
    fn test_selection_view() {
        let holdings = holdings(&["A", "B", "C"]);
        let mut selection = SelectionSet::new();
        selection.toggle_holding("C");

        let view = SelectionView::derive(&holdings, &selection);
        assert_eq!(view.rows, vec![false, false, true]);
        assert!(view.some_selected);
        assert!(!view.all_selected);
        assert_eq!(view.selected_count, 1);
        assert!(view.is_selected(2));
        assert!(!view.is_selected(42));
    }
}
