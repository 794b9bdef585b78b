// ============================================================================
// Structure : App
// ============================================================================
// État global du dashboard de tax-loss harvesting
//
// PATTERN : "Application State"
// - Tous les composants de l'UI lisent depuis App (via les view-models)
// - Toutes les modifications passent par des transitions nommées :
//   snapshots_loaded, toggle_holding, toggle_all, toggle_show_all, ...
// - Une transition = un appel &mut self, appliqué avant l'événement suivant
// ============================================================================

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::api::DashboardData;
use crate::harvest::{simulate_harvest, SelectionSet, SelectionView, SummaryState};
use crate::models::{CapitalGainsSnapshot, Holding};

/// Nombre de lignes affichées tant que "View all" n'est pas activé
pub const HOLDINGS_PREVIEW_ROWS: usize = 6;

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Two-step quit : première pression de 'q' = demande de confirmation
    pub confirm_quit: bool,

    /// Plus-values avant harvesting (None tant que rien n'est chargé)
    pub original_capital_gains: Option<CapitalGainsSnapshot>,

    /// Plus-values après vente des holdings sélectionnés
    pub current_capital_gains: Option<CapitalGainsSnapshot>,

    /// Holdings dans l'ordre fourni par la source
    pub holdings: Vec<Holding>,

    /// Coins sélectionnés pour le harvesting
    pub selected_holdings: SelectionSet,

    /// Chargement en cours : le tableau affiche des placeholders
    pub loading: bool,

    /// Message affiché pendant le chargement
    pub loading_message: Option<String>,

    /// Dernière erreur de chargement (les données précédentes restent affichées)
    pub load_error: Option<String>,

    /// Affiche toutes les lignes au lieu des HOLDINGS_PREVIEW_ROWS premières
    pub show_all: bool,

    /// Ligne sous le curseur (index dans les lignes visibles)
    pub cursor: usize,

    /// Date du dernier chargement réussi
    pub loaded_at: Option<DateTime<Utc>>,

    /// Origine des données, affichée dans le header
    pub source_label: String,
}

impl App {
    /// Crée une App sans données : les deux cartes sont "not ready"
    pub fn new() -> Self {
        Self {
            running: true,
            confirm_quit: false,
            original_capital_gains: None,
            current_capital_gains: None,
            holdings: Vec::new(),
            selected_holdings: SelectionSet::new(),
            loading: false,
            loading_message: None,
            load_error: None,
            show_all: false,
            cursor: 0,
            loaded_at: None,
            source_label: String::new(),
        }
    }

    /// Crée une App directement chargée (tests, démarrage synchrone)
    pub fn with_data(data: DashboardData) -> Self {
        let mut app = Self::new();
        app.snapshots_loaded(data);
        app
    }

    // ========================================================================
    // Cycle de vie
    // ========================================================================

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    // ========================================================================
    // Chargement des données
    // ========================================================================

    pub fn start_loading(&mut self, message: Option<String>) {
        self.loading = true;
        self.loading_message = message;
    }

    pub fn stop_loading(&mut self) {
        self.loading = false;
        self.loading_message = None;
    }

    /// Transition "snapshotsLoaded" : nouvelles données de la source
    ///
    /// La sélection est conservée pour les coins encore présents, puis le
    /// snapshot courant est recalculé.
    pub fn snapshots_loaded(&mut self, data: DashboardData) {
        info!(holdings = data.holdings.len(), "Snapshots loaded");

        self.original_capital_gains = Some(data.capital_gains);
        self.holdings = data.holdings;
        self.loaded_at = Some(data.loaded_at);
        self.load_error = None;

        self.selected_holdings.retain_known(&self.holdings);
        self.refresh_current_gains();
        self.clamp_cursor();
        self.stop_loading();
    }

    /// Échec du chargement : on garde les données précédentes
    pub fn load_failed(&mut self, error: String) {
        self.load_error = Some(error);
        self.stop_loading();
    }

    // ========================================================================
    // Sélection
    // ========================================================================

    /// Transition "toggleHolding"
    pub fn toggle_holding(&mut self, coin: &str) {
        let selected = self.selected_holdings.toggle_holding(coin);
        debug!(coin = %coin, selected, "Holding toggled");
        self.refresh_current_gains();
    }

    /// Transition "toggleAll"
    pub fn toggle_all(&mut self) {
        self.selected_holdings.toggle_all(&self.holdings);
        debug!(selected = self.selected_holdings.len(), "Select all toggled");
        self.refresh_current_gains();
    }

    /// Inverse la sélection de la ligne sous le curseur
    pub fn toggle_cursor_row(&mut self) {
        if let Some(coin) = self.holding_under_cursor().map(|h| h.coin.clone()) {
            self.toggle_holding(&coin);
        }
    }

    /// Le snapshot courant suit toujours l'original + la sélection
    fn refresh_current_gains(&mut self) {
        self.current_capital_gains = self
            .original_capital_gains
            .as_ref()
            .map(|original| simulate_harvest(original, &self.holdings, &self.selected_holdings));
    }

    // ========================================================================
    // Navigation et affichage du tableau
    // ========================================================================

    /// "View all" / "View less"
    pub fn toggle_show_all(&mut self) {
        self.show_all = !self.show_all;
        self.clamp_cursor();
    }

    /// Le bouton "View all" n'existe que s'il y a plus de lignes que l'aperçu
    pub fn can_expand(&self) -> bool {
        self.holdings.len() > HOLDINGS_PREVIEW_ROWS
    }

    /// Lignes effectivement affichées
    pub fn displayed_holdings(&self) -> &[Holding] {
        if self.show_all {
            &self.holdings
        } else {
            let end = self.holdings.len().min(HOLDINGS_PREVIEW_ROWS);
            &self.holdings[..end]
        }
    }

    pub fn navigate_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn navigate_down(&mut self) {
        let max_index = self.displayed_holdings().len().saturating_sub(1);
        self.cursor = (self.cursor + 1).min(max_index);
    }

    pub fn holding_under_cursor(&self) -> Option<&Holding> {
        self.displayed_holdings().get(self.cursor)
    }

    fn clamp_cursor(&mut self) {
        let max_index = self.displayed_holdings().len().saturating_sub(1);
        self.cursor = self.cursor.min(max_index);
    }

    // ========================================================================
    // View-models
    // ========================================================================

    /// Résumé des deux cartes de plus-values
    pub fn gains_summary(&self) -> SummaryState {
        SummaryState::derive(
            self.original_capital_gains.as_ref(),
            self.current_capital_gains.as_ref(),
        )
    }

    /// État de sélection (toutes les lignes, pas seulement les visibles)
    pub fn selection_view(&self) -> SelectionView {
        SelectionView::derive(&self.holdings, &self.selected_holdings)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GainBucket;

    fn data(holdings: Vec<Holding>) -> DashboardData {
        DashboardData {
            capital_gains: CapitalGainsSnapshot::new(
                GainBucket::new(1000.0, 200.0),
                GainBucket::new(500.0, 100.0),
            ),
            holdings,
            loaded_at: Utc::now(),
        }
    }

    fn coins(names: &[&str]) -> Vec<Holding> {
        names.iter().map(|c| Holding::new(*c, *c)).collect()
    }

    #[test]
    fn test_app_creation() {
        let app = App::new();
        assert!(app.is_running());
        assert!(app.holdings.is_empty());
        assert!(!app.gains_summary().is_ready());
    }

    #[test]
    fn test_app_quit() {
        let mut app = App::new();
        app.request_quit();
        assert!(app.is_awaiting_quit_confirmation());
        app.cancel_quit();
        assert!(!app.is_awaiting_quit_confirmation());

        app.quit();
        assert!(!app.is_running());
    }

    #[test]
    fn test_snapshots_loaded_makes_summary_ready() {
        let mut app = App::new();
        app.start_loading(Some("Loading".to_string()));
        assert!(app.loading);

        app.snapshots_loaded(data(coins(&["A"])));

        assert!(!app.loading);
        let state = app.gains_summary();
        let summary = state.summary().unwrap();
        assert_eq!(summary.original.realised_gains, 1200.0);
        assert_eq!(summary.savings, 0.0);
        assert!(!summary.show_savings());
    }

    #[test]
    fn test_toggle_updates_current_gains() {
        let holdings = vec![
            Holding::new("ETH", "Ethereum").with_gains(0.0, -600.0),
            Holding::new("BTC", "Bitcoin").with_gains(300.0, 0.0),
        ];
        let mut app = App::with_data(data(holdings));

        app.toggle_holding("ETH");
        let summary = *app.gains_summary().summary().unwrap();
        assert_eq!(summary.current.realised_gains, 600.0);
        assert_eq!(summary.savings, 600.0);
        assert!(summary.show_savings());

        app.toggle_holding("ETH");
        let summary = *app.gains_summary().summary().unwrap();
        assert_eq!(summary.savings, 0.0);
    }

    #[test]
    fn test_toggle_all_scenario() {
        let mut app = App::with_data(data(coins(&["A", "B", "C"])));

        app.toggle_all();
        let view = app.selection_view();
        assert!(view.all_selected);
        assert_eq!(view.selected_count, 3);

        app.toggle_all();
        let view = app.selection_view();
        assert!(!view.all_selected);
        assert!(!view.some_selected);
        assert_eq!(view.selected_count, 0);
    }

    #[test]
    fn test_reload_drops_unknown_selection() {
        let mut app = App::with_data(data(coins(&["A", "B"])));
        app.toggle_holding("A");
        app.toggle_holding("B");

        app.snapshots_loaded(data(coins(&["B", "C"])));

        assert!(!app.selected_holdings.contains("A"));
        assert!(app.selected_holdings.contains("B"));
        assert!(app.selection_view().some_selected);
    }

    #[test]
    fn test_load_failed_keeps_previous_data() {
        let mut app = App::with_data(data(coins(&["A"])));
        app.start_loading(None);
        app.load_failed("HTTP 500".to_string());

        assert!(!app.loading);
        assert_eq!(app.holdings.len(), 1);
        assert_eq!(app.load_error.as_deref(), Some("HTTP 500"));
    }

    #[test]
    fn test_show_all_and_cursor_clamp() {
        let names = ["A", "B", "C", "D", "E", "F", "G", "H"];
        let mut app = App::with_data(data(coins(&names)));

        assert!(app.can_expand());
        assert_eq!(app.displayed_holdings().len(), HOLDINGS_PREVIEW_ROWS);

        app.toggle_show_all();
        assert_eq!(app.displayed_holdings().len(), names.len());

        for _ in 0..10 {
            app.navigate_down();
        }
        assert_eq!(app.cursor, names.len() - 1);

        // Repli : le curseur revient dans l'aperçu
        app.toggle_show_all();
        assert_eq!(app.cursor, HOLDINGS_PREVIEW_ROWS - 1);

        app.navigate_up();
        app.toggle_cursor_row();
        assert!(app.selected_holdings.contains("E"));
    }

    #[test]
    fn test_small_list_cannot_expand() {
        let app = App::with_data(data(coins(&["A", "B"])));
        assert!(!app.can_expand());
        assert_eq!(app.displayed_holdings().len(), 2);
    }
}
