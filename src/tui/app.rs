use std::time::Instant;

use crate::criteria::{clamp_threshold, FilterCriteria};
use crate::dataset::{Pokemon, Stat};
use crate::query::{run_query, QueryOutput};
use crate::scoring::MatchScore;

/// Step applied by the +/- keys.
pub const STAT_STEP: i64 = 5;
/// Step applied by the PageUp/PageDown keys.
pub const STAT_STEP_LARGE: i64 = 25;

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Matches,
    Top,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    NameInput,
    Help,
}

pub struct App {
    /// The full store, untouched for the lifetime of the session
    records: Vec<Pokemon>,
    /// Criteria the session started with; `r` returns here
    defaults: FilterCriteria,
    pub criteria: FilterCriteria,
    pub top_count: usize,
    pub matched: Vec<Pokemon>,
    pub top: Vec<(Pokemon, MatchScore)>,
    pub pool_size: usize,
    pub table_state: ratatui::widgets::TableState,
    pub current_view: View,
    pub selected_stat: usize,
    pub input_mode: InputMode,
    pub name_input: String,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
}

impl App {
    pub fn new(records: Vec<Pokemon>, criteria: FilterCriteria, top_count: usize) -> Self {
        let mut app = Self {
            records,
            defaults: criteria.clone(),
            criteria,
            top_count,
            matched: Vec::new(),
            top: Vec::new(),
            pool_size: 0,
            table_state: ratatui::widgets::TableState::default(),
            current_view: View::Matches,
            selected_stat: 0,
            input_mode: InputMode::Normal,
            name_input: String::new(),
            flash_message: None,
            should_quit: false,
        };
        app.recompute();
        app
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// The stat the +/- keys currently adjust.
    pub fn current_stat(&self) -> Stat {
        Stat::ALL[self.selected_stat]
    }

    /// Rows backing whichever table is on screen.
    pub fn current_len(&self) -> usize {
        match self.current_view {
            View::Matches => self.matched.len(),
            View::Top => self.top.len(),
        }
    }

    /// Rerun the whole pipeline against the current criteria. Called after
    /// every criteria change; the store itself never changes.
    pub fn recompute(&mut self) {
        match run_query(&self.records, &self.criteria, self.top_count) {
            Ok(QueryOutput {
                matched,
                top,
                pool_size,
            }) => {
                self.matched = matched;
                self.top = top;
                self.pool_size = pool_size;
            }
            // Interactive adjustments are clamped before they land, so
            // this only fires for criteria injected from outside.
            Err(e) => self.show_flash(format!("Criteria error: {}", e)),
        }
        self.fix_selection();
    }

    /// Nudge the selected stat's minimum, clamped to the stat's domain.
    pub fn adjust_stat(&mut self, delta: i64) {
        let stat = self.current_stat();
        let current = i64::from(self.criteria.thresholds.get(stat));
        let adjusted = clamp_threshold(stat, current + delta);
        if adjusted != self.criteria.thresholds.get(stat) {
            self.criteria.thresholds.set(stat, adjusted);
            self.recompute();
        }
    }

    pub fn next_stat(&mut self) {
        self.selected_stat = (self.selected_stat + 1) % Stat::ALL.len();
    }

    pub fn previous_stat(&mut self) {
        self.selected_stat = (self.selected_stat + Stat::ALL.len() - 1) % Stat::ALL.len();
    }

    pub fn select_stat(&mut self, index: usize) {
        if index < Stat::ALL.len() {
            self.selected_stat = index;
        }
    }

    pub fn toggle_legendary(&mut self) {
        self.criteria.legendary_only = !self.criteria.legendary_only;
        self.recompute();
        let state = if self.criteria.legendary_only {
            "on"
        } else {
            "off"
        };
        self.show_flash(format!("Legendary filter {}", state));
    }

    /// Return every control to where the session started.
    pub fn reset_criteria(&mut self) {
        self.criteria = self.defaults.clone();
        self.recompute();
        self.show_flash("Filters reset".to_string());
    }

    /// Start name search input mode
    pub fn start_name_input(&mut self) {
        self.input_mode = InputMode::NameInput;
        self.name_input = self.criteria.name_query.clone();
    }

    /// Apply the typed query. An empty input clears the name filter.
    pub fn confirm_name_input(&mut self) {
        self.criteria.name_query = self.name_input.clone();
        self.input_mode = InputMode::Normal;
        self.recompute();
        if self.criteria.name_query.trim().is_empty() {
            self.show_flash("Name filter cleared".to_string());
        } else {
            self.show_flash(format!(
                "{} Pokemon match '{}'",
                self.pool_size, self.criteria.name_query
            ));
        }
    }

    /// Cancel name input without touching the active query
    pub fn cancel_name_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.name_input.clear();
    }

    pub fn next_row(&mut self) {
        let len = self.current_len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        let len = self.current_len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    /// Toggle between the Matches and Top views
    pub fn toggle_view(&mut self) {
        self.current_view = match self.current_view {
            View::Matches => View::Top,
            View::Top => View::Matches,
        };
        self.fix_selection();
    }

    /// Show help overlay
    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    /// Dismiss help overlay
    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= 3 {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    // Keep the table selection valid after the view shrinks or switches.
    fn fix_selection(&mut self) {
        let len = self.current_len();
        if len == 0 {
            self.table_state.select(None);
        } else {
            match self.table_state.selected() {
                Some(selected) if selected < len => {}
                _ => self.table_state.select(Some(0)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pokemon(name: &str, stats: [u16; 6], legendary: bool) -> Pokemon {
        Pokemon {
            name: name.to_string(),
            name_kor: name.to_string(),
            type1: "Normal".to_string(),
            type2: None,
            hp: stats[0],
            attack: stats[1],
            defense: stats[2],
            sp_atk: stats[3],
            sp_def: stats[4],
            speed: stats[5],
            total: stats.iter().sum(),
            legendary,
        }
    }

    fn sample_app() -> App {
        let records = vec![
            pokemon("Strong", [90; 6], false),
            pokemon("Weak", [10; 6], false),
            pokemon("Legend", [95; 6], true),
        ];
        App::new(records, FilterCriteria::default(), 10)
    }

    #[test]
    fn new_app_computes_both_views() {
        let app = sample_app();
        assert_eq!(app.pool_size, 3);
        assert_eq!(app.matched.len(), 2);
        assert_eq!(app.top.len(), 3);
        assert_eq!(app.table_state.selected(), Some(0));
    }

    #[test]
    fn adjust_changes_results_immediately() {
        let mut app = sample_app();
        // HP is selected at start; raise its minimum past Strong
        app.adjust_stat(41);
        assert_eq!(app.criteria.thresholds.hp, 91);
        assert_eq!(app.matched.len(), 1);
        assert_eq!(app.matched[0].name, "Legend");
    }

    #[test]
    fn adjust_clamps_at_the_domain_edges() {
        let mut app = sample_app();
        app.adjust_stat(1000);
        assert_eq!(app.criteria.thresholds.hp, 255);
        app.adjust_stat(-1000);
        assert_eq!(app.criteria.thresholds.hp, 0);
    }

    #[test]
    fn stat_selection_wraps_both_ways() {
        let mut app = sample_app();
        assert_eq!(app.current_stat(), Stat::Hp);
        app.previous_stat();
        assert_eq!(app.current_stat(), Stat::Speed);
        app.next_stat();
        assert_eq!(app.current_stat(), Stat::Hp);
        app.select_stat(3);
        assert_eq!(app.current_stat(), Stat::SpAtk);
        // Out of range is ignored
        app.select_stat(9);
        assert_eq!(app.current_stat(), Stat::SpAtk);
    }

    #[test]
    fn legendary_toggle_narrows_the_pool() {
        let mut app = sample_app();
        app.toggle_legendary();
        assert_eq!(app.pool_size, 1);
        assert_eq!(app.matched[0].name, "Legend");
        app.toggle_legendary();
        assert_eq!(app.pool_size, 3);
    }

    #[test]
    fn name_search_applies_on_confirm_only() {
        let mut app = sample_app();
        app.start_name_input();
        app.name_input.push_str("leg");
        assert_eq!(app.pool_size, 3);
        app.confirm_name_input();
        assert_eq!(app.pool_size, 1);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn empty_name_confirm_clears_the_filter() {
        let mut app = sample_app();
        app.criteria.name_query = "leg".to_string();
        app.recompute();
        assert_eq!(app.pool_size, 1);

        app.start_name_input();
        app.name_input.clear();
        app.confirm_name_input();
        assert_eq!(app.pool_size, 3);
    }

    #[test]
    fn cancel_keeps_the_active_query() {
        let mut app = sample_app();
        app.criteria.name_query = "leg".to_string();
        app.recompute();
        app.start_name_input();
        app.name_input.push_str("xyz");
        app.cancel_name_input();
        assert_eq!(app.criteria.name_query, "leg");
        assert_eq!(app.pool_size, 1);
    }

    #[test]
    fn reset_restores_starting_criteria() {
        let mut app = sample_app();
        app.adjust_stat(50);
        app.toggle_legendary();
        app.criteria.name_query = "leg".to_string();
        app.reset_criteria();
        assert_eq!(app.criteria, FilterCriteria::default());
        assert_eq!(app.pool_size, 3);
    }

    #[test]
    fn row_navigation_wraps() {
        let mut app = sample_app();
        // Matches view has 2 rows
        assert_eq!(app.table_state.selected(), Some(0));
        app.next_row();
        assert_eq!(app.table_state.selected(), Some(1));
        app.next_row();
        assert_eq!(app.table_state.selected(), Some(0));
        app.previous_row();
        assert_eq!(app.table_state.selected(), Some(1));
    }

    #[test]
    fn selection_resets_when_the_view_shrinks() {
        let mut app = sample_app();
        app.next_row();
        assert_eq!(app.table_state.selected(), Some(1));
        // Raise HP so only Legend matches; selection falls back to row 0
        app.adjust_stat(41);
        assert_eq!(app.matched.len(), 1);
        assert_eq!(app.table_state.selected(), Some(0));
    }

    #[test]
    fn view_toggle_keeps_selection_valid() {
        let mut app = sample_app();
        app.toggle_view();
        assert_eq!(app.current_view, View::Top);
        assert_eq!(app.current_len(), 3);
        assert_eq!(app.table_state.selected(), Some(0));
        app.toggle_view();
        assert_eq!(app.current_view, View::Matches);
    }

    #[test]
    fn impossible_filter_empties_selection() {
        let mut app = sample_app();
        app.start_name_input();
        app.name_input.push_str("zzz");
        app.confirm_name_input();
        assert_eq!(app.pool_size, 0);
        assert_eq!(app.table_state.selected(), None);
    }
}
