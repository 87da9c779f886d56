// state.rs - The single owner of boards, rules and display tags

use rand::Rng;
use tracing::info;

use crate::config::SimulationConfig;
use crate::engine::{GenerationReport, TransitionEngine};
use crate::grid::{Board, BoardPair};
use crate::interaction::{InteractionLayer, grid_dimensions};
use crate::patterns::{self, Pattern};
use crate::rules::RuleSet;
use crate::stability::Stability;

/// Everything the simulation mutates, owned by one controller.
#[derive(Debug, Clone)]
pub struct SimulationState {
    boards: BoardPair,
    rules: RuleSet,
    stability: Stability,
    engine: TransitionEngine,
    interaction: InteractionLayer,
    last_report: GenerationReport,
}

impl SimulationState {
    /// All-dead board of the given extent (clamped to at least 1x1).
    pub fn new(columns: usize, rows: usize, config: &SimulationConfig) -> Self {
        let boards = BoardPair::new(columns, rows);
        let stability = Stability::fresh(boards.current());
        Self {
            boards,
            rules: RuleSet::parse(&config.survival_lower, &config.survival_upper, &config.reproduction),
            stability,
            engine: TransitionEngine::new(),
            interaction: InteractionLayer::new(config.cell_size),
            last_report: GenerationReport::default(),
        }
    }

    /// Sizes the board to a viewport in pixels.
    pub fn for_viewport(width_px: f32, height_px: f32, config: &SimulationConfig) -> Self {
        let (columns, rows) = grid_dimensions(width_px, height_px, config.cell_size);
        Self::new(columns, rows, config)
    }

    pub fn board(&self) -> &Board {
        self.boards.current()
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.boards.dimensions()
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn stability(&self) -> &Stability {
        &self.stability
    }

    pub fn interaction(&self) -> &InteractionLayer {
        &self.interaction
    }

    pub fn generation(&self) -> u64 {
        self.engine.generation()
    }

    pub fn last_report(&self) -> GenerationReport {
        self.last_report
    }

    pub fn set_rules(&mut self, rules: RuleSet) {
        info!(%rules, "rules updated");
        self.rules = rules;
    }

    /// Reparses the three rule fields from `config`.
    pub fn apply_rule_text(&mut self, config: &SimulationConfig) {
        self.set_rules(RuleSet::parse(
            &config.survival_lower,
            &config.survival_upper,
            &config.reproduction,
        ));
    }

    pub fn set_cell_size(&mut self, cell_size: u32) {
        self.interaction = InteractionLayer::new(cell_size);
    }

    /// Runs one generation.
    pub fn step(&mut self) -> GenerationReport {
        let (report, stability) = self.engine.step(&mut self.boards, &self.rules);
        self.stability = stability;
        self.last_report = report;
        report
    }

    /// Runs one generation, yielding to the runtime between rows.
    pub async fn step_cooperative(&mut self) -> GenerationReport {
        let (report, stability) = self.engine.step_cooperative(&mut self.boards, &self.rules).await;
        self.stability = stability;
        self.last_report = report;
        report
    }

    /// Randomizes the board and restarts the generation count.
    pub fn reset<R: Rng + ?Sized>(&mut self, density: f64, rng: &mut R) {
        self.boards.clear();
        self.boards.current_mut().randomize(density, rng);
        self.restart();
        info!(
            columns = self.dimensions().0,
            rows = self.dimensions().1,
            population = self.board().population(),
            "board randomized"
        );
    }

    /// Reallocates both buffers, then randomizes.
    pub fn resize<R: Rng + ?Sized>(&mut self, columns: usize, rows: usize, density: f64, rng: &mut R) {
        self.boards.resize(columns, rows);
        info!(columns = self.dimensions().0, rows = self.dimensions().1, "board resized");
        self.reset(density, rng);
    }

    /// Resizes to fit a viewport; returns false when the extent is unchanged.
    pub fn fit_viewport<R: Rng + ?Sized>(
        &mut self,
        width_px: f32,
        height_px: f32,
        config: &SimulationConfig,
        rng: &mut R,
    ) -> bool {
        self.set_cell_size(config.cell_size);
        let dimensions = grid_dimensions(width_px, height_px, config.cell_size);
        if dimensions == self.dimensions() {
            return false;
        }
        self.resize(dimensions.0, dimensions.1, config.density, rng);
        true
    }

    pub fn clear(&mut self) {
        self.boards.clear();
        self.restart();
    }

    pub fn apply_pattern(&mut self, pattern: &Pattern) {
        patterns::apply_centered(self.boards.current_mut(), pattern);
        self.restart();
        info!(pattern = pattern.name, "pattern applied");
    }

    /// Forces the cell under a pointer position alive.
    pub fn paint_at(&mut self, pixel_x: f32, pixel_y: f32) -> Option<(usize, usize)> {
        let (x, y) = self.interaction.paint_at(self.boards.current_mut(), pixel_x, pixel_y)?;
        self.stability.mark_painted(x, y);
        Some((x, y))
    }

    fn restart(&mut self) {
        self.engine.reset();
        self.stability = Stability::fresh(self.boards.current());
        self.last_report = GenerationReport {
            population: self.boards.current().population(),
            ..GenerationReport::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stability::StabilityTag;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn resize_reallocates_both_buffers() {
        let config = SimulationConfig::default();
        let mut state = SimulationState::new(8, 8, &config);
        let mut rng = StdRng::seed_from_u64(1);
        state.resize(0, 12, 0.5, &mut rng);
        assert_eq!(state.dimensions(), (1, 12));
        assert_eq!(state.generation(), 0);
        state.step();
        assert_eq!(state.dimensions(), (1, 12));
    }

    #[test]
    fn fit_viewport_only_reinitializes_on_change() {
        let config = SimulationConfig::default();
        let mut state = SimulationState::for_viewport(200.0, 100.0, &config);
        let mut rng = StdRng::seed_from_u64(2);
        assert_eq!(state.dimensions(), (20, 10));
        assert!(!state.fit_viewport(205.0, 109.0, &config, &mut rng));

        let larger = SimulationConfig { cell_size: 20, ..config };
        assert!(state.fit_viewport(205.0, 109.0, &larger, &mut rng));
        assert_eq!(state.dimensions(), (10, 5));
        assert_eq!(state.interaction().unit_length(), 20.0);
    }

    #[test]
    fn painted_cells_are_tagged_changing() {
        let config = SimulationConfig::default();
        let mut state = SimulationState::new(5, 5, &config);
        assert_eq!(state.paint_at(12.0, 3.0), Some((1, 0)));
        assert_eq!(state.stability().tag(1, 0), StabilityTag::AliveChanging);
        assert_eq!(state.paint_at(60.0, 3.0), None);
        assert_eq!(state.board().population(), 1);
    }

    #[test]
    fn clear_restarts_counters() {
        let config = SimulationConfig::default();
        let mut state = SimulationState::new(6, 6, &config);
        state.apply_pattern(&patterns::BLOCK);
        state.step();
        state.step();
        assert_eq!(state.generation(), 2);
        assert_eq!(state.stability().stable_count(), 4);

        state.clear();
        assert_eq!(state.generation(), 0);
        assert_eq!(state.board().population(), 0);
        assert_eq!(state.last_report().population, 0);
    }

    #[test]
    fn rule_text_is_reapplied() {
        let mut config = SimulationConfig::default();
        let mut state = SimulationState::new(6, 6, &config);
        config.reproduction = "3,6".into();
        state.apply_rule_text(&config);
        assert!(state.rules().is_reproduction_match(6));
    }
}
