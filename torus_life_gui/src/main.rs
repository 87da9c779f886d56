// main.rs - Interactive toroidal Game of Life
// The frame loop lives in ui.rs; all simulation state is in SimulationState

use anyhow::Result;
use clap::Parser;
use eframe::egui;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Instant;
use torus_life::patterns;
use torus_life::{GenerationReport, HostLoop, Rgb, SimulationConfig, SimulationState};
use tracing::info;

mod ui;

#[derive(Debug, Parser)]
#[command(name = "torus_life", about = "Toroidal Game of Life with configurable rules")]
struct Args {
    /// Living cells with fewer neighbours die (first value of a comma list)
    #[arg(long, default_value = "2")]
    survival_lower: String,

    /// Living cells with more neighbours die (first value of a comma list)
    #[arg(long, default_value = "3")]
    survival_upper: String,

    /// Neighbour counts at which a dead cell is born, comma separated
    #[arg(long, default_value = "3")]
    reproduction: String,

    /// Generations per second
    #[arg(long, default_value_t = 15)]
    tick_rate: u32,

    /// Edge length of a cell in pixels
    #[arg(long, default_value_t = 10)]
    cell_size: u32,

    #[arg(long, default_value = "100,200,100")]
    alive_color: Rgb,

    /// Colour of cells that survived the last generation (defaults to the alive colour)
    #[arg(long)]
    stable_color: Option<Rgb>,

    #[arg(long, default_value = "50,200,50")]
    edge_color: Rgb,

    /// Draw stable cells in the alive colour
    #[arg(long)]
    no_stable_highlight: bool,

    /// Probability that a cell starts alive on reset
    #[arg(long, default_value_t = 0.2)]
    density: f64,

    /// Seed for reproducible boards
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn into_config(self) -> SimulationConfig {
        SimulationConfig {
            survival_lower: self.survival_lower,
            survival_upper: self.survival_upper,
            reproduction: self.reproduction,
            tick_rate: self.tick_rate,
            cell_size: self.cell_size,
            alive_color: self.alive_color,
            stable_color: self.stable_color.unwrap_or(self.alive_color),
            edge_color: self.edge_color,
            stable_highlight: !self.no_stable_highlight,
            density: self.density,
            seed: self.seed,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();

    let config = Args::parse().into_config();
    config.validate()?;
    info!(?config, "starting");

    // Generations run as row coroutines on a single thread
    let runtime = tokio::runtime::Builder::new_current_thread().build()?;
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 850.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Torus Life",
        options,
        Box::new(move |_cc| Box::new(LifeApp::new(config, runtime, rng))),
    )
    .map_err(|err| anyhow::anyhow!("window closed with error: {err}"))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

pub struct LifeApp {
    state: SimulationState,
    config: SimulationConfig,
    host: HostLoop,
    runtime: tokio::runtime::Runtime,
    rng: StdRng,
    selected_pattern: usize,
    viewport: Option<egui::Vec2>, // canvas size the board was last fitted to
    refit_pending: bool,               // cell size changed since the last fit
}

impl LifeApp {
    fn new(config: SimulationConfig, runtime: tokio::runtime::Runtime, rng: StdRng) -> Self {
        // Sized to the canvas on the first frame
        let state = SimulationState::new(1, 1, &config);
        let host = HostLoop::new(config.tick_rate, Instant::now());
        Self {
            state,
            config,
            host,
            runtime,
            rng,
            selected_pattern: 0,
            viewport: None,
            refit_pending: true,
        }
    }

    fn update_generation(&mut self) -> GenerationReport {
        self.runtime.block_on(self.state.step_cooperative())
    }

    fn reset(&mut self) {
        self.state.reset(self.config.density, &mut self.rng);
    }

    fn apply_selected_pattern(&mut self) {
        if let Some(pattern) = patterns::PATTERNS.get(self.selected_pattern) {
            self.state.apply_pattern(pattern);
        }
    }

    /// Refits the board when the canvas or the cell size changed.
    fn fit_canvas(&mut self, available: egui::Vec2) {
        if self.viewport == Some(available) && !self.refit_pending {
            return;
        }
        let resized = self.state.fit_viewport(available.x, available.y, &self.config, &mut self.rng);
        if self.refit_pending && !resized {
            self.reset();
        }
        self.viewport = Some(available);
        self.refit_pending = false;
    }
}
