//! Level setup
//!
//! Owns the generation parameters and the current layout. While a run is in
//! progress `doing_setup` is set; it is cleared only once a layout has been
//! stored.

use log::{info, warn};

use crate::config::GenerationConfig;
use crate::dungeon::LevelLayout;
use crate::error::GenerationError;
use crate::generator;

type CompletionHook = Box<dyn FnMut(&LevelLayout)>;

pub struct LevelSetup {
    config: GenerationConfig,
    doing_setup: bool,
    layout: Option<LevelLayout>,
    on_complete: Option<CompletionHook>,
}

impl LevelSetup {
    pub fn new(config: GenerationConfig) -> Self {
        Self {
            config,
            doing_setup: false,
            layout: None,
            on_complete: None,
        }
    }

    /// Call `hook` after every successful run
    pub fn on_complete(mut self, hook: impl FnMut(&LevelLayout) + 'static) -> Self {
        self.on_complete = Some(Box::new(hook));
        self
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn doing_setup(&self) -> bool {
        self.doing_setup
    }

    pub fn layout(&self) -> Option<&LevelLayout> {
        self.layout.as_ref()
    }

    /// Generate a level and store it
    pub fn start(&mut self, seed: u64) -> Result<&LevelLayout, GenerationError> {
        self.doing_setup = true;

        let layout = match generator::generate(&self.config, seed) {
            Ok(layout) => layout,
            Err(err) => {
                warn!("level setup failed for seed {seed}: {err}");
                return Err(err);
            }
        };

        if let Some(hook) = self.on_complete.as_mut() {
            hook(&layout);
        }
        self.doing_setup = false;
        info!("level ready ({} rooms)", layout.room_count());
        Ok(self.layout.insert(layout))
    }

    /// Throw the current level away and generate a new one
    pub fn restart(&mut self, seed: u64) -> Result<&LevelLayout, GenerationError> {
        self.layout = None;
        self.start(seed)
    }
}

impl std::fmt::Debug for LevelSetup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LevelSetup")
            .field("config", &self.config)
            .field("doing_setup", &self.doing_setup)
            .field("layout", &self.layout.as_ref().map(|l| l.room_count()))
            .finish_non_exhaustive()
    }
}
