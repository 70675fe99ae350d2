mod config;
mod damage;
mod data;
mod loader;
mod report;
mod scoring;
mod search;
mod set_effect;

pub use config::{ConfigError, DEFAULT_CONFIG_PATH, OptimizerConfig, ReportFormat};
pub use damage::{WeaponStats, calculate_damage};
pub use data::{
    Artifact, CRIT_DMG_KEY, CRIT_RATE_KEY, DEFAULT_MAX_ARTIFACT_LINES, Element, MAX_CONSTELLATION,
    NUM_SLOTS, Slot, Substat, Weapon,
};
pub use loader::{
    load_artifacts, load_weapons, parse_artifact_line, parse_weapon_line, read_artifacts,
    read_weapons,
};
pub use report::{render_json, render_text};
pub use scoring::{DamageModel, LoadoutScorer, SetActivation};
pub use search::{
    Backtracking, Enumerator, Loadout, NestedLoops, ResultTracker, ScoredLoadout, SearchError,
    SearchSpace, Strategy, Traversal, WeaponParallel,
};
pub use set_effect::{SetBonus, SetEffect, SetEffectTable};
