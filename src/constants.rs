/// Preset name constants to ensure consistency across the codebase
/// These map the CLI-facing app names onto their category sets and endpoints

// User-facing preset names (used in CLI and config)
pub const FLICK_PICK: &str = "flick-pick";
pub const START_BENCH_CUT: &str = "start-bench-cut";

// (label, display text) pairs in button order
pub const FLICK_PICK_CATEGORIES: &[(&str, &str)] = &[("own", "Own it"), ("stream", "Stream it"), ("skip", "Skip it")];
pub const START_BENCH_CUT_CATEGORIES: &[(&str, &str)] = &[("start", "Start"), ("bench", "Bench"), ("cut", "Cut")];

// Endpoints relative to the API base URL
pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const FLICK_PICK_CATALOG_PATH: &str = "/api/movies";
pub const START_BENCH_CUT_CATALOG_PATH: &str = "/api/generate/nfl-players";
pub const DEFAULT_SUBMIT_PATH: &str = "/api/selections";

// Local files
pub const CONFIG_FILE: &str = "pickset.toml";
pub const DEFAULT_SESSION_FILE: &str = ".pickset/session.json";
pub const DEFAULT_HISTORY_FILE: &str = ".pickset/history.json";
pub const DEFAULT_LOG_DIR: &str = "logs";

// Environment overrides
pub const ENV_API_URL: &str = "PICKSET_API_URL";
pub const ENV_API_TOKEN: &str = "PICKSET_API_TOKEN";
pub const ENV_PRESET: &str = "PICKSET_PRESET";

/// Get all supported preset names
pub fn get_supported_presets() -> Vec<&'static str> {
    vec![FLICK_PICK, START_BENCH_CUT]
}
