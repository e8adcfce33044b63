// Shared constants for layout, storage, and metadata.

pub const COMPANY_NAME: &str = "0x4D44 Software";
pub const PRODUCT_NAME: &str = "Klondike";

// Layout
pub const FOUNDATION_PILES: usize = 4;
pub const TABLEAU_PILES: usize = 7;
pub const DECK_SIZE: usize = 52;
pub const SUIT_SIZE: usize = 13;
/// Cards dealt onto the tableau by the triangular deal (1 + 2 + ... + 7).
pub const TABLEAU_DEAL: usize = TABLEAU_PILES * (TABLEAU_PILES + 1) / 2;

// Storage
pub const PREFERENCES_FILE: &str = "preferences.json";
pub const RESULTS_FILE: &str = "results.json";
pub const LOG_FILE: &str = "klondike.log";

// Drag transport MIME type
pub const DRAG_DATA_TYPE: &str = "application/x-solitaire-card";
