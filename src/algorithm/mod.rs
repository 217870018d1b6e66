/// Tile placement onto the output canvas
pub mod compositor;
/// End-to-end run sequencing and statistics
pub mod orchestrator;
