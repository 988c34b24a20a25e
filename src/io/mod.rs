//! Map persistence and text rendering.
//!
//! - [`snapshot`]: JSON snapshots, file naming and directory listing
//! - [`ascii`]: fixed-width occupancy and Wi-Fi views

pub mod ascii;
pub mod snapshot;

pub use ascii::{render, RenderLayer};
pub use snapshot::{
    latest_snapshot, list_snapshots, load_snapshot, read_snapshot, save_snapshot,
    snapshot_file_name, write_snapshot, MapSnapshot, SnapshotMetadata, SnapshotSummary,
};
