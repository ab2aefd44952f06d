//! Version normalization for the persisted database record.

use halt_core::db::Db;

/// Brings a persisted database to `target` version in place.
///
/// Version 1 is the first unified schema; blobs stamped 0 (or written before
/// version stamping existed) are structurally identical and only need their
/// version fields set. Later schema changes add their steps here.
pub fn migrate_db(db: &mut Db, target: u32) {
    if db.version < 1 {
        db.version = 1;
        db.settings.version = 1;
    }
    db.version = target;
    db.settings.version = target;
}
