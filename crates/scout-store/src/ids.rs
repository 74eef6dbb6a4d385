//! Id generation for locally created records
//!
//! Local ids are `<millis>_<suffix>` and guest ids prepend `guest_`. They
//! intentionally look nothing like the server-assigned ids of the remote
//! backend; the two id spaces are never comparable.

use rand::Rng;

/// Id for a record created in the on-device store.
pub(crate) fn local_record_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: u16 = rand::thread_rng().gen_range(0..10_000);
    format!("{millis}_{suffix}")
}

/// Id for a freshly generated guest session.
pub(crate) fn guest_session_id() -> String {
    format!("guest_{}", local_record_id())
}
