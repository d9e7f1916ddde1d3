//! Certificate file naming convention.
//!
//! The generated name is used for the local file, the object storage key,
//! and the `certificate_url` column of the persisted bank link, so it lives
//! here as the single source of truth.

use crate::types::DbId;

/// Generate the certificate bundle filename for a user.
///
/// Convention: `certificate_{user_id}.p12`
///
/// # Examples
///
/// ```
/// use balance_core::naming::certificate_filename;
///
/// assert_eq!(certificate_filename(42), "certificate_42.p12");
/// ```
pub fn certificate_filename(user_id: DbId) -> String {
    format!("certificate_{user_id}.p12")
}
