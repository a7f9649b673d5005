use crate::error::AppError;
use crate::models::User;
use crate::validation::validate_tracking_days;
use rusqlite::Connection;

use super::{require_user, UserSettingsResponse};

pub fn get_settings(conn: &Connection, user_id: i64) -> Result<UserSettingsResponse, AppError> {
    let user = require_user(conn, user_id)?;
    Ok(UserSettingsResponse::from(user))
}

/// Change the user's default tracking window. The range check happens
/// here, at the point the default is stored, so reads can trust it.
pub fn set_default_tracking_days(
    conn: &Connection,
    user_id: i64,
    days: i64,
) -> Result<UserSettingsResponse, AppError> {
    require_user(conn, user_id)?;
    validate_tracking_days(days)?;

    User::set_default_tracking_days(conn, user_id, days)?;
    let user = require_user(conn, user_id)?;
    Ok(UserSettingsResponse::from(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{seed_user, setup_test_db};

    #[test]
    fn test_get_settings() {
        let (db, _dir) = setup_test_db();
        let conn = db.connection();
        let user_id = seed_user(conn);

        let settings = get_settings(conn, user_id).unwrap();
        assert_eq!(settings.default_tracking_days, 7);
    }

    #[test]
    fn test_set_default_tracking_days() {
        let (db, _dir) = setup_test_db();
        let conn = db.connection();
        let user_id = seed_user(conn);

        let settings = set_default_tracking_days(conn, user_id, 30).unwrap();
        assert_eq!(settings.default_tracking_days, 30);
    }

    #[test]
    fn test_rejects_out_of_range_default() {
        let (db, _dir) = setup_test_db();
        let conn = db.connection();
        let user_id = seed_user(conn);

        for days in [0, 31, -1] {
            assert!(matches!(
                set_default_tracking_days(conn, user_id, days),
                Err(AppError::OutOfRange { .. })
            ));
        }
    }

    #[test]
    fn test_missing_user() {
        let (db, _dir) = setup_test_db();
        let conn = db.connection();

        assert!(matches!(
            get_settings(conn, 99999),
            Err(AppError::NotFound { .. })
        ));
    }
}
