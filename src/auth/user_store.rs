//! User Storage
//! Mission: Securely store and manage user accounts with SQLite

use crate::auth::models::User;
use crate::auth::password::{hash_password, verify_password};
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection};
use tracing::{info, warn};
use uuid::Uuid;

/// User storage with SQLite backend
pub struct UserStore {
    db_path: String,
    bcrypt_cost: u32,
}

impl UserStore {
    /// Create a new user store and initialize database
    pub fn new(db_path: &str, bcrypt_cost: u32) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
            bcrypt_cost,
        };
        store.init_db()?;
        Ok(store)
    }

    /// Initialize database schema
    fn init_db(&self) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                username TEXT UNIQUE NOT NULL,
                pseudonym TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        // Seed an initial account if the table is empty: user creation itself
        // requires authentication, so a fresh deployment needs one login.
        self.create_default_admin(&conn)?;

        Ok(())
    }

    /// Create default admin user for initial setup
    fn create_default_admin(&self, conn: &Connection) -> Result<()> {
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
            .context("Failed to count users")?;

        if count == 0 {
            let password_hash = hash_password("admin123", self.bcrypt_cost)?;

            let admin = User {
                id: Uuid::new_v4(),
                username: "admin".to_string(),
                pseudonym: "Administrator".to_string(),
                password_hash,
                created_at: Utc::now().to_rfc3339(),
            };

            conn.execute(
                "INSERT INTO users (id, username, pseudonym, password_hash, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    admin.id.to_string(),
                    admin.username,
                    admin.pseudonym,
                    admin.password_hash,
                    admin.created_at,
                ],
            )
            .context("Failed to insert admin user")?;

            info!("🔐 Default admin user created (username: admin, password: admin123)");
            warn!("⚠️  CHANGE DEFAULT PASSWORD IN PRODUCTION!");
        }

        Ok(())
    }

    /// Get user by username
    pub fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, username, pseudonym, password_hash, created_at
             FROM users WHERE username = ?1",
        )?;

        let user_result = stmt.query_row(params![username], row_to_user);

        match user_result {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get user by ID
    pub fn get_user_by_id(&self, user_id: &Uuid) -> Result<Option<User>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, username, pseudonym, password_hash, created_at
             FROM users WHERE id = ?1",
        )?;

        let user_result = stmt.query_row(params![user_id.to_string()], row_to_user);

        match user_result {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Verify username and password
    pub fn verify_login(&self, username: &str, password: &str) -> Result<bool> {
        match self.get_user_by_username(username)? {
            Some(user) => Ok(verify_password(password, &user.password_hash)),
            None => Ok(false),
        }
    }

    /// Create a new user
    ///
    /// Fails on a duplicate username (UNIQUE constraint).
    pub fn create_user(&self, username: &str, pseudonym: &str, password: &str) -> Result<User> {
        let password_hash = hash_password(password, self.bcrypt_cost)?;

        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            pseudonym: pseudonym.to_string(),
            password_hash,
            created_at: Utc::now().to_rfc3339(),
        };

        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "INSERT INTO users (id, username, pseudonym, password_hash, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                user.id.to_string(),
                user.username,
                user.pseudonym,
                user.password_hash,
                user.created_at,
            ],
        )
        .context("Failed to insert user")?;

        info!("✅ Created user: {}", user.username);

        Ok(user)
    }

    /// Re-hash and store a new password for a user
    ///
    /// Returns `false` if no user with that ID exists.
    pub fn update_password(&self, user_id: &Uuid, password: &str) -> Result<bool> {
        let password_hash = hash_password(password, self.bcrypt_cost)?;

        let conn = Connection::open(&self.db_path)?;
        let rows_affected = conn.execute(
            "UPDATE users SET password_hash = ?1 WHERE id = ?2",
            params![password_hash, user_id.to_string()],
        )?;

        Ok(rows_affected > 0)
    }

    /// Delete a user by ID
    ///
    /// Returns `false` if no user with that ID exists.
    pub fn delete_user(&self, user_id: &Uuid) -> Result<bool> {
        let conn = Connection::open(&self.db_path)?;

        let rows_affected = conn.execute(
            "DELETE FROM users WHERE id = ?1",
            params![user_id.to_string()],
        )?;

        if rows_affected > 0 {
            info!("🗑️  Deleted user: {}", user_id);
        }

        Ok(rows_affected > 0)
    }
}

fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        // ids are written by this store as canonical UUID strings
        id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap(),
        username: row.get(1)?,
        pseudonym: row.get(2)?,
        password_hash: row.get(3)?,
        created_at: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    // Low bcrypt cost keeps the suite fast
    const TEST_COST: u32 = 4;

    fn create_test_store() -> (UserStore, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let db_path = temp_file.path().to_str().unwrap();
        let store = UserStore::new(db_path, TEST_COST).unwrap();
        (store, temp_file)
    }

    #[test]
    fn test_default_admin_created() {
        let (store, _temp) = create_test_store();

        let admin = store.get_user_by_username("admin").unwrap();
        assert!(admin.is_some());

        let admin = admin.unwrap();
        assert_eq!(admin.username, "admin");
        assert!(store.verify_login("admin", "admin123").unwrap());
    }

    #[test]
    fn test_login_verification() {
        let (store, _temp) = create_test_store();
        store.create_user("alice", "Alice", "s3cret!").unwrap();

        // Correct password
        assert!(store.verify_login("alice", "s3cret!").unwrap());

        // Incorrect password
        assert!(!store.verify_login("alice", "wrongpassword").unwrap());

        // Non-existent user
        assert!(!store.verify_login("nonexistent", "password").unwrap());
    }

    #[test]
    fn test_create_and_retrieve_user() {
        let (store, _temp) = create_test_store();

        let user = store.create_user("alice", "Alice", "s3cret!").unwrap();
        assert_eq!(user.username, "alice");
        assert_ne!(user.password_hash, "s3cret!");

        let retrieved = store.get_user_by_username("alice").unwrap().unwrap();
        assert_eq!(retrieved.id, user.id);
        assert_eq!(retrieved.pseudonym, "Alice");

        let by_id = store.get_user_by_id(&user.id).unwrap().unwrap();
        assert_eq!(by_id.username, "alice");
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let (store, _temp) = create_test_store();

        store.create_user("alice", "Alice", "pass1").unwrap();
        let result = store.create_user("alice", "Other Alice", "pass2");
        assert!(result.is_err());
    }

    #[test]
    fn test_same_password_stored_with_different_hashes() {
        let (store, _temp) = create_test_store();

        let user1 = store.create_user("alice", "Alice", "shared-pw").unwrap();
        let user2 = store.create_user("bob", "Bob", "shared-pw").unwrap();

        assert_ne!(user1.password_hash, user2.password_hash);
    }

    #[test]
    fn test_update_password_rehashes() {
        let (store, _temp) = create_test_store();
        let user = store.create_user("alice", "Alice", "old-pass").unwrap();

        assert!(store.update_password(&user.id, "new-pass").unwrap());

        // Old password no longer verifies, new one does
        assert!(!store.verify_login("alice", "old-pass").unwrap());
        assert!(store.verify_login("alice", "new-pass").unwrap());

        let updated = store.get_user_by_username("alice").unwrap().unwrap();
        assert_ne!(updated.password_hash, user.password_hash);
    }

    #[test]
    fn test_update_password_unknown_user() {
        let (store, _temp) = create_test_store();
        assert!(!store.update_password(&Uuid::new_v4(), "pw").unwrap());
    }

    #[test]
    fn test_delete_user() {
        let (store, _temp) = create_test_store();
        let user = store.create_user("tempuser", "Temp", "pass").unwrap();

        assert!(store.delete_user(&user.id).unwrap());
        assert!(store.get_user_by_username("tempuser").unwrap().is_none());

        // Second delete finds nothing
        assert!(!store.delete_user(&user.id).unwrap());
    }
}
