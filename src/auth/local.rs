use super::{AuthProvider, User};
use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use chrono::Local;
use pbkdf2::pbkdf2_hmac;
use rusqlite::{Connection, OptionalExtension, params};
use sha2::Sha256;

pub const DEFAULT_ITERATIONS: u32 = 20_000;
pub const MIN_PASSWORD_LEN: usize = 6;

const HASH_SCHEME: &str = "pbkdf2-sha256";

/// Email/password accounts kept in the local database.
pub struct LocalAuth<'a> {
    conn: &'a Connection,
    iterations: u32,
}

impl<'a> LocalAuth<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self {
            conn,
            iterations: DEFAULT_ITERATIONS,
        }
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations.max(1);
        self
    }

    fn random_salt(&self) -> AppResult<Vec<u8>> {
        let salt: Vec<u8> = self
            .conn
            .query_row("SELECT randomblob(16)", [], |row| row.get(0))?;
        Ok(salt)
    }

    fn open_session(&self, email: &str) -> AppResult<User> {
        let now = Local::now().to_rfc3339();

        self.conn.execute(
            "INSERT INTO session (slot, email, signed_in_at) VALUES (1, ?1, ?2)
             ON CONFLICT(slot) DO UPDATE SET email = excluded.email, signed_in_at = excluded.signed_in_at",
            params![email, now],
        )?;

        Ok(User {
            email: email.to_string(),
            signed_in_at: now,
        })
    }
}

fn normalize_email(email: &str) -> AppResult<String> {
    let e = email.trim().to_lowercase();
    match e.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(e),
        _ => Err(AppError::InvalidEmail(email.to_string())),
    }
}

fn derive(password: &str, salt: &[u8], iterations: u32) -> [u8; 32] {
    let mut key = [0u8; 32];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut key);
    key
}

fn encode_hash(key: &[u8], iterations: u32) -> String {
    format!("{HASH_SCHEME}${iterations}${}", B64.encode(key))
}

/// Split `scheme$iterations$hash` into its parts.
fn decode_hash(stored: &str) -> Option<(u32, Vec<u8>)> {
    let mut parts = stored.splitn(3, '$');
    if parts.next()? != HASH_SCHEME {
        return None;
    }
    let iterations = parts.next()?.parse().ok()?;
    let key = B64.decode(parts.next()?).ok()?;
    Some((iterations, key))
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

impl AuthProvider for LocalAuth<'_> {
    fn current_user(&self) -> AppResult<Option<User>> {
        let user = self
            .conn
            .query_row(
                "SELECT s.email, s.signed_in_at FROM session s
                 JOIN users u ON u.email = s.email
                 WHERE s.slot = 1",
                [],
                |row| {
                    Ok(User {
                        email: row.get(0)?,
                        signed_in_at: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    fn sign_up(&self, email: &str, password: &str) -> AppResult<User> {
        let email = normalize_email(email)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::WeakPassword(MIN_PASSWORD_LEN));
        }

        let exists: Option<i64> = self
            .conn
            .query_row("SELECT 1 FROM users WHERE email = ?1", [&email], |row| {
                row.get(0)
            })
            .optional()?;
        if exists.is_some() {
            return Err(AppError::UserExists(email));
        }

        let salt = self.random_salt()?;
        let key = derive(password, &salt, self.iterations);

        self.conn.execute(
            "INSERT INTO users (email, password_hash, salt, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                email,
                encode_hash(&key, self.iterations),
                B64.encode(&salt),
                Local::now().to_rfc3339()
            ],
        )?;

        ttlog(self.conn, "signup", &email, "Account created")?;
        self.open_session(&email)
    }

    fn sign_in(&self, email: &str, password: &str) -> AppResult<User> {
        let email = normalize_email(email).map_err(|_| AppError::InvalidCredentials)?;

        let row: Option<(String, String)> = self
            .conn
            .query_row(
                "SELECT password_hash, salt FROM users WHERE email = ?1",
                [&email],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let (stored, salt_b64) = row.ok_or(AppError::InvalidCredentials)?;
        let (iterations, expected) = decode_hash(&stored)
            .ok_or_else(|| AppError::Other(format!("unreadable password hash for {email}")))?;
        let salt = B64
            .decode(salt_b64)
            .map_err(|e| AppError::Other(format!("unreadable salt for {email}: {e}")))?;

        if !constant_time_eq(&derive(password, &salt, iterations), &expected) {
            return Err(AppError::InvalidCredentials);
        }

        ttlog(self.conn, "login", &email, "Signed in")?;
        self.open_session(&email)
    }

    fn sign_out(&self) -> AppResult<()> {
        if let Some(user) = self.current_user()? {
            ttlog(self.conn, "logout", &user.email, "Signed out")?;
        }
        self.conn.execute("DELETE FROM session", [])?;
        Ok(())
    }
}
