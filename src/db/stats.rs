use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

#[derive(Debug, Clone, Default)]
pub struct DbInfo {
    pub file_size: u64,
    pub collections: Vec<(String, i64)>,
    pub users: i64,
    pub last_update: Option<String>,
}

pub fn collect_db_info(pool: &DbPool, db_path: &str) -> AppResult<DbInfo> {
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);

    let mut stmt = pool.conn.prepare(
        "SELECT collection, COUNT(*) FROM documents
         GROUP BY collection
         ORDER BY collection ASC",
    )?;
    let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?;

    let mut collections = Vec::new();
    for r in rows {
        collections.push(r?);
    }

    let users: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;

    let last_update: Option<String> = pool
        .conn
        .query_row("SELECT MAX(updated_at) FROM documents", [], |row| {
            row.get::<_, Option<String>>(0)
        })
        .optional()?
        .flatten();

    Ok(DbInfo {
        file_size,
        collections,
        users,
        last_update,
    })
}

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    let info = collect_db_info(pool, db_path)?;

    println!();

    let file_mb = (info.file_size as f64) / (1024.0 * 1024.0);
    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);
    println!("{}• Users:{} {}{}{}", CYAN, RESET, GREEN, info.users, RESET);

    println!("{}• Documents:{}", CYAN, RESET);
    if info.collections.is_empty() {
        println!("    {GREY}--{RESET}");
    }
    for (collection, count) in &info.collections {
        println!("    {:<12} {}{}{}", collection, GREEN, count, RESET);
    }

    let last = info
        .last_update
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));
    println!("{}• Last update:{} {}", CYAN, RESET, last);

    println!();
    Ok(())
}
