use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::models::ModelRegistry;
use crate::core::platforms::PlatformRegistry;
use crate::core::shifts::ShiftLedger;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::store::SqliteStore;
use crate::utils::colors::{CYAN, GREEN, RED, RESET, YELLOW};

fn step(label: &str) {
    println!("{}▶ {}…{}", CYAN, label, RESET);
}

fn done(label: &str) {
    println!("{}✔ {}{}\n", GREEN, label, RESET);
}

/// References between documents that no longer resolve: shifts whose model
/// is gone, model entries pointing at missing shifts or platforms.
fn dangling_references(pool: &DbPool) -> AppResult<Vec<String>> {
    let store = SqliteStore::new(&pool.conn);
    let platforms = PlatformRegistry::new(&store).fetch_all()?;
    let models = ModelRegistry::new(&store).fetch_all()?;
    let shifts = ShiftLedger::new(&store).fetch_all()?;

    let mut problems = Vec::new();

    for s in &shifts {
        if !models.iter().any(|m| m.doc_id() == s.model) {
            problems.push(format!("turnos/{} → missing model '{}'", s.id, s.model));
        }
    }

    for m in &models {
        for sid in &m.shifts {
            if !shifts.iter().any(|s| &s.id == sid) {
                problems.push(format!("modelos/{} → missing shift '{}'", m.id, sid));
            }
        }
        for pid in &m.platforms {
            if !platforms.iter().any(|p| &p.id == pid) {
                problems.push(format!("modelos/{} → missing platform '{}'", m.id, pid));
            }
        }
    }

    Ok(problems)
}

fn check(pool: &DbPool) -> AppResult<()> {
    step("Running integrity check");

    let integrity: String = pool
        .conn
        .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

    if integrity != "ok" {
        println!("{}✘ Integrity check failed:{} {}\n", RED, RESET, integrity);
        return Ok(());
    }
    done("Integrity check passed.");

    step("Checking document references");
    let problems = dangling_references(pool)?;
    if problems.is_empty() {
        done("All references resolve.");
    } else {
        for p in &problems {
            println!("  {}•{} {}", YELLOW, RESET, p);
        }
        println!(
            "{}⚠ {} dangling reference(s) found.{}\n",
            YELLOW,
            problems.len(),
            RESET
        );
    }
    Ok(())
}

pub fn handle(cmd: &Commands, cfg: &Config, pool: &DbPool) -> AppResult<()> {
    let Commands::Db {
        migrate,
        check: run_check,
        vacuum,
        info,
    } = cmd
    else {
        return Ok(());
    };

    if *migrate {
        step("Running migrations");
        run_pending_migrations(&pool.conn)?;
        done("Migration completed.");
    }

    if *info {
        stats::print_db_info(pool, &cfg.database)?;
    }

    if *run_check {
        check(pool)?;
    }

    if *vacuum {
        step("Running VACUUM");
        pool.conn.execute_batch("VACUUM;")?;
        done("Vacuum completed.");
    }

    Ok(())
}
