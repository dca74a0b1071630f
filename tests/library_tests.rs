//! Library-level tests against a private in-memory database.

use shiftdesk::auth::{AuthProvider, LocalAuth, SessionObserver};
use shiftdesk::core::calculator::earnings;
use shiftdesk::core::models::ModelRegistry;
use shiftdesk::core::platforms::PlatformRegistry;
use shiftdesk::core::shifts::ShiftLedger;
use shiftdesk::db::initialize::init_db;
use shiftdesk::db::pool::DbPool;
use shiftdesk::errors::AppError;
use shiftdesk::models::jornada::Jornada;
use shiftdesk::models::model::NewModel;
use shiftdesk::models::shift::{Earnings, Shift, ShiftPatch, parse_earnings};
use shiftdesk::models::timestamp::Timestamp;
use shiftdesk::router::{AuthGate, LOGIN_PATH, Navigation, ROUTES, Router, View};
use shiftdesk::store::{DocumentStore, SqliteStore};

fn memory_db() -> DbPool {
    let pool = DbPool::in_memory().expect("in-memory database");
    init_db(&pool.conn).expect("schema");
    pool
}

fn ts(s: &str) -> Timestamp {
    Timestamp::parse(s).expect("valid timestamp")
}

fn earn(pairs: &[(&str, f64)]) -> Earnings {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

fn new_model(name: &str, username: &str) -> NewModel {
    NewModel {
        name: name.to_string(),
        username: username.to_string(),
        jornada: Jornada::Noche,
    }
}

// ---------------------------
// Platforms
// ---------------------------

#[test]
fn platform_scenario_instagram_to_tiktok() {
    let pool = memory_db();
    let store = SqliteStore::new(&pool.conn);
    let platforms = PlatformRegistry::new(&store);

    let created = platforms.create("Instagram").unwrap();
    let all = platforms.fetch_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, created.id);
    assert_eq!(all[0].name, "Instagram");

    platforms.update(&created.id, "TikTok").unwrap();
    let all = platforms.fetch_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "TikTok");

    platforms.delete(&created.id).unwrap();
    assert!(platforms.fetch_all().unwrap().is_empty());
}

#[test]
fn platform_update_touches_only_its_record() {
    let pool = memory_db();
    let store = SqliteStore::new(&pool.conn);
    let platforms = PlatformRegistry::new(&store);

    let a = platforms.create("OnlyFans").unwrap();
    let b = platforms.create("Chaturbate").unwrap();
    assert_ne!(a.id, b.id);

    platforms.update(&a.id, "Fansly").unwrap();

    assert_eq!(platforms.get(&a.id).unwrap().unwrap().name, "Fansly");
    assert_eq!(platforms.get(&b.id).unwrap().unwrap().name, "Chaturbate");
}

#[test]
fn platform_missing_id_is_not_found() {
    let pool = memory_db();
    let store = SqliteStore::new(&pool.conn);
    let platforms = PlatformRegistry::new(&store);

    assert!(platforms.get("nope").unwrap().is_none());
    assert!(matches!(
        platforms.update("nope", "X"),
        Err(AppError::NotFound { .. })
    ));
    assert!(matches!(
        platforms.delete("nope"),
        Err(AppError::NotFound { .. })
    ));
}

#[test]
fn store_update_merges_fields() {
    let pool = memory_db();
    let store = SqliteStore::new(&pool.conn);

    let id = store
        .add("notes", &serde_json::json!({ "a": 1, "b": "x" }))
        .unwrap();

    let mut fields = serde_json::Map::new();
    fields.insert("b".into(), "y".into());
    store.update("notes", &id, &fields).unwrap();

    let doc = store.get("notes", &id).unwrap().unwrap();
    assert_eq!(doc.data, serde_json::json!({ "a": 1, "b": "y" }));
    assert_eq!(store.count("notes").unwrap(), 1);
    assert_eq!(store.count("other").unwrap(), 0);
}

// ---------------------------
// Router and gate
// ---------------------------

#[test]
fn router_prefers_static_segments() {
    let router = Router::default();

    let create = router.resolve("/modelos/create").unwrap();
    assert_eq!(create.view, View::ModelCreate);
    assert!(create.params.is_empty());

    let detail = router.resolve("/modelos/7").unwrap();
    assert_eq!(detail.view, View::ModelDetail);
    assert_eq!(detail.param("id"), Some("7"));

    let edit = router.resolve("/modelos/edit/7").unwrap();
    assert_eq!(edit.view, View::ModelEdit);
    assert_eq!(edit.param("id"), Some("7"));
}

#[test]
fn router_ignores_trailing_slash_and_query() {
    let router = Router::default();

    let m = router.resolve("/modelos/").unwrap();
    assert_eq!(m.view, View::Dashboard);
    assert_eq!(m.path, "/modelos");

    let m = router.resolve("/turnos/abc?tab=ganancias#top").unwrap();
    assert_eq!(m.view, View::ShiftDetail);
    assert_eq!(m.param("id"), Some("abc"));

    assert_eq!(router.resolve("/").unwrap().view, View::Home);
}

#[test]
fn router_unknown_path_fails() {
    let router = Router::default();
    assert!(matches!(
        router.resolve("/nowhere"),
        Err(AppError::RouteNotFound(_))
    ));
    assert!(matches!(
        router.resolve("/modelos/1/extra/x"),
        Err(AppError::RouteNotFound(_))
    ));
}

fn concrete(pattern: &str) -> String {
    pattern.replace(":id", "1")
}

#[test]
fn gate_redirects_only_protected_routes_when_signed_out() {
    let router = Router::default();
    let session = SessionObserver::with_user(None);
    let gate = AuthGate::new(&router, &session);

    for r in ROUTES {
        let path = concrete(r.path);
        match gate.navigate(&path).unwrap() {
            Navigation::Redirect { from, to } => {
                assert!(r.requires_auth, "{path} should not redirect");
                assert_eq!(from, path);
                assert_eq!(to, LOGIN_PATH);
            }
            Navigation::Proceed(m) => {
                assert!(!r.requires_auth, "{path} should redirect");
                assert_eq!(m.pattern, r.path);
            }
        }
    }
}

#[test]
fn gate_lets_everything_through_when_signed_in() {
    let pool = memory_db();
    let auth = LocalAuth::new(&pool.conn).with_iterations(1_000);
    auth.sign_up("admin@sdmarketing.test", "s3cret-pass").unwrap();

    let router = Router::default();
    let session = SessionObserver::attach(&auth).unwrap();
    let gate = AuthGate::new(&router, &session);

    for r in ROUTES {
        let path = concrete(r.path);
        assert!(
            matches!(gate.navigate(&path).unwrap(), Navigation::Proceed(_)),
            "{path} should proceed"
        );
    }
}

// ---------------------------
// Auth
// ---------------------------

#[test]
fn session_observer_follows_sign_in_and_out() {
    let pool = memory_db();
    let auth = LocalAuth::new(&pool.conn).with_iterations(1_000);

    let mut session = SessionObserver::attach(&auth).unwrap();
    assert!(!session.is_authenticated());

    let user = session
        .sign_up(&auth, "Admin@SDMarketing.test ", "s3cret-pass")
        .unwrap();
    assert_eq!(user.email, "admin@sdmarketing.test");
    assert!(session.is_authenticated());

    session.sign_out(&auth).unwrap();
    assert!(!session.is_authenticated());
    assert!(auth.current_user().unwrap().is_none());

    session
        .sign_in(&auth, "admin@sdmarketing.test", "s3cret-pass")
        .unwrap();
    assert_eq!(
        auth.current_user().unwrap().map(|u| u.email),
        Some("admin@sdmarketing.test".to_string())
    );

    // A new observer picks up the persisted session.
    let reattached = SessionObserver::attach(&auth).unwrap();
    assert!(reattached.is_authenticated());
}

#[test]
fn auth_rejects_bad_input() {
    let pool = memory_db();
    let auth = LocalAuth::new(&pool.conn).with_iterations(1_000);

    assert!(matches!(
        auth.sign_up("not-an-email", "s3cret-pass"),
        Err(AppError::InvalidEmail(_))
    ));
    assert!(matches!(
        auth.sign_up("a@b.test", "123"),
        Err(AppError::WeakPassword(_))
    ));

    auth.sign_up("a@b.test", "s3cret-pass").unwrap();
    assert!(matches!(
        auth.sign_up("A@B.test", "another-pass"),
        Err(AppError::UserExists(_))
    ));

    assert!(matches!(
        auth.sign_in("a@b.test", "wrong-pass"),
        Err(AppError::InvalidCredentials)
    ));
    assert!(matches!(
        auth.sign_in("ghost@b.test", "s3cret-pass"),
        Err(AppError::InvalidCredentials)
    ));
    assert!(auth.sign_in("a@b.test", "s3cret-pass").is_ok());
}

// ---------------------------
// Models and shifts
// ---------------------------

#[test]
fn model_ids_are_sequential() {
    let pool = memory_db();
    let store = SqliteStore::new(&pool.conn);
    let models = ModelRegistry::new(&store);

    let a = models.create(new_model("Camila", "Camila1234")).unwrap();
    let b = models.create(new_model("Ana", "Ana1234")).unwrap();
    assert_eq!((a.id, b.id), (1, 2));

    models.delete(b.id).unwrap();
    let c = models.create(new_model("Sofía", "Sofia99")).unwrap();
    assert_eq!(c.id, 3);

    let found = models.find_all_by_username("Camila1234").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, 1);
    assert_eq!(found[0].jornada, Jornada::Noche);
    assert!(models.find_all_by_username("nobody").unwrap().is_empty());
}

#[test]
fn deleted_model_id_is_never_reused() {
    let pool = memory_db();
    let store = SqliteStore::new(&pool.conn);
    let models = ModelRegistry::new(&store);
    let ledger = ShiftLedger::new(&store);

    let ana = models.create(new_model("Ana", "Ana1234")).unwrap();
    ledger
        .record(
            ana.id,
            ts("2025-03-01 18:00"),
            ts("2025-03-01 22:00"),
            earn(&[("instagram", 80.0)]),
        )
        .unwrap();
    models.delete(ana.id).unwrap();

    let bea = models.create(new_model("Bea", "Bea1234")).unwrap();
    assert_ne!(bea.id, ana.id);
    assert!(ledger.fetch_for_model(bea.id).unwrap().is_empty());
    assert!(models.get(bea.id).unwrap().earnings.is_empty());

    // the counter survives a fresh registry over the same store
    let again = ModelRegistry::new(&store)
        .create(new_model("Cata", "Cata1234"))
        .unwrap();
    assert_eq!(again.id, bea.id + 1);
}

#[test]
fn shift_lifecycle_updates_the_model() {
    let pool = memory_db();
    let store = SqliteStore::new(&pool.conn);
    let models = ModelRegistry::new(&store);
    let ledger = ShiftLedger::new(&store);

    let model = models.create(new_model("Camila", "Camila1234")).unwrap();

    let open = ledger.start(model.id, ts("2025-03-01 18:00")).unwrap();
    assert!(open.is_open());
    assert_eq!(open.start, open.end);
    assert_eq!(models.get(model.id).unwrap().shifts, vec![open.id.clone()]);

    let closed = ledger
        .finish(
            &open.id,
            ts("2025-03-01 22:00"),
            earn(&[("instagram", 100.0), ("tiktok", 60.0)]),
        )
        .unwrap();
    assert!(closed.finished);
    assert_eq!(closed.total(), 160.0);
    assert_eq!(closed.hourly_rate(), Some(40.0));

    let stored = models.get(model.id).unwrap();
    assert_eq!(stored.earnings.len(), 2);
    assert_eq!(stored.total_earnings(), 160.0);

    assert!(matches!(
        ledger.finish(&open.id, ts("2025-03-01 23:00"), Earnings::new()),
        Err(AppError::ShiftFinished(_))
    ));

    ledger.delete(&open.id).unwrap();
    let stored = models.get(model.id).unwrap();
    assert!(stored.shifts.is_empty());
    assert!(stored.earnings.is_empty());
}

#[test]
fn finish_rejects_end_before_start() {
    let pool = memory_db();
    let store = SqliteStore::new(&pool.conn);
    let models = ModelRegistry::new(&store);
    let ledger = ShiftLedger::new(&store);

    let model = models.create(new_model("Ana", "Ana1234")).unwrap();
    let open = ledger.start(model.id, ts("2025-03-01 18:00")).unwrap();

    assert!(matches!(
        ledger.finish(&open.id, ts("2025-03-01 17:00"), Earnings::new()),
        Err(AppError::InvalidShiftRange { .. })
    ));
    assert!(ledger.get(&open.id).unwrap().is_open());
}

#[test]
fn finish_by_username_closes_latest_open_shift() {
    let pool = memory_db();
    let store = SqliteStore::new(&pool.conn);
    let models = ModelRegistry::new(&store);
    let ledger = ShiftLedger::new(&store);

    let model = models.create(new_model("Ana", "Ana1234")).unwrap();

    assert!(matches!(
        ledger.finish_for_username("Ana1234", ts("2025-03-01 10:00"), Earnings::new()),
        Err(AppError::NoOpenShift(_))
    ));
    assert!(matches!(
        ledger.finish_for_username("ghost", ts("2025-03-01 10:00"), Earnings::new()),
        Err(AppError::NotFound { .. })
    ));

    let older = ledger.start(model.id, ts("2025-03-01 08:00")).unwrap();
    let newer = ledger.start(model.id, ts("2025-03-02 08:00")).unwrap();

    let closed = ledger
        .finish_for_username("Ana1234", ts("2025-03-02 12:00"), earn(&[("instagram", 40.0)]))
        .unwrap();
    assert_eq!(closed.id, newer.id);
    assert!(ledger.get(&older.id).unwrap().is_open());

    let open = ledger.open_shifts().unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].id, older.id);
}

#[test]
fn finish_by_username_searches_every_model_with_that_username() {
    let pool = memory_db();
    let store = SqliteStore::new(&pool.conn);
    let models = ModelRegistry::new(&store);
    let ledger = ShiftLedger::new(&store);

    let first = models.create(new_model("Camila", "Camila1234")).unwrap();
    let second = models.create(new_model("Camila R.", "Camila1234")).unwrap();

    let open = ledger.start(second.id, ts("2025-03-01 08:00")).unwrap();

    let closed = ledger
        .finish_for_username("Camila1234", ts("2025-03-01 12:00"), earn(&[("tiktok", 30.0)]))
        .unwrap();
    assert_eq!(closed.id, open.id);
    assert_eq!(models.get(second.id).unwrap().total_earnings(), 30.0);
    assert!(models.get(first.id).unwrap().earnings.is_empty());

    // with open shifts on both, the latest start wins
    let older = ledger.start(second.id, ts("2025-03-02 08:00")).unwrap();
    let newer = ledger.start(first.id, ts("2025-03-02 09:00")).unwrap();

    let closed = ledger
        .finish_for_username("Camila1234", ts("2025-03-02 12:00"), Earnings::new())
        .unwrap();
    assert_eq!(closed.id, newer.id);
    assert!(ledger.get(&older.id).unwrap().is_open());
}

#[test]
fn update_open_shift_keeps_end_with_start() {
    let pool = memory_db();
    let store = SqliteStore::new(&pool.conn);
    let models = ModelRegistry::new(&store);
    let ledger = ShiftLedger::new(&store);

    let model = models.create(new_model("Ana", "Ana1234")).unwrap();
    let open = ledger.start(model.id, ts("2025-03-01 08:00")).unwrap();

    let moved = ledger
        .update(
            &open.id,
            ShiftPatch {
                start: Some(ts("2025-03-01 09:00")),
                ..ShiftPatch::default()
            },
        )
        .unwrap();
    assert_eq!(moved.start, ts("2025-03-01 09:00"));
    assert_eq!(moved.end, moved.start);
}

#[test]
fn recorded_shift_earnings_can_be_corrected() {
    let pool = memory_db();
    let store = SqliteStore::new(&pool.conn);
    let models = ModelRegistry::new(&store);
    let ledger = ShiftLedger::new(&store);

    let model = models.create(new_model("Camila", "Camila1234")).unwrap();
    let shift = ledger
        .record(
            model.id,
            ts("2025-03-01 18:00"),
            ts("2025-03-02 02:00"),
            earn(&[("instagram", 100.0)]),
        )
        .unwrap();

    ledger
        .update(
            &shift.id,
            ShiftPatch {
                earnings: earn(&[("instagram", 150.0), ("tiktok", 10.0)]),
                ..ShiftPatch::default()
            },
        )
        .unwrap();

    let stored = models.get(model.id).unwrap();
    assert_eq!(stored.total_earnings(), 160.0);
    assert_eq!(ledger.fetch_for_model(model.id).unwrap().len(), 1);
}

// ---------------------------
// Earnings arithmetic and parsing
// ---------------------------

fn finished(start: &str, end: &str, pairs: &[(&str, f64)]) -> Shift {
    Shift {
        id: String::new(),
        finished: true,
        start: ts(start),
        end: ts(end),
        earnings: earn(pairs),
        model: "1".to_string(),
    }
}

#[test]
fn earnings_by_platform_and_window() {
    let shifts = vec![
        finished("2025-05-01 09:00", "2025-05-01 17:00", &[("instagram", 100.0)]),
        finished(
            "2025-05-02 09:00",
            "2025-05-02 13:00",
            &[("instagram", 50.0), ("tiktok", 20.0)],
        ),
        finished("2025-06-01 09:00", "2025-06-01 17:00", &[("tiktok", 70.0)]),
    ];

    let may = earnings::within(&shifts, Some(ts("2025-05-01 00:00")), Some(ts("2025-05-31 23:59")));
    assert_eq!(may.len(), 2);
    assert_eq!(earnings::total(may.iter().copied()), 170.0);
    assert_eq!(earnings::worked_minutes(may.iter().copied()), 12 * 60);

    let totals = earnings::by_platform(&shifts);
    assert_eq!(totals.get("instagram"), Some(&150.0));
    assert_eq!(totals.get("tiktok"), Some(&90.0));

    assert_eq!(earnings::within(&shifts, None, None).len(), 3);
}

#[test]
fn zero_length_shift_has_no_rate() {
    let s = finished("2025-05-01 09:00", "2025-05-01 09:00", &[("instagram", 10.0)]);
    assert_eq!(s.hourly_rate(), None);
}

#[test]
fn parse_earnings_sums_and_rejects() {
    let args: Vec<String> = ["instagram=10.5", "tiktok = 4", "instagram=0.5"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let parsed = parse_earnings(&args).unwrap();
    assert_eq!(parsed.get("instagram"), Some(&11.0));
    assert_eq!(parsed.get("tiktok"), Some(&4.0));

    for bad in ["instagram", "=5", "instagram=abc", "instagram=-1", "instagram=inf"] {
        assert!(
            matches!(
                parse_earnings(&[bad.to_string()]),
                Err(AppError::InvalidEarnings(_))
            ),
            "{bad} should be rejected"
        );
    }
}

#[test]
fn timestamp_parse_and_format() {
    let t = ts("2025-03-01 18:30");
    assert_eq!(t.format("%Y-%m-%d %H:%M"), "2025-03-01 18:30");
    assert_eq!(ts("2025-03-01T18:30"), t);
    assert_eq!(t.until(&ts("2025-03-01 20:00")).num_minutes(), 90);

    assert!(matches!(
        Timestamp::parse("yesterday"),
        Err(AppError::InvalidTimestamp(_))
    ));
    assert!(Timestamp::parse_optional(None).unwrap().is_none());
}

#[test]
fn jornada_codes() {
    assert_eq!(Jornada::from_code("mañana").unwrap(), Jornada::Manana);
    assert_eq!(Jornada::from_code("T").unwrap(), Jornada::Tarde);
    assert_eq!(Jornada::from_code("night").unwrap(), Jornada::Noche);
    assert!(Jornada::from_code("siesta").is_err());
    assert_eq!(
        serde_json::to_value(Jornada::Manana).unwrap(),
        serde_json::json!("Mañana")
    );
}
