use predicates::str::contains;

mod common;
use common::{id_after, init_signed_in, run_ok, sd};

fn add_model(db_path: &str, name: &str, username: &str) -> String {
    let out = run_ok(
        db_path,
        &["model", "add", "--name", name, "--username", username, "--jornada", "tarde"],
    );
    id_after(&out, "created with id ")
}

#[test]
fn test_model_crud() {
    let db_path = init_signed_in("model_crud");

    let camila = add_model(&db_path, "Camila", "Camila1234");
    let ana = add_model(&db_path, "Ana", "Ana1234");
    assert_eq!(camila, "1");
    assert_eq!(ana, "2");

    let list = run_ok(&db_path, &["model", "list"]);
    assert!(list.contains("Camila1234"));
    assert!(list.contains("Ana1234"));
    assert!(list.contains("Tarde"));

    run_ok(&db_path, &["model", "edit", &ana, "--jornada", "noche", "--name", "Ana María"]);

    sd().args(["--db", &db_path, "model", "show", &ana])
        .assert()
        .success()
        .stdout(contains("Ana María"))
        .stdout(contains("Noche"));

    run_ok(&db_path, &["model", "del", &camila]);

    let list = run_ok(&db_path, &["model", "list"]);
    assert!(!list.contains("Camila1234"));
    assert!(list.contains("Ana1234"));
}

#[test]
fn test_model_platforms_are_shown_by_name() {
    let db_path = init_signed_in("model_platforms");

    let model = add_model(&db_path, "Camila", "Camila1234");
    let ig = id_after(&run_ok(&db_path, &["platform", "add", "Instagram"]), "created with id ");

    run_ok(&db_path, &["model", "edit", &model, "--add-platform", &ig]);

    sd().args(["--db", &db_path, "open", &format!("/modelos/edit/{model}")])
        .assert()
        .success()
        .stdout(contains("Platforms: Instagram"));

    run_ok(&db_path, &["model", "edit", &model, "--remove-platform", &ig]);

    let out = run_ok(&db_path, &["model", "show", &model]);
    assert!(!out.contains("Instagram"));
}

#[test]
fn test_recorded_shift_totals() {
    let db_path = init_signed_in("shift_recorded");
    let model = add_model(&db_path, "Camila", "Camila1234");

    let out = run_ok(
        &db_path,
        &[
            "shift", "add", &model,
            "--from", "2025-03-01 18:00",
            "--to", "2025-03-02 02:00",
            "--earn", "instagram=120.5",
            "--earn", "tiktok=79.5",
        ],
    );
    assert!(out.contains("total $200.00"));
    let shift = id_after(&out, "Shift ");

    sd().args(["--db", &db_path, "shift", "show", &shift])
        .assert()
        .success()
        .stdout(contains("finished"))
        .stdout(contains("2025-03-01 18:00"))
        .stdout(contains("2025-03-02 02:00"))
        .stdout(contains("08h 00m"))
        .stdout(contains("$120.50"))
        .stdout(contains("$25.00"));

    sd().args(["--db", &db_path, "model", "show", &model])
        .assert()
        .success()
        .stdout(contains("instagram"))
        .stdout(contains("$200.00"));
}

#[test]
fn test_start_then_public_finish() {
    let db_path = init_signed_in("shift_public_finish");
    let model = add_model(&db_path, "Ana", "Ana1234");

    let out = run_ok(&db_path, &["shift", "start", &model, "--at", "2025-04-10 09:00"]);
    let shift = id_after(&out, "Shift ");

    // the model closes it without an admin session
    run_ok(&db_path, &["logout"]);

    sd().args([
        "--db", &db_path, "finish",
        "--username", "Ana1234",
        "--at", "2025-04-10 13:30",
        "--earn", "instagram=90",
    ])
    .assert()
    .success()
    .stdout(contains(shift.as_str()))
    .stdout(contains("total $90.00"));

    // nothing left to close
    sd().args([
        "--db", &db_path, "finish", "--username", "Ana1234", "--at", "2025-04-10 14:00",
    ])
    .assert()
    .failure()
    .stderr(contains("No open shift for model 'Ana1234'"));
}

#[test]
fn test_shift_rules() {
    let db_path = init_signed_in("shift_rules");
    let model = add_model(&db_path, "Ana", "Ana1234");

    sd().args([
        "--db", &db_path, "shift", "add", &model,
        "--from", "2025-04-10 10:00",
        "--to", "2025-04-10 09:00",
    ])
    .assert()
    .failure()
    .stderr(contains("before its start"));

    sd().args([
        "--db", &db_path, "shift", "add", &model,
        "--from", "2025-04-10 09:00",
        "--to", "2025-04-10 10:00",
        "--earn", "instagram=-5",
    ])
    .assert()
    .failure()
    .stderr(contains("Invalid earnings entry: instagram=-5"));

    let out = run_ok(&db_path, &["shift", "start", &model, "--at", "2025-04-11 09:00"]);
    let shift = id_after(&out, "Shift ");

    run_ok(&db_path, &["shift", "close", &shift, "--at", "2025-04-11 12:00"]);

    sd().args(["--db", &db_path, "shift", "close", &shift])
        .assert()
        .failure()
        .stderr(contains("already finished"));
}

#[test]
fn test_shift_list_window() {
    let db_path = init_signed_in("shift_window");
    let model = add_model(&db_path, "Camila", "Camila1234");

    for (from, to, earn) in [
        ("2025-05-01 09:00", "2025-05-01 17:00", "instagram=100"),
        ("2025-05-02 09:00", "2025-05-02 17:00", "instagram=50"),
        ("2025-06-01 09:00", "2025-06-01 17:00", "tiktok=70"),
    ] {
        run_ok(
            &db_path,
            &["shift", "add", &model, "--from", from, "--to", to, "--earn", earn],
        );
    }

    let out = run_ok(
        &db_path,
        &[
            "shift", "list", "--model", &model,
            "--from", "2025-05-01 00:00",
            "--to", "2025-05-31 23:59",
        ],
    );
    assert!(out.contains("$150.00"));
    assert!(out.contains("16h 00m"));
    assert!(!out.contains("tiktok"));
}
