use onoma_core::{
    Gender, ImportError, NameQuery, NameRepository, NameService, ServiceError,
    SqliteNameRepository,
};
use std::fs;

fn row_count<R: NameRepository>(service: &NameService<R>) -> usize {
    service.select_names(&NameQuery::new("")).unwrap().len()
}

#[test]
fn import_file_inserts_every_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("polish_female_given_names.txt");
    fs::write(
        &path,
        "PL;given;F;Agnieszka;;\nPL;given;F;Jadwiga;;\n\nPL;given;F;Zofia;;\n",
    )
    .unwrap();

    let mut service = NameService::new(SqliteNameRepository::open_in_memory().unwrap());
    let summary = service.import_file(&path).unwrap();

    assert_eq!(summary.imported(), 3);
    let zofia = service.select_name(summary.ids[2]).unwrap().unwrap();
    assert_eq!(zofia.alphabetic, "Zofia");
    assert_eq!(zofia.gender, Gender::Feminine);
    assert_eq!(service.supported_cultures().unwrap(), vec!["PL"]);
}

#[test]
fn byte_order_mark_does_not_leak_into_first_culture() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("with_bom.txt");
    let mut body = vec![0xEF, 0xBB, 0xBF];
    body.extend_from_slice("PL;given;F;Łucja;;\nPL;given;F;Zofia;;\n".as_bytes());
    fs::write(&path, body).unwrap();

    let mut service = NameService::new(SqliteNameRepository::open_in_memory().unwrap());
    let summary = service.import_file(&path).unwrap();

    assert_eq!(summary.imported(), 2);
    assert_eq!(service.supported_cultures().unwrap(), vec!["PL"]);
    let first = service.select_name(summary.ids[0]).unwrap().unwrap();
    assert_eq!(first.culture, "PL");
}

#[test]
fn malformed_line_aborts_import_without_inserting() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.txt");
    fs::write(&path, "PL;given;F;Agnieszka;;\nPL;given;Q;Jadwiga;;\n").unwrap();

    let mut service = NameService::new(SqliteNameRepository::open_in_memory().unwrap());
    let err = service.import_file(&path).unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Import(ImportError::InvalidValue { line: 2, .. })
    ));
    assert_eq!(row_count(&service), 0);
}

#[test]
fn store_rejection_rolls_back_whole_import() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("oversized.txt");
    let long_name = "x".repeat(80);
    fs::write(
        &path,
        format!("PL;given;F;Agnieszka;;\nPL;given;F;{long_name};;\n"),
    )
    .unwrap();

    let mut service = NameService::new(SqliteNameRepository::open_in_memory().unwrap());
    let err = service.import_file(&path).unwrap_err();

    assert!(matches!(err, ServiceError::Repo(_)));
    assert_eq!(row_count(&service), 0);
}

#[test]
fn missing_file_reports_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.txt");

    let mut service = NameService::new(SqliteNameRepository::open_in_memory().unwrap());
    let err = service.import_file(&path).unwrap_err();

    match err {
        ServiceError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other}"),
    }
}
