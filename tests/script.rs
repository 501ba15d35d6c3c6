use std::io::Write;

use memquery::{QueryProcessor, QueryResult, error::Result};

#[test]
fn run_file_executes_every_statement() -> Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(
        file,
        "CREATE TABLE notes (id, body);\n\
         INSERT INTO notes (id, body) VALUES (1, 'a; b'), (2, 'c');\n\
         SELECT body FROM notes WHERE id = 1;\n\
         DELETE FROM notes WHERE id = 2;"
    )?;

    let mut processor = QueryProcessor::new();
    let results = processor.run_file(file.path())?;
    assert_eq!(results.len(), 4);
    assert_eq!(results[1], QueryResult::Message("Inserted 2 rows into notes".into()));
    assert_eq!(results[2].to_json()?, r#"{"data":[{"body":"a; b"}]}"#);
    assert_eq!(results[3], QueryResult::Message("Deleted 1 rows".into()));
    assert_eq!(processor.table_names(), vec!["notes"]);
    Ok(())
}

#[test]
fn run_file_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut processor = QueryProcessor::new();
    assert!(processor.run_file(dir.path().join("missing.sql")).is_err());
}
