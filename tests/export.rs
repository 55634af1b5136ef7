use gantt_timeline::io::{from_json, to_json, write_json, DEFAULT_EXPORT_NAME};
use gantt_timeline::model::Project;

#[test]
fn written_file_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DEFAULT_EXPORT_NAME);
    let project = Project::sample();

    write_json(&project, &path).unwrap();
    let contents = std::fs::read_to_string(&path).unwrap();
    let tasks = from_json(&contents).unwrap();

    assert_eq!(tasks, project.tasks);
    assert_eq!(contents, to_json(&project).unwrap());
}

#[test]
fn import_rebounds_stale_parents() {
    let json = r#"[
        {
            "id": "6f1c1a2e-8a4b-4a57-9c55-0f4f0c1d2a10",
            "name": "Launch",
            "start": "2025-03-01",
            "end": "2025-03-02",
            "subtasks": [
                {
                    "id": "0b7b8a5c-1f2e-4c7e-8d7a-3a2b1c0d9e8f",
                    "name": "Docs",
                    "start": "2025-03-05",
                    "end": "2025-03-09"
                }
            ]
        }
    ]"#;

    let tasks = from_json(json).unwrap();

    assert_eq!(tasks.len(), 1);
    assert!(!tasks[0].collapsed);
    assert_eq!(tasks[0].start.to_string(), "2025-03-05");
    assert_eq!(tasks[0].end.to_string(), "2025-03-09");
}

#[test]
fn writing_into_a_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join(DEFAULT_EXPORT_NAME);

    assert!(write_json(&Project::sample(), &path).is_err());
}
