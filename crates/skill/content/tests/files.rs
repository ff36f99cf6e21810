//! Loading content from disk.

use std::io::Write;

use skill_content::{ConfigLoader, SkillLoader, SpellLoader};

fn write_temp(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn loads_skills_from_file() {
    let file = write_temp(
        r#"(skills: [
            (id: 30, name: "Lucky Find", effects: [
                (kind: itemDropMultiplier, index: 0, values: {multiplier: 1.1}),
            ]),
        ])"#,
    );

    let catalog = SkillLoader::load(file.path()).unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.get(30).unwrap().name, "Lucky Find");
}

#[test]
fn parse_errors_name_the_file() {
    let file = write_temp("(skills: [ (id: ) ])");
    let err = SkillLoader::load(file.path()).unwrap_err().to_string();
    assert!(err.contains("Failed to parse skill catalog RON"));
    assert!(err.contains(&file.path().display().to_string()));
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = SpellLoader::load(&dir.path().join("spells.ron")).unwrap_err();
    assert!(err.to_string().contains("Failed to read spell catalog file"));
}

#[test]
fn loads_config_from_file() {
    let file = write_temp("include_summary = false\n");
    assert!(!ConfigLoader::load(file.path()).unwrap().include_summary);

    let missing = file.path().with_extension("absent");
    let err = ConfigLoader::load(&missing).unwrap_err();
    assert!(err.to_string().contains("Failed to read engine config file"));
}
