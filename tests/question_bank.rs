use std::fs;

use quiz_mania::storage::question_bank;

#[test]
fn bundled_bank_is_playable() {
    let fetched = question_bank::fetch("QuestionsData.xml").unwrap();

    assert!(fetched.found);
    assert_eq!(fetched.questions.len(), 3);
    for question in &fetched.questions.questions {
        assert!(!question.correct_answers().is_empty(), "{}", question.text);
    }
}

#[test]
fn bundled_bank_survives_a_rewrite() {
    let original = question_bank::fetch("QuestionsData.xml").unwrap().questions;
    let path = std::env::temp_dir().join(format!("{}.xml", uuid::Uuid::new_v4()));

    question_bank::write(&path, &original).unwrap();
    let reread = question_bank::fetch(&path).unwrap().questions;
    fs::remove_file(&path).unwrap();

    assert_eq!(reread, original);
}
