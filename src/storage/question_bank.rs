use std::{fs, io::Write, path::Path};

use log::{info, warn};
use quick_xml::{
    events::{BytesDecl, BytesText, Event},
    Writer,
};
use serde::Deserialize;

use crate::{
    error::Result,
    models::question::{Answer, Question, QuestionSet},
};

pub const QUESTION_BANK_FILE: &str = "QuestionsData.xml";

#[derive(Deserialize, Default)]
#[serde(rename = "Data")]
struct Document {
    #[serde(default)]
    questions: QuestionList,
}

#[derive(Deserialize, Default)]
struct QuestionList {
    #[serde(rename = "Question", default)]
    items: Vec<Question>,
}

/// Result of reading the bank. `found` is false when no file existed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    pub questions: QuestionSet,
    pub found: bool,
}

fn is_xml_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Escapes `text` for element content. The reader trims raw whitespace at
/// both ends of a text node, so boundary whitespace goes out as character
/// references, which it leaves alone.
fn escape_text(text: &str) -> String {
    let start = text.len() - text.trim_start_matches(is_xml_whitespace).len();
    let end = start + text.trim_matches(is_xml_whitespace).len();
    let reference = |c: char| format!("&#{};", c as u32);

    let mut escaped: String = text[..start].chars().map(reference).collect();
    escaped.push_str(&quick_xml::escape::escape(&text[start..end]));
    escaped.extend(text[end..].chars().map(reference));
    escaped
}

fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    escaped: &str,
) -> quick_xml::Result<()> {
    writer
        .create_element(name)
        .write_text_content(BytesText::from_escaped(escaped))?;
    Ok(())
}

fn write_answer<W: Write>(writer: &mut Writer<W>, answer: &Answer) -> quick_xml::Result<()> {
    writer
        .create_element("Answer")
        .write_inner_content(|writer| {
            write_text_element(writer, "info", &escape_text(&answer.text))?;
            write_text_element(writer, "isCorrect", &answer.is_correct.to_string())
        })?;
    Ok(())
}

fn write_question<W: Write>(writer: &mut Writer<W>, question: &Question) -> quick_xml::Result<()> {
    writer
        .create_element("Question")
        .write_inner_content(|writer| {
            write_text_element(writer, "info", &escape_text(&question.text))?;
            writer
                .create_element("answers")
                .write_inner_content(|writer| {
                    for answer in question.answers() {
                        write_answer(writer, answer)?;
                    }
                    Ok::<(), quick_xml::Error>(())
                })?;
            write_text_element(writer, "useTimer", &question.uses_timer.to_string())?;
            write_text_element(writer, "answerType", &String::from(question.answer_mode))?;
            write_text_element(writer, "timer", &question.timer_seconds.to_string())?;
            write_text_element(writer, "addScore", &question.score_value.to_string())
        })?;
    Ok(())
}

pub fn to_xml(set: &QuestionSet) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer
        .create_element("Data")
        .write_inner_content(|writer| {
            writer
                .create_element("questions")
                .write_inner_content(|writer| {
                    for question in &set.questions {
                        write_question(writer, question)?;
                    }
                    Ok::<(), quick_xml::Error>(())
                })?;
            Ok::<(), quick_xml::Error>(())
        })?;
    Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}

pub fn from_xml(xml: &str) -> Result<QuestionSet> {
    let document: Document = quick_xml::de::from_str(xml)?;
    Ok(QuestionSet::new(document.questions.items))
}

pub fn write<P: AsRef<Path>>(path: P, set: &QuestionSet) -> Result<()> {
    let xml = to_xml(set)?;
    fs::write(path.as_ref(), xml)?;
    info!(
        "Question bank with {} questions written to: {}",
        set.len(),
        path.as_ref().display()
    );
    Ok(())
}

/// Reads the bank at `path`. A missing file is not an error: it yields an
/// empty set and the caller decides whether a session may start.
pub fn fetch<P: AsRef<Path>>(path: P) -> Result<Fetched> {
    let path = path.as_ref();
    if !path.exists() {
        warn!("No question bank at: {}", path.display());
        return Ok(Fetched {
            questions: QuestionSet::default(),
            found: false,
        });
    }

    let xml = fs::read_to_string(path)?;
    let questions = from_xml(&xml)?;
    info!(
        "Loaded {} questions from: {}",
        questions.len(),
        path.display()
    );
    Ok(Fetched {
        questions,
        found: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::test_set;

    #[test]
    fn parses_hand_written_document() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<Data>
  <questions>
    <Question>
      <info>Capital of France?</info>
      <answers>
        <Answer><info>Paris</info><isCorrect>true</isCorrect></Answer>
        <Answer><info>Lyon</info><isCorrect>false</isCorrect></Answer>
      </answers>
      <useTimer>true</useTimer>
      <answerType>Single</answerType>
      <timer>15</timer>
      <addScore>5</addScore>
    </Question>
  </questions>
</Data>"#;

        let set = from_xml(xml).unwrap();
        assert_eq!(set.len(), 1);
        let question = &set.questions[0];
        assert_eq!(question.text, "Capital of France?");
        assert_eq!(question.answers().len(), 2);
        assert!(question.answers()[0].is_correct);
        assert!(question.uses_timer);
        assert_eq!(question.timer_seconds, 15);
        assert_eq!(question.score_value, 5);
    }

    #[test]
    fn written_bank_reads_back_identically() {
        let path = std::env::temp_dir().join(format!("{}.xml", uuid::Uuid::new_v4()));
        let set = test_set();

        write(&path, &set).unwrap();
        let fetched = fetch(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert!(fetched.found);
        assert_eq!(fetched.questions, set);
    }

    #[test]
    fn padded_text_survives_a_round_trip() {
        let mut set = test_set();
        set.questions[0].text = "  padded question  ".to_string();
        set.questions[0].answers.items[0].text = " 2 ".to_string();
        set.questions[1].text = "\tTabs <&> and \"quotes\"\n".to_string();
        set.questions[1].answers.items[1].text = "   ".to_string();
        set.questions[1].answers.items[2].text = String::new();

        let xml = to_xml(&set).unwrap();
        assert!(xml.contains("<info>&#32;&#32;padded question&#32;&#32;</info>"));

        assert_eq!(from_xml(&xml).unwrap(), set);
    }

    #[test]
    fn missing_file_is_an_empty_set() {
        let path = std::env::temp_dir().join(format!("{}.xml", uuid::Uuid::new_v4()));
        let fetched = fetch(&path).unwrap();
        assert!(!fetched.found);
        assert!(fetched.questions.is_empty());
    }

    #[test]
    fn unknown_answer_type_is_rejected() {
        let xml = "<Data><questions><Question><info>Q</info><answers/>\
                   <useTimer>false</useTimer><answerType>Many</answerType>\
                   <timer>0</timer><addScore>1</addScore></Question></questions></Data>";
        assert!(from_xml(xml).is_err());
    }
}
