use inklog::sink::{Capture, SinkSpec};
use inklog::value::Serde;
use inklog::Logger;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize)]
struct Endpoint {
    host: &'static str,
    port: u16,
    tls: bool,
}

#[derive(Serialize)]
enum Event {
    Started,
    Moved { x: i32, y: i32 },
    Failed(String),
}

fn plain_logger() -> (Logger, Capture) {
    let capture = Capture::new();
    let logger = Logger::builder()
        .log_line(false)
        .multiline(false)
        .sink(SinkSpec::new(capture.clone()).color(false))
        .build();
    (logger, capture)
}

#[test]
fn structs_are_typed_records() -> Result<(), Box<dyn std::error::Error>> {
    let (logger, capture) = plain_logger();

    let endpoint = Endpoint {
        host: "localhost",
        port: 8080,
        tls: false,
    };
    logger.info(&[&Serde(&endpoint)])?;

    assert!(capture.lines()[0]
        .ends_with("[info] Endpoint\t{\t\"host\": \"localhost\",\t\"port\": 8080,\t\"tls\": false\t}\n"));

    Ok(())
}

#[test]
fn enum_variants() -> Result<(), Box<dyn std::error::Error>> {
    let (logger, capture) = plain_logger();

    logger.info(&[
        &Serde(Event::Started),
        &Serde(Event::Moved { x: 1, y: -1 }),
        &Serde(Event::Failed("disk full".to_owned())),
    ])?;

    assert!(capture.lines()[0].ends_with(
        "[info] Started | Moved\t{\t\"x\": 1,\t\"y\": -1\t} | {\t\"Failed\": \"disk full\"\t}\n"
    ));

    Ok(())
}

#[test]
fn non_string_keys_are_unclassifiable() {
    let (logger, capture) = plain_logger();

    let mut by_point = BTreeMap::new();
    by_point.insert((1, 2), "a");

    let result = logger.warn(&[&Serde(&by_point)]);
    assert!(matches!(result, Err(inklog::Error::Unclassifiable(_))));
    assert!(capture.lines().is_empty());
}

#[test]
fn integer_keys_become_strings() -> Result<(), Box<dyn std::error::Error>> {
    let (logger, capture) = plain_logger();

    let mut codes = BTreeMap::new();
    codes.insert(404, "not found");
    logger.info(&[&Serde(&codes)])?;

    assert!(capture.lines()[0].ends_with("{\t\"404\": \"not found\"\t}\n"));

    Ok(())
}

#[test]
fn json_values() -> Result<(), Box<dyn std::error::Error>> {
    let (logger, capture) = plain_logger();

    let json: serde_json::Value = serde_json::from_str(r#"{ "id": 3, "ratio": 0.5, "tags": [] }"#)?;
    logger.info(&[&json])?;

    assert!(capture.lines()[0]
        .ends_with("{\t\"id\": 3,\t\"ratio\": 0.500,\t\"tags\": [ ]\t}\n"));

    Ok(())
}
