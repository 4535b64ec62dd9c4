use inklog::config::Indent;
use inklog::printer::highlight::{KEY, RESET, STRING};
use inklog::sink::{Capture, SinkSpec};
use inklog::value::Record;
use inklog::Logger;

fn sample() -> Record {
    let inner = Record::new();
    inner.insert("text", "Nice String with \\\"some escaped\\\": characters");

    let record = Record::new();
    record.insert("array", vec![1, 2, 3]);
    record.insert("object", inner);
    record
}

#[test]
fn tab_indented_by_default() -> Result<(), Box<dyn std::error::Error>> {
    let capture = Capture::new();
    let logger = Logger::builder()
        .sink(SinkSpec::new(capture.clone()).color(false))
        .build();

    logger.info(&[&sample()])?;

    let line = &capture.lines()[0];
    assert!(line.contains("] {\n\t\"array\": [\n\t\t1,\n\t\t2,\n\t\t3\n\t],\n\t\"object\": {\n\t\t\"text\""));

    Ok(())
}

#[test]
fn keys_are_highlighted() -> Result<(), Box<dyn std::error::Error>> {
    let capture = Capture::new();
    let logger = Logger::builder()
        .sink(SinkSpec::new(capture.clone()))
        .build();

    logger.info(&[&sample()])?;

    let line = &capture.lines()[0];
    for key in &["\"array\"", "\"object\"", "\"text\""] {
        assert!(line.contains(&format!("{}{}{}:", KEY, key, RESET)), "{} not highlighted", key);
    }

    Ok(())
}

#[test]
fn escaped_content_is_not_a_key() -> Result<(), Box<dyn std::error::Error>> {
    let capture = Capture::new();
    let logger = Logger::builder()
        .sink(SinkSpec::new(capture.clone()))
        .build();

    logger.info(&[&sample()])?;

    let line = &capture.lines()[0];
    assert!(line.contains(&format!(
        "{}\"Nice String with \\\"some escaped\\\": characters\"{}",
        STRING, RESET
    )));
    assert!(!line.contains(&format!("{}\\\"some escaped", KEY)));

    Ok(())
}

#[test]
fn several_arguments_stay_on_one_line() -> Result<(), Box<dyn std::error::Error>> {
    let capture = Capture::new();
    let logger = Logger::builder()
        .sink(SinkSpec::new(capture.clone()).color(false))
        .build();

    logger.info(&[&"first", &sample(), &"last"])?;

    let line = &capture.lines()[0];
    assert_eq!(line.matches('\n').count(), 1);
    assert!(line.contains("first | {\t\"array\": [\t1,\t2,\t3\t],\t\"object\": {\t\"text\""));
    assert!(line.ends_with("} | last\n"));

    Ok(())
}

#[test]
fn single_line_when_multiline_is_off() -> Result<(), Box<dyn std::error::Error>> {
    let capture = Capture::new();
    let logger = Logger::builder()
        .multiline(false)
        .indent(Indent::Spaces(1))
        .sink(SinkSpec::new(capture.clone()).color(false))
        .build();

    let record = Record::new();
    record.insert("array", vec![1, 2]);
    logger.info(&[&record])?;

    assert!(capture.lines()[0].ends_with("] { \"array\": [ 1, 2 ] }\n"));

    Ok(())
}

#[test]
fn indented_with_three_spaces() -> Result<(), Box<dyn std::error::Error>> {
    let capture = Capture::new();
    let logger = Logger::builder()
        .indent(Indent::Spaces(3))
        .sink(SinkSpec::new(capture.clone()).color(false))
        .build();

    logger.info(&[&sample()])?;

    let line = &capture.lines()[0];
    assert!(line.contains("{\n   \"array\": [\n      1,"));
    assert!(line.contains("\n   \"object\": {\n      \"text\""));
    assert!(!line.contains('\t'));

    Ok(())
}

#[test]
fn path_ending_in_backslash_keeps_next_key() -> Result<(), Box<dyn std::error::Error>> {
    let capture = Capture::new();
    let logger = Logger::builder()
        .sink(SinkSpec::new(capture.clone()))
        .build();

    let record = Record::new();
    record.insert("dir", "C:\\temp\\");
    record.insert("next", 1);
    logger.info(&[&record])?;

    let line = &capture.lines()[0];
    assert!(line.contains(&format!("{}\"C:\\temp\\\"{},", STRING, RESET)));
    assert!(line.contains(&format!("{}\"next\"{}:", KEY, RESET)), "key 'next' not highlighted");

    Ok(())
}
