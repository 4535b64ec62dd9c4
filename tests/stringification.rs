use inklog::printer::CIRCULAR;
use inklog::sink::{Capture, SinkSpec};
use inklog::value::{Callable, Record, Sequence, Value};
use inklog::Logger;

fn plain_logger() -> (Logger, Capture) {
    let capture = Capture::new();
    let logger = Logger::builder()
        .log_line(false)
        .sink(SinkSpec::new(capture.clone()).color(false))
        .build();
    (logger, capture)
}

fn payload(line: &str) -> &str {
    let start = line.find("] ").map_or(0, |i| i + 2);
    line[start..].trim_end_matches('\n')
}

#[test]
fn complex_object() -> Result<(), Box<dyn std::error::Error>> {
    let (logger, capture) = plain_logger();

    let record = Record::new();
    record.insert("undef", ());
    record.insert("nothing", Value::Null);
    record.insert("number", 42);
    record.insert("float", 3.14159);
    record.insert("bool", true);
    record.insert("array", vec![Value::from(1), Value::from("two")]);
    record.insert("fun", Callable::new("fun2"));
    record.insert("symbol", Value::Symbol("tag".to_owned()));
    record.insert("big", Value::BigInt(9007199254740993));
    record.insert("class", Callable::new("Service"));
    record.insert("funny", record.clone());

    logger.debug(&[&record])?;
    record.clear();

    let expected = "{\n\
                    \t\"undef\": undefined,\n\
                    \t\"nothing\": null,\n\
                    \t\"number\": 42,\n\
                    \t\"float\": 3.142,\n\
                    \t\"bool\": true,\n\
                    \t\"array\": [\n\
                    \t\t1,\n\
                    \t\t\"two\"\n\
                    \t],\n\
                    \t\"fun\": [Function fun2],\n\
                    \t\"symbol\": Symbol(tag),\n\
                    \t\"big\": 9007199254740993,\n\
                    \t\"class\": [Class Service],\n\
                    \t\"funny\": [circular reference]\n\
                    }";
    assert_eq!(payload(&capture.lines()[0]), expected);

    Ok(())
}

#[test]
fn top_level_primitives() -> Result<(), Box<dyn std::error::Error>> {
    let (logger, capture) = plain_logger();

    logger.info(&[&"unquoted text"])?;
    logger.info(&[&()])?;
    logger.info(&[&None::<i32>])?;
    logger.info(&[&Some(7u64)])?;
    logger.info(&[&i128::MIN])?;
    logger.info(&[&f64::INFINITY])?;
    logger.info(&[&'x'])?;

    let payloads = capture
        .lines()
        .iter()
        .map(|line| payload(line).to_owned())
        .collect::<Vec<_>>();
    assert_eq!(
        payloads,
        vec![
            "unquoted text",
            "undefined",
            "null",
            "7",
            "-170141183460469231731687303715884105728",
            "Infinity",
            "x",
        ]
    );

    Ok(())
}

#[test]
fn empty_containers() -> Result<(), Box<dyn std::error::Error>> {
    let (logger, capture) = plain_logger();

    logger.info(&[&Sequence::new(), &Record::new(), &Record::typed("Unit")])?;
    assert_eq!(payload(&capture.lines()[0]), "[ ] | { } | Unit\t{ }");

    Ok(())
}

#[test]
fn reconverging_graph() -> Result<(), Box<dyn std::error::Error>> {
    let (logger, capture) = plain_logger();

    // A -> {B, C}, B -> D, C -> E, D -> C, E -> B
    let nodes: Vec<Record> = (0..5).map(|_| Record::new()).collect();
    let (a, b, c, d, e) = (&nodes[0], &nodes[1], &nodes[2], &nodes[3], &nodes[4]);
    a.insert("b", b.clone());
    a.insert("c", c.clone());
    b.insert("d", d.clone());
    c.insert("e", e.clone());
    d.insert("c", c.clone());
    e.insert("b", b.clone());

    logger.info(&[a])?;
    for node in &nodes {
        node.clear();
    }

    let line = &capture.lines()[0];
    assert_eq!(line.matches(CIRCULAR).count(), 2);

    Ok(())
}

#[test]
fn shared_but_acyclic_values_are_printed_in_full() -> Result<(), Box<dyn std::error::Error>> {
    let (logger, capture) = plain_logger();

    let shared: Sequence = vec![1, 2].into_iter().collect();
    let record = Record::new();
    record.insert("left", shared.clone());
    record.insert("right", shared);

    logger.info(&[&record])?;

    let line = &capture.lines()[0];
    assert_eq!(line.matches(CIRCULAR).count(), 0);
    assert_eq!(line.matches("\t\t2\n").count(), 2);

    Ok(())
}

#[test]
fn unclassifiable_value_fails_only_that_call() -> Result<(), Box<dyn std::error::Error>> {
    let (logger, capture) = plain_logger();

    let result = logger.info(&[&"before", &u128::MAX]);
    match result {
        Err(inklog::Error::Unclassifiable(err)) => assert!(!err.reason().is_empty()),
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(capture.lines().is_empty());

    logger.info(&[&u128::from(u64::MAX)])?;
    assert_eq!(payload(&capture.lines()[0]), "18446744073709551615");

    Ok(())
}
