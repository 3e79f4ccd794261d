//! Transforms share no state between invocations, so one transform can be
//! used from several threads and every invocation yields the same tree.

mod fixtures;

use std::sync::Arc;
use std::thread;
use xmlgroup::{ForwardTransform, ReverseTransform, SourceParser};

#[test]
fn test_concurrent_forward_transforms() {
    let source = Arc::new(SourceParser::new().parse(fixtures::MISC_RECORD).unwrap());
    let transform = Arc::new(ForwardTransform::new());
    let expected = transform.transform(&source);

    let mut handles = vec![];

    // Spawn 10 threads that all transform the same document
    for _ in 0..10 {
        let source = source.clone();
        let transform = transform.clone();
        let handle = thread::spawn(move || transform.transform(&source));
        handles.push(handle);
    }

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_concurrent_round_trips() {
    let mut handles = vec![];

    for i in 0..5 {
        let handle = thread::spawn(move || {
            let xml = if i % 2 == 0 {
                fixtures::SENSOR_RECORD
            } else {
                fixtures::MISC_RECORD
            };
            let source = SourceParser::new().parse(xml).unwrap();
            let tree = ForwardTransform::new().transform(&source);
            assert_eq!(ReverseTransform::new().transform(&tree), source);
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }
}
