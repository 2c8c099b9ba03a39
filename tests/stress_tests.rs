//! Stress tests for concurrent logging
//!
//! These tests verify:
//! - Records from many threads never interleave inside a line
//! - Entry reuse under contention never leaks fields between callers
//! - Rotation swapping the file handle loses no records

use chrono::{Local, TimeZone};
use fieldlog::appenders::rotating_file::DailyRotation;
use fieldlog::appenders::{Appender, FileAppender};
use fieldlog::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

const THREADS: usize = 8;
const PER_THREAD: usize = 500;

#[test]
fn test_concurrent_lines_stay_whole() {
    let buffer = SharedBuffer::new();
    let logger = Logger::new([with_custom_writer(buffer.clone()), with_field_sort(true)])
        .expect("logger builds");

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = logger.clone();
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    logger
                        .with_field("thread", t)
                        .with_field("seq", i)
                        .info("concurrent record with some padding to widen the write");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("logging thread panicked");
    }

    let lines = buffer.lines();
    assert_eq!(lines.len(), THREADS * PER_THREAD);

    let mut seen = HashSet::new();
    for line in &lines {
        assert!(line.starts_with("INF "), "torn line: {}", line);
        assert!(line.ends_with(r#"msg="concurrent record with some padding to widen the write""#));
        // seq and thread identify a record
        seen.insert(line.split_once(" seq=").map(|(_, id)| id.to_string()));
    }
    assert_eq!(seen.len(), THREADS * PER_THREAD);
    assert_eq!(logger.metrics().total_logged(), (THREADS * PER_THREAD) as u64);
}

#[test]
fn test_pool_contention_does_not_leak_fields() {
    let buffer = SharedBuffer::new();
    let logger = Logger::new([with_custom_writer(buffer.clone())]).expect("logger builds");

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = logger.clone();
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    if i % 2 == 0 {
                        let entry = logger.new_entry().with_field("owner", t);
                        entry.debug("owned");
                        logger.release_entry(entry);
                    } else {
                        logger.debug("anonymous");
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("logging thread panicked");
    }

    for line in buffer.lines() {
        if line.contains("anonymous") {
            assert!(!line.contains("owner"), "leaked field: {}", line);
        }
    }
}

#[test]
fn test_rotation_under_load_loses_nothing() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("busy.log");
    let file = Arc::new(FileAppender::new(&path).expect("Failed to create appender"));
    let rotation = DailyRotation::with_last_rotation(
        Arc::clone(&file),
        Arc::new(LoggerMetrics::new()),
        Local.with_ymd_and_hms(2020, 7, 30, 12, 0, 0).unwrap(),
    );

    let writers: Vec<_> = (0..4)
        .map(|t| {
            let file = Arc::clone(&file);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    file.append(format!("writer {} record {}\n", t, i).as_bytes())
                        .expect("append failed");
                }
            })
        })
        .collect();

    rotation
        .rotate_now(Local.with_ymd_and_hms(2020, 7, 31, 12, 0, 0).unwrap())
        .expect("rotation failed");

    for writer in writers {
        writer.join().expect("writer panicked");
    }

    let rotated = fs::read_to_string(temp_dir.path().join("busy.log-20200730")).unwrap();
    let active = fs::read_to_string(&path).unwrap();
    let total = rotated.lines().count() + active.lines().count();

    assert_eq!(total, 4 * PER_THREAD);
    for line in rotated.lines().chain(active.lines()) {
        assert!(line.starts_with("writer "), "torn line: {}", line);
    }
}
