//! Test fixtures: writes small `accident_<year>.csv.bz2` files.

use crate::data::filename::make_filename;
use bzip2::write::BzEncoder;
use bzip2::Compression;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy)]
pub struct AccidentRow {
    pub month: i64,
    pub state: i64,
    pub longitude: f64,
    pub latitude: f64,
}

impl AccidentRow {
    pub fn new(month: i64, state: i64, longitude: f64, latitude: f64) -> Self {
        Self {
            month,
            state,
            longitude,
            latitude,
        }
    }
}

/// Write a year file with the usual FARS columns plus a pass-through `ST_CASE`.
pub fn write_year(dir: &Path, year: i32, rows: &[AccidentRow]) -> PathBuf {
    let mut csv = String::from("STATE,ST_CASE,MONTH,LONGITUD,LATITUDE\n");
    for (i, row) in rows.iter().enumerate() {
        csv.push_str(&format!(
            "{},{},{},{:?},{:?}\n",
            row.state,
            10001 + i,
            row.month,
            row.longitude,
            row.latitude
        ));
    }
    write_raw(dir, year, &csv)
}

/// Compress arbitrary CSV text into the year's file.
pub fn write_raw(dir: &Path, year: i32, csv: &str) -> PathBuf {
    let path = dir.join(make_filename(year));
    let file = File::create(&path).unwrap();
    let mut encoder = BzEncoder::new(file, Compression::default());
    encoder.write_all(csv.as_bytes()).unwrap();
    encoder.finish().unwrap();
    path
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` on this thread with a plain-text subscriber and return what it logged.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
    (result, logs)
}

/// Lines logged at WARN that mention `needle`.
pub fn warn_lines<'a>(logs: &'a str, needle: &str) -> Vec<&'a str> {
    logs.lines()
        .filter(|line| line.contains(" WARN ") && line.contains(needle))
        .collect()
}
