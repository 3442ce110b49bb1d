use std::{
    io,
    string::FromUtf8Error,
    sync::{Arc, Mutex},
};

use crate::{
    Engine,
    config::{Config, RunPattern},
    filter::DefaultFilter,
    formatter::{common::color::SupportsColor, no::NoFormatter, pretty::PrettyFormatter},
};

#[derive(Debug)]
#[allow(dead_code)]
pub enum Error {
    Poison,
    FromUtf8(FromUtf8Error),
}

/// Shared in-memory write target, readable after the formatter moved away.
#[derive(Debug, Default, Clone)]
pub struct Buffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .0
            .lock()
            .map_err(|_| io::Error::other("poison error"))?;
        guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SupportsColor for Buffer {
    fn supports_color(&self) -> bool {
        false
    }
}

impl Buffer {
    pub fn try_to_string(&self) -> Result<String, Error> {
        let guard = self.0.lock().map_err(|_| Error::Poison)?;
        String::from_utf8(guard.to_vec()).map_err(Error::FromUtf8)
    }
}

/// Default filter, no output, console suppressed and serial scheduling.
pub fn silent_engine() -> Engine<DefaultFilter, NoFormatter> {
    Engine::new()
        .with_formatter(NoFormatter)
        .with_config(Config::default().with_run_pattern(RunPattern::Serial))
}

/// An engine rendering through [`PrettyFormatter`] into the returned buffer.
pub fn buffered_engine() -> (Buffer, Engine<DefaultFilter, PrettyFormatter<Buffer>>) {
    let buffer = Buffer::default();
    let engine = Engine::new().with_formatter(PrettyFormatter::default().with_target(buffer.clone()));
    (buffer, engine)
}
