//-------------------------------------------------------------------//
//       pic1d : 1d1v electrostatic PIC code on a periodic domain    //
//-------------------------------------------------------------------//
// Disclaimer: pic1d (one-dimensional electrostatic Particle-in-     //
// Cell simulation code) is free software: you can redistribute it   //
// and/or modify it under the terms of the GNU General Public License//
// as published by the Free Software Foundation, version 3.          //
// This program is distributed in the hope that it will be useful,   //
// but WITHOUT ANY WARRANTY; without even the implied warranty of    //
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU  //
// General Public License for more details at                        //
// https://www.gnu.org/licenses/gpl-3.0.html.                        //
//-------------------------------------------------------------------//

//! Console logger for the `pic1d` binary: every record becomes one
//! `>> pic1d: LEVEL message` line on stderr.

use std::io::{self, Write};

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

pub struct Logger {
    level: LevelFilter,
    stderr: io::Stderr,
}

impl Logger {
    pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(Logger {
            level,
            stderr: io::stderr(),
        }))?;
        log::set_max_level(level);
        Ok(())
    }
}

/// Info lines carry no level tag, the way the console banner always looked.
pub fn format_record(level: Level, message: &str) -> String {
    match level {
        Level::Info => format!(">> pic1d: {}", message),
        other => format!(">> pic1d: {} {}", other, message),
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.target().starts_with("pic1d")
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_record(record.level(), &record.args().to_string());
        // nowhere left to report a failed write to stderr
        let _ = writeln!(self.stderr.lock(), "{}", line);
    }

    fn flush(&self) {
        let _ = self.stderr.lock().flush();
    }
}
