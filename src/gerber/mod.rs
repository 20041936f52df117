//! Drawing-language interpretation: RS-274X text in, [`Drawing`] out.

pub mod aperture;
pub mod command;
pub mod parser;
pub mod state;

pub use aperture::{Aperture, ApertureMacro, MacroPrimitive, MacroValue, PrimitiveRejection};
pub use command::{Command, Operation, Pen};
pub use parser::{Anomaly, AnomalyKind, Interpreter, Outcome};
pub use state::{AxisFormat, CoordinateFormat, InterpreterState, Unit, ZeroOmission};

use crate::errors::StencilError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::info;

/// An interpreted drawing: the ordered command list plus the final
/// interpreter state (aperture table, macro table, format, units).
#[derive(Debug, Clone, Default)]
pub struct Drawing {
    pub commands: Vec<Command>,
    pub state: InterpreterState,
    /// Blocks that were skipped while reading, in file order.
    pub anomalies: Vec<Anomaly>,
}

impl Drawing {
    /// Interprets a drawing from any buffered reader.
    ///
    /// Lines are decoded lossily: stray Latin-1 bytes in comments or
    /// attributes are not an I/O failure.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, StencilError> {
        let lines = reader.split(b'\n').map(|line| {
            line.map(|bytes| {
                let text = String::from_utf8_lossy(&bytes);
                text.strip_suffix('\r').unwrap_or(&text[..]).to_string()
            })
        });
        let drawing = Interpreter::new().run(lines)?;
        info!(
            commands = drawing.commands.len(),
            apertures = drawing.state.apertures.len(),
            macros = drawing.state.macros.len(),
            anomalies = drawing.anomalies.len(),
            "interpreted drawing"
        );
        Ok(drawing)
    }

    /// Opens and interprets the file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, StencilError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Interprets in-memory text. Never fails: there is no I/O to go wrong.
    pub fn parse_str(text: &str) -> Self {
        let lines = text.lines().map(|l| Ok(l.to_string()));
        Interpreter::new().run(lines).unwrap_or_default()
    }

    pub fn flash_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, Command::FlashAt { .. }))
            .count()
    }

    pub fn draw_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, Command::DrawTo { .. }))
            .count()
    }
}
