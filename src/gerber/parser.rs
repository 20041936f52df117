//! Best-effort interpreter for the RS-274X drawing language.
//!
//! Reads text line by line and turns it into a [`Drawing`]. Only an I/O
//! failure aborts; every malformed or unsupported block becomes an
//! [`Outcome::Ignored`] and is recorded as an [`Anomaly`].

use crate::errors::StencilError;
use crate::gerber::Drawing;
use crate::gerber::aperture::{Aperture, ApertureMacro, MacroPrimitive, PrimitiveRejection};
use crate::gerber::command::{Command, Operation};
use crate::gerber::state::{AxisFormat, InterpreterState, Unit, ZeroOmission};
use crate::float_types::Real;
use std::io;
use tracing::{debug, warn};

/// Result of interpreting one directive, statement or macro block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The block changed the state or produced a command.
    Applied,
    /// A recognized block with nothing to do (comments, end of file, modes).
    NoOp,
    /// The block was skipped.
    Ignored(AnomalyKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnomalyKind {
    /// `%XX...*%` with a directive this crate does not implement
    UnsupportedDirective,
    /// A known directive whose fields could not be read
    MalformedDirective,
    /// `%ADD..*%` with a code below 10
    InvalidApertureCode,
    /// A macro block that did not become a primitive
    MacroPrimitive(PrimitiveRejection),
    /// A macro whose closing `%` never arrived
    UnterminatedMacro,
    /// A G code or statement kind this crate does not implement
    UnsupportedStatement,
    /// A D code other than 01/02/03 on a coordinate statement
    UnknownOperation(u32),
    /// A statement whose fields could not be read
    MalformedStatement,
}

/// A skipped piece of input, kept so callers can audit what was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anomaly {
    /// 1-based line number where the block starts
    pub line: usize,
    pub kind: AnomalyKind,
    pub text: String,
}

/// Builds a [`Drawing`] from drawing-language text.
#[derive(Debug, Default)]
pub struct Interpreter {
    state: InterpreterState,
    commands: Vec<Command>,
    anomalies: Vec<Anomaly>,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes every line and returns the resulting drawing.
    ///
    /// Fails only when a line cannot be read.
    pub fn run<I>(mut self, lines: I) -> Result<Drawing, StencilError>
    where
        I: IntoIterator<Item = io::Result<String>>,
    {
        let mut lines = lines.into_iter().enumerate();

        while let Some((index, line)) = lines.next() {
            let line = line?;
            let line_no = index + 1;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(body) = line.strip_prefix('%') {
                let closed = body.ends_with('%');
                let body = body.trim_end_matches('%');

                if let Some(rest) = body.strip_prefix("AM") {
                    self.aperture_macro(line_no, rest, closed, &mut lines)?;
                    continue;
                }

                for word in body.split('*').map(str::trim).filter(|w| !w.is_empty()) {
                    let outcome = self.directive(word);
                    self.record(line_no, word, outcome);
                }
                continue;
            }

            for part in line.split('*').map(str::trim).filter(|p| !p.is_empty()) {
                let outcome = self.statement(part);
                self.record(line_no, part, outcome);
            }
        }

        Ok(Drawing {
            commands: self.commands,
            state: self.state,
            anomalies: self.anomalies,
        })
    }

    fn record(&mut self, line: usize, text: &str, outcome: Outcome) {
        if let Outcome::Ignored(kind) = outcome {
            debug!(line, ?kind, text, "ignoring block");
            self.anomalies.push(Anomaly {
                line,
                kind,
                text: text.to_string(),
            });
        }
    }

    // ------------------------------------------------------------------
    // Extended (`%...%`) directives
    // ------------------------------------------------------------------

    fn directive(&mut self, word: &str) -> Outcome {
        if let Some(rest) = word.strip_prefix("FS") {
            self.format_spec(rest)
        } else if let Some(rest) = word.strip_prefix("MO") {
            match rest {
                "MM" => {
                    self.state.unit = Unit::Millimeters;
                    Outcome::Applied
                },
                "IN" => {
                    self.state.unit = Unit::Inches;
                    Outcome::Applied
                },
                _ => Outcome::Ignored(AnomalyKind::MalformedDirective),
            }
        } else if let Some(rest) = word.strip_prefix("ADD") {
            self.aperture_definition(rest)
        } else {
            Outcome::Ignored(AnomalyKind::UnsupportedDirective)
        }
    }

    /// `FS` + `L|T` + `A|I` + `X<int><dec>Y<int><dec>`
    fn format_spec(&mut self, rest: &str) -> Outcome {
        fn axis<'a>(text: &'a str, letter: char) -> Option<(AxisFormat, &'a str)> {
            let text = text.strip_prefix(letter)?;
            let mut digits = text.chars();
            let integer = digits.next()?.to_digit(10)?;
            let decimal = digits.next()?.to_digit(10)?;
            Some((AxisFormat::new(integer, decimal), digits.as_str()))
        }

        let mut chars = rest.chars();
        let zeros = match chars.next() {
            Some('L') => ZeroOmission::Leading,
            Some('T') => ZeroOmission::Trailing,
            _ => return Outcome::Ignored(AnomalyKind::MalformedDirective),
        };
        let incremental = match chars.next() {
            Some('A') => false,
            Some('I') => true,
            _ => return Outcome::Ignored(AnomalyKind::MalformedDirective),
        };
        let Some((x, rest)) = axis(chars.as_str(), 'X') else {
            return Outcome::Ignored(AnomalyKind::MalformedDirective);
        };
        let Some((y, _)) = axis(rest, 'Y') else {
            return Outcome::Ignored(AnomalyKind::MalformedDirective);
        };

        if incremental {
            warn!("incremental coordinates are not supported, treating them as absolute");
        }

        let format = &mut self.state.format;
        format.x = x;
        format.y = y;
        format.zeros = zeros;
        format.incremental = incremental;
        Outcome::Applied
    }

    /// `ADD<code><template>[,<mod>X<mod>...]`
    fn aperture_definition(&mut self, rest: &str) -> Outcome {
        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let Ok(code) = rest[..digits_end].parse::<u32>() else {
            return Outcome::Ignored(AnomalyKind::MalformedDirective);
        };
        if code < 10 {
            return Outcome::Ignored(AnomalyKind::InvalidApertureCode);
        }

        let (template, modifiers) = match rest[digits_end..].split_once(',') {
            Some((template, modifiers)) => (template.trim(), modifiers.trim()),
            None => (rest[digits_end..].trim(), ""),
        };

        let modifiers = if modifiers.is_empty() {
            Some(Vec::new())
        } else {
            modifiers
                .split('X')
                .map(|m| m.trim().parse::<Real>().ok().filter(|v| v.is_finite()))
                .collect::<Option<Vec<_>>>()
        };

        match modifiers.and_then(|mods| Aperture::from_template(template, &mods)) {
            Some(aperture) => {
                self.state.apertures.insert(code, aperture);
                Outcome::Applied
            },
            None => Outcome::Ignored(AnomalyKind::MalformedDirective),
        }
    }

    /// Reads `%AM<name>*<block>*...%`, pulling further lines from `lines`
    /// until the closing `%` when the opening line did not contain it.
    fn aperture_macro<I>(
        &mut self,
        line_no: usize,
        rest: &str,
        mut closed: bool,
        lines: &mut I,
    ) -> Result<(), StencilError>
    where
        I: Iterator<Item = (usize, io::Result<String>)>,
    {
        let mut body = rest.to_string();

        while !closed {
            let Some((_, next)) = lines.next() else {
                break;
            };
            let next = next?;
            let next = next.trim();
            if next.ends_with('%') {
                closed = true;
            }
            body.push_str(next.trim_end_matches('%'));
        }

        let mut words = body.split('*').map(str::trim).filter(|w| !w.is_empty());
        let name = words.next().unwrap_or_default().to_string();
        if name.is_empty() {
            self.record(line_no, &body, Outcome::Ignored(AnomalyKind::MalformedDirective));
            return Ok(());
        }

        let mut primitives = Vec::new();
        for block in words {
            match MacroPrimitive::parse(block) {
                Ok(primitive) => primitives.push(primitive),
                Err(PrimitiveRejection::Comment) => {},
                Err(rejection) => self.record(
                    line_no,
                    block,
                    Outcome::Ignored(AnomalyKind::MacroPrimitive(rejection)),
                ),
            }
        }

        if !closed {
            self.record(line_no, &name, Outcome::Ignored(AnomalyKind::UnterminatedMacro));
        }

        self.state
            .macros
            .insert(name.clone(), ApertureMacro { name, primitives });
        Ok(())
    }

    // ------------------------------------------------------------------
    // Function-code statements
    // ------------------------------------------------------------------

    fn statement(&mut self, text: &str) -> Outcome {
        let mut text = text;

        if let Some(rest) = text.strip_prefix('G') {
            let digits_end = rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len());
            let Ok(code) = rest[..digits_end].parse::<u32>() else {
                return Outcome::Ignored(AnomalyKind::MalformedStatement);
            };
            let tail = &rest[digits_end..];
            match code {
                4 => return Outcome::NoOp,
                70 => self.state.unit = Unit::Inches,
                71 => self.state.unit = Unit::Millimeters,
                // Circular interpolation degrades to a straight draw.
                1 | 2 | 3 | 54 | 55 | 74 | 75 | 90 => {},
                91 => warn!("G91 incremental mode is not supported, coordinates stay absolute"),
                _ => return Outcome::Ignored(AnomalyKind::UnsupportedStatement),
            }
            if tail.is_empty() {
                return Outcome::Applied;
            }
            text = tail;
        }

        if text.starts_with('M') {
            return Outcome::NoOp;
        }

        if let Some(code) = text.strip_prefix('D').and_then(|d| d.parse::<u32>().ok()) {
            if code >= 10 {
                self.state.current_aperture = code;
                self.commands.push(Command::SelectAperture(code));
                return Outcome::Applied;
            }
        }

        self.coordinate_statement(text)
    }

    /// `[X<v>][Y<v>][I<v>][J<v>][D0n]`
    fn coordinate_statement(&mut self, text: &str) -> Outcome {
        let mut x = None;
        let mut y = None;
        let mut op = None;
        let mut rest = text;
        let mut fields = 0;

        while let Some(letter) = rest.chars().next() {
            let body = &rest[letter.len_utf8()..];
            let end = body
                .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+')))
                .unwrap_or(body.len());
            let value = &body[..end];
            rest = &body[end..];
            fields += 1;

            if value.is_empty() {
                return Outcome::Ignored(AnomalyKind::MalformedStatement);
            }

            let format = &self.state.format;
            match letter {
                'X' => match format.parse_axis(&format.x, value) {
                    Some(v) => x = Some(v),
                    None => return Outcome::Ignored(AnomalyKind::MalformedStatement),
                },
                'Y' => match format.parse_axis(&format.y, value) {
                    Some(v) => y = Some(v),
                    None => return Outcome::Ignored(AnomalyKind::MalformedStatement),
                },
                'I' | 'J' => {},
                'D' => match value.parse::<u32>() {
                    Ok(code) => op = Some(code),
                    Err(_) => return Outcome::Ignored(AnomalyKind::MalformedStatement),
                },
                _ => return Outcome::Ignored(AnomalyKind::MalformedStatement),
            }
        }

        if fields == 0 {
            return Outcome::Ignored(AnomalyKind::MalformedStatement);
        }

        let operation = match op {
            None => Operation::Move,
            Some(code) => match Operation::from_code(code) {
                Some(operation) => operation,
                None => return Outcome::Ignored(AnomalyKind::UnknownOperation(code)),
            },
        };

        self.commands.push(Command::with_operation(operation, x, y));
        Outcome::Applied
    }
}
