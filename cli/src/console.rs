// Copyright 2023 Viktor Reusch
//
// This file is part of sct2_convert.
//
// sct2_convert is free software: you can redistribute it and/or modify it
// under the terms of the GNU Affero General Public License as published by the
// Free Software Foundation, either version 3 of the License, or (at your
// option) any later version.
//
// sct2_convert is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more
// details.
//
// You should have received a copy of the GNU Affero General Public License
// along with sct2_convert. If not, see <https://www.gnu.org/licenses/>.

//! Interactive lookup of DMS coordinates.

use std::error::Error;
use std::io::{self, BufRead, Write};

use log::warn;
use sct2_convert::lookup::{convert_tokens, join_decimals};

const PROMPT: &str = "DMS> ";
/// Lines ending the session.
const QUIT: &[&str] = &["q", "quit", "exit"];

/// Destination for converted values.
pub trait Clipboard {
    fn copy(&mut self, text: &str) -> Result<(), Box<dyn Error>>;
}

/// Used when no system clipboard is available.
pub struct NoClipboard;

impl Clipboard for NoClipboard {
    fn copy(&mut self, _text: &str) -> Result<(), Box<dyn Error>> {
        Ok(())
    }
}

#[cfg(feature = "clipboard")]
struct SystemClipboard(arboard::Clipboard);

#[cfg(feature = "clipboard")]
impl Clipboard for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<(), Box<dyn Error>> {
        self.0.set_text(text)?;
        Ok(())
    }
}

/// Open the system clipboard, falling back to [`NoClipboard`].
pub fn system_clipboard() -> Box<dyn Clipboard> {
    #[cfg(feature = "clipboard")]
    {
        match arboard::Clipboard::new() {
            Ok(clipboard) => return Box::new(SystemClipboard(clipboard)),
            Err(err) => warn!("clipboard unavailable: {err}"),
        }
    }

    Box::new(NoClipboard)
}

/// Read DMS tokens from `input` line by line until EOF or a quit command.
///
/// Each line holds 1, 2, or 4 tokens. The converted decimal degrees are
/// copied to `clipboard` and echoed to `output`. Bad input is reported and the
/// session continues.
pub fn run(
    input: impl BufRead,
    mut output: impl Write,
    clipboard: &mut dyn Clipboard,
) -> io::Result<()> {
    write!(output, "{PROMPT}")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        if QUIT.contains(&line.trim()) {
            break;
        }

        match convert_tokens(&line) {
            Ok(values) => {
                let joined = join_decimals(&values);
                if let Err(err) = clipboard.copy(&joined) {
                    warn!("copying to clipboard failed: {err}");
                }
                writeln!(output, "{joined}")?;
            }
            Err(err) => writeln!(output, "Input error: {err}")?,
        }

        write!(output, "{PROMPT}")?;
        output.flush()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl Clipboard for Recorder {
        fn copy(&mut self, text: &str) -> Result<(), Box<dyn Error>> {
            self.0.push(text.to_string());
            Ok(())
        }
    }

    struct Broken;

    impl Clipboard for Broken {
        fn copy(&mut self, _text: &str) -> Result<(), Box<dyn Error>> {
            Err("no display".into())
        }
    }

    fn session(input: &str, clipboard: &mut dyn Clipboard) -> String {
        let mut output = vec![];
        run(input.as_bytes(), &mut output, clipboard).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn converts_and_copies() {
        let mut clipboard = Recorder::default();
        let output = session(
            "N043.30.00.000\nN043.30.00.000 W112.15.00.000\n",
            &mut clipboard,
        );
        assert_eq!(clipboard.0, ["43.5", "43.5 -112.25"]);
        assert_eq!(output, "DMS> 43.5\nDMS> 43.5 -112.25\nDMS> ");
    }

    #[test]
    fn bad_input_continues() {
        let mut clipboard = Recorder::default();
        let output = session(
            "N43.5\nN001.00.00.000 N001.00.00.000 N001.00.00.000\nS010.30.00.000\n",
            &mut clipboard,
        );
        assert!(output.contains("Input error: malformed DMS value \"N43.5\""));
        assert!(output.contains("Input error: expected 1, 2, or 4 DMS values but got 3"));
        assert!(output.contains("-10.5\n"));
        assert_eq!(clipboard.0, ["-10.5"]);
    }

    #[test]
    fn quit_stops_reading() {
        let mut clipboard = Recorder::default();
        session("quit\nN001.00.00.000\n", &mut clipboard);
        assert!(clipboard.0.is_empty());
    }

    #[test]
    fn clipboard_failure_is_not_fatal() {
        let output = session("E002.00.00.000\n", &mut Broken);
        assert!(output.contains("DMS> 2\n"));
    }
}
