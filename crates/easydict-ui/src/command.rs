/// One line typed into the terminal, before it is resolved against the UI state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Plain text, submitted for translation
    Text(String),
    /// `:focus`
    Focus,
    /// `:select`
    SelectTranslate,
    /// `:accept` takes the offered selection
    AcceptOffer,
    /// `:ocr`
    Screenshot,
    /// `x y w h` while a region is being selected
    Region { x: u32, y: u32, width: u32, height: u32 },
    /// `cancel` while a region is being selected
    CancelRegion,
    Main,
    Settings,
    Swap,
    Clear,
    Pin,
    Languages { source: String, target: String },
    Copy(usize),
    /// `:speak` without an index reads the input, with one reads that result
    Speak(Option<usize>),
    Set { path: String, value: String },
    Save,
    Quit,
    Empty,
    Invalid(String),
}

/// Parse one line. While `selecting`, only region coordinates and `cancel` are accepted.
pub fn parse_line(line: &str, selecting: bool) -> Input {
    let line = line.trim();
    if selecting {
        return parse_region(line);
    }

    if line.is_empty() {
        return Input::Empty;
    }

    let Some(command) = line.strip_prefix(':') else {
        return Input::Text(line.to_string());
    };

    let mut parts = command.split_whitespace();
    let Some(name) = parts.next() else {
        return Input::Invalid(line.to_string());
    };
    let args: Vec<&str> = parts.collect();

    match (name, args.as_slice()) {
        ("focus", []) => Input::Focus,
        ("select", []) => Input::SelectTranslate,
        ("accept", []) => Input::AcceptOffer,
        ("ocr", []) => Input::Screenshot,
        ("main", []) => Input::Main,
        ("settings", []) => Input::Settings,
        ("swap", []) => Input::Swap,
        ("clear", []) => Input::Clear,
        ("pin", []) => Input::Pin,
        ("save", []) => Input::Save,
        ("quit" | "q", []) => Input::Quit,
        ("langs", [source, target]) => Input::Languages {
            source: source.to_string(),
            target: target.to_string(),
        },
        ("copy", [index]) => match index.parse() {
            Ok(index) if index > 0 => Input::Copy(index),
            _ => Input::Invalid(line.to_string()),
        },
        ("speak", []) => Input::Speak(None),
        ("speak", [index]) => match index.parse() {
            Ok(index) if index > 0 => Input::Speak(Some(index)),
            _ => Input::Invalid(line.to_string()),
        },
        ("set", [path, value @ ..]) if !value.is_empty() => Input::Set {
            path: path.to_string(),
            value: value.join(" "),
        },
        _ => Input::Invalid(line.to_string()),
    }
}

fn parse_region(line: &str) -> Input {
    if line.eq_ignore_ascii_case("cancel") || line.is_empty() {
        return Input::CancelRegion;
    }

    let numbers: Result<Vec<u32>, _> = line.split_whitespace().map(str::parse).collect();
    match numbers.as_deref() {
        Ok([x, y, width, height]) => Input::Region {
            x: *x,
            y: *y,
            width: *width,
            height: *height,
        },
        _ => Input::Invalid(line.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_submitted() {
        assert_eq!(parse_line("  hello world ", false), Input::Text("hello world".into()));
        assert_eq!(parse_line("   ", false), Input::Empty);
    }

    #[test]
    fn commands() {
        assert_eq!(parse_line(":ocr", false), Input::Screenshot);
        assert_eq!(parse_line(":copy 2", false), Input::Copy(2));
        assert_eq!(parse_line(":speak", false), Input::Speak(None));
        assert_eq!(parse_line(":speak 1", false), Input::Speak(Some(1)));
        assert_eq!(
            parse_line(":langs en ja", false),
            Input::Languages {
                source: "en".into(),
                target: "ja".into()
            }
        );
        assert_eq!(
            parse_line(":set services.deepl.api_key abc:fx", false),
            Input::Set {
                path: "services.deepl.api_key".into(),
                value: "abc:fx".into()
            }
        );
    }

    #[test]
    fn malformed_commands_are_invalid() {
        assert!(matches!(parse_line(":copy 0", false), Input::Invalid(_)));
        assert!(matches!(parse_line(":copy x", false), Input::Invalid(_)));
        assert!(matches!(parse_line(":langs en", false), Input::Invalid(_)));
        assert!(matches!(parse_line(":", false), Input::Invalid(_)));
        assert!(matches!(parse_line(":set path", false), Input::Invalid(_)));
    }

    #[test]
    fn region_mode() {
        assert_eq!(
            parse_line("10 20 300 40", true),
            Input::Region {
                x: 10,
                y: 20,
                width: 300,
                height: 40
            }
        );
        assert_eq!(parse_line("cancel", true), Input::CancelRegion);
        assert!(matches!(parse_line("10 20", true), Input::Invalid(_)));
        assert!(matches!(parse_line(":ocr", true), Input::Invalid(_)));
    }
}
