use anyhow::{Result, bail};

pub const NO_TEXT_FOUND: &str = "未识别到文字。请确保截图中有清晰的文字内容。";

/// Gap, in multiples of the taller line height, that starts a new paragraph
const PARAGRAPH_GAP: f64 = 0.8;

/// One recognised line with its vertical placement in pixels
#[derive(Debug, Clone, PartialEq)]
pub struct OcrLine {
    pub text: String,
    pub top: f64,
    pub height: f64,
}

impl OcrLine {
    pub fn new(text: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            text: text.into(),
            top,
            height,
        }
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Join lines top to bottom, inserting a blank line where the vertical gap
/// suggests a paragraph break. Blank lines are skipped.
pub fn join_lines(lines: &[OcrLine]) -> Result<String> {
    let lines: Vec<&OcrLine> = lines.iter().filter(|l| !l.text.trim().is_empty()).collect();
    if lines.is_empty() {
        bail!("{NO_TEXT_FOUND}");
    }

    let mut output = String::new();
    for (i, line) in lines.iter().enumerate() {
        output.push_str(&line.text);

        let Some(next) = lines.get(i + 1) else {
            break;
        };

        let gap = next.top - line.bottom();
        let line_height = line.height.max(next.height);
        if line_height > 0.0 && gap > line_height * PARAGRAPH_GAP {
            output.push_str("\n\n");
        } else {
            output.push('\n');
        }
    }

    Ok(output)
}
