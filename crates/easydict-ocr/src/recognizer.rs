use std::sync::Arc;

use anyhow::Result;

use crate::text::{OcrLine, join_lines};

/// Text recognition over an encoded PNG. Implementations block, call them
/// from `spawn_blocking`.
pub trait Recognizer: Send + Sync {
    fn recognize(&self, png: &[u8]) -> Result<Vec<OcrLine>>;

    /// Recognise and join into paragraphs
    fn recognize_text(&self, png: &[u8]) -> Result<String> {
        join_lines(&self.recognize(png)?)
    }
}

/// The recognizer for the current platform. `language` is a BCP-47 tag or `auto`.
pub fn platform_recognizer(language: &str) -> Arc<dyn Recognizer> {
    #[cfg(windows)]
    {
        Arc::new(winrt::WinRtRecognizer::new(language))
    }
    #[cfg(not(windows))]
    {
        tracing::debug!("No OCR engine for language {}", language);
        Arc::new(Unsupported)
    }
}

#[cfg(not(windows))]
struct Unsupported;

#[cfg(not(windows))]
impl Recognizer for Unsupported {
    fn recognize(&self, _png: &[u8]) -> Result<Vec<OcrLine>> {
        anyhow::bail!("OCR is only supported on Windows")
    }
}

#[cfg(windows)]
mod winrt {
    use anyhow::{Context, Result, bail};
    use windows::{
        Globalization::Language,
        Graphics::Imaging::BitmapDecoder,
        Media::Ocr::OcrEngine,
        Storage::Streams::{DataWriter, InMemoryRandomAccessStream},
        Win32::Foundation::RPC_E_CHANGED_MODE,
        Win32::System::Com::{COINIT_MULTITHREADED, CoInitializeEx, CoUninitialize},
        core::HSTRING,
    };

    use super::Recognizer;
    use crate::text::OcrLine;

    /// COM apartment held for one recognition on a blocking-pool thread
    struct Apartment {
        owned: bool,
    }

    impl Apartment {
        fn enter() -> Result<Self> {
            let hr = unsafe { CoInitializeEx(None, COINIT_MULTITHREADED) };
            if hr == RPC_E_CHANGED_MODE {
                // Thread is already single-threaded; WinRT calls work there too
                tracing::debug!("[OCR] Reusing existing COM apartment");
                return Ok(Self { owned: false });
            }
            hr.ok().context("Failed to initialize COM")?;
            Ok(Self { owned: true })
        }
    }

    impl Drop for Apartment {
        fn drop(&mut self) {
            if self.owned {
                unsafe { CoUninitialize() };
            }
        }
    }

    pub struct WinRtRecognizer {
        language: String,
    }

    impl WinRtRecognizer {
        pub fn new(language: &str) -> Self {
            Self {
                language: language.to_string(),
            }
        }

        fn engine(&self) -> Result<OcrEngine> {
            if self.language.is_empty() || self.language == "auto" {
                return OcrEngine::TryCreateFromUserProfileLanguages().context(
                    "OCR 引擎创建失败。请在 Windows 设置 > 时间和语言 > 语言 中安装 OCR 语言包。",
                );
            }

            let language = Language::CreateLanguage(&HSTRING::from(self.language.as_str()))
                .context("Failed to create language")?;
            if !OcrEngine::IsLanguageSupported(&language).unwrap_or(false) {
                bail!(
                    "不支持的 OCR 语言: {}。请在 Windows 设置中安装对应语言包。",
                    self.language
                );
            }

            OcrEngine::TryCreateFromLanguage(&language)
                .context("Failed to create OCR engine for language")
        }
    }

    impl Recognizer for WinRtRecognizer {
        fn recognize(&self, png: &[u8]) -> Result<Vec<OcrLine>> {
            let _apartment = Apartment::enter()?;

            let stream = InMemoryRandomAccessStream::new().context("Failed to create stream")?;
            let writer = DataWriter::CreateDataWriter(&stream).context("Failed to create writer")?;
            writer.WriteBytes(png).context("Failed to write image bytes")?;
            writer
                .StoreAsync()
                .context("Failed to store async")?
                .get()
                .context("Failed to store data")?;
            writer.FlushAsync().context("Failed to flush")?.get()?;
            writer.DetachStream().context("Failed to detach stream")?;
            stream.Seek(0).context("Failed to seek")?;

            let bitmap = BitmapDecoder::CreateAsync(&stream)
                .context("Failed to create decoder async")?
                .get()
                .context("Failed to get decoder")?
                .GetSoftwareBitmapAsync()
                .context("Failed to get bitmap async")?
                .get()
                .context("Failed to get software bitmap")?;

            let result = self
                .engine()?
                .RecognizeAsync(&bitmap)
                .context("Failed to recognize async")?
                .get()
                .context("Failed to get OCR result")?;

            let lines = result.Lines().context("Failed to get lines")?;
            let count = lines.Size().context("Failed to get line count")?;
            if count == 0 {
                // Some engines only fill the flat text
                let text = result.Text().context("Failed to get text")?.to_string();
                return Ok(vec![OcrLine::new(text, 0.0, 0.0)]);
            }

            let mut out = Vec::with_capacity(count as usize);
            for i in 0..count {
                let line = lines.GetAt(i).context("Failed to get line")?;
                let text = line.Text().context("Failed to get line text")?.to_string();

                // First word's box stands in for the line's vertical extent
                let words = line.Words().context("Failed to get words")?;
                let (top, height) = if words.Size().unwrap_or(0) > 0 {
                    let rect = words
                        .GetAt(0)
                        .context("Failed to get word")?
                        .BoundingRect()
                        .context("Failed to get word bounds")?;
                    (rect.Y as f64, rect.Height as f64)
                } else {
                    (0.0, 0.0)
                };

                out.push(OcrLine::new(text, top, height));
            }

            Ok(out)
        }
    }

}
