use crate::error::GenerateError;
use crate::logger;
use crate::models::InputSource;
use scraper::{ElementRef, Html, Node, Selector};
use std::fs;
use std::path::Path;

pub const MIN_TEXT_LEN: usize = 100;
const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Turn an input source into a single plain-text string suitable for
/// prompting, or fail with the error shown to the user.
pub async fn normalize_source(
    http: &reqwest::Client,
    source: &InputSource,
) -> Result<String, GenerateError> {
    match source {
        InputSource::Text(text) => {
            if text.chars().count() < MIN_TEXT_LEN {
                return Err(GenerateError::TextTooShort);
            }
            Ok(text.clone())
        }
        InputSource::File(path) => process_file(path),
        InputSource::Url(url) => fetch_url_content(http, url).await,
    }
}

fn process_file(path: &Path) -> Result<String, GenerateError> {
    if path.as_os_str().is_empty() {
        return Err(GenerateError::NoFileSelected);
    }
    let metadata = fs::metadata(path).map_err(|_| GenerateError::NoFileSelected)?;
    // Size cap applies before the type check, so an oversized PDF still
    // reports the size error.
    if metadata.len() > MAX_FILE_SIZE {
        return Err(GenerateError::FileTooLarge);
    }

    match mime_for_path(path) {
        Some("text/plain") => fs::read_to_string(path).map_err(|e| {
            logger::log(&format!("Failed to read {}: {}", path.display(), e));
            GenerateError::Unexpected
        }),
        Some(_) => Err(GenerateError::UnsupportedDocument),
        None => Err(GenerateError::InvalidFileType),
    }
}

fn mime_for_path(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "txt" => Some("text/plain"),
        "pdf" => Some("application/pdf"),
        "docx" => Some(DOCX_MIME),
        _ => None,
    }
}

async fn fetch_url_content(http: &reqwest::Client, url: &str) -> Result<String, GenerateError> {
    if url.trim().is_empty() {
        return Err(GenerateError::EmptyUrl);
    }
    // Every failure past this point is reported as the one generic
    // extraction error; the underlying cause only goes to the log.
    match fetch_and_extract(http, url).await {
        Ok(text) => Ok(text),
        Err(reason) => {
            logger::log(&format!("URL extraction failed for {}: {}", url, reason));
            Err(GenerateError::UrlExtraction)
        }
    }
}

async fn fetch_and_extract(http: &reqwest::Client, url: &str) -> Result<String, String> {
    let response = http
        .get(url)
        .header("User-Agent", "mcq-generator/0.1")
        .send()
        .await
        .map_err(|e| format!("request failed: {}", e))?;

    if !response.status().is_success() {
        return Err(format!("HTTP {}", response.status().as_u16()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| format!("failed to read body: {}", e))?;

    let cleaned = extract_visible_text(&body);
    if cleaned.chars().count() < MIN_TEXT_LEN {
        return Err("content too short or empty".to_string());
    }
    Ok(cleaned)
}

/// Visible text of an HTML document: script/style subtrees dropped,
/// remaining text nodes joined and whitespace collapsed.
pub fn extract_visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let skip_tags = ["script", "style", "noscript"];

    let body_selector = Selector::parse("body").unwrap();
    let mut parts = Vec::new();
    match document.select(&body_selector).next() {
        Some(body) => collect_text(body, &skip_tags, &mut parts),
        None => collect_text(document.root_element(), &skip_tags, &mut parts),
    }

    collapse_whitespace(&parts.join(" "))
}

fn collect_text(element: ElementRef, skip_tags: &[&str], out: &mut Vec<String>) {
    if skip_tags.contains(&element.value().name()) {
        return;
    }
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let t = text.trim();
                if !t.is_empty() {
                    out.push(t.to_string());
                }
            }
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_text(child_el, skip_tags, out);
                }
            }
            _ => {}
        }
    }
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Runtime::new().unwrap().block_on(future)
    }

    #[test]
    fn test_short_text_rejected() {
        let http = reqwest::Client::new();
        let source = InputSource::Text("too short".to_string());
        let result = block_on(normalize_source(&http, &source));
        assert_eq!(result, Err(GenerateError::TextTooShort));
    }

    #[test]
    fn test_long_text_passes_through() {
        let http = reqwest::Client::new();
        let text = "a".repeat(150);
        let source = InputSource::Text(text.clone());
        let result = block_on(normalize_source(&http, &source));
        assert_eq!(result, Ok(text));
    }

    #[test]
    fn test_empty_path_is_no_file() {
        assert_eq!(
            process_file(Path::new("")),
            Err(GenerateError::NoFileSelected)
        );
    }

    #[test]
    fn test_missing_file_is_no_file() {
        assert_eq!(
            process_file(Path::new("/nonexistent/notes.txt")),
            Err(GenerateError::NoFileSelected)
        );
    }

    #[test]
    fn test_invalid_extension_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slides.pptx");
        fs::write(&path, "not text").unwrap();
        assert_eq!(process_file(&path), Err(GenerateError::InvalidFileType));
    }

    #[test]
    fn test_oversized_file_rejected_before_type_check() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.pptx");
        let file = fs::File::create(&path).unwrap();
        file.set_len(MAX_FILE_SIZE + 1).unwrap();
        assert_eq!(process_file(&path), Err(GenerateError::FileTooLarge));
    }

    #[test]
    fn test_pdf_and_docx_unimplemented() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["doc.pdf", "doc.docx"] {
            let path = dir.path().join(name);
            fs::write(&path, "binary").unwrap();
            assert_eq!(process_file(&path), Err(GenerateError::UnsupportedDocument));
        }
    }

    #[test]
    fn test_plain_text_file_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.TXT");
        let mut file = fs::File::create(&path).unwrap();
        write!(file, "file contents").unwrap();
        assert_eq!(process_file(&path), Ok("file contents".to_string()));
    }

    #[test]
    fn test_empty_url_rejected() {
        let http = reqwest::Client::new();
        let source = InputSource::Url("   ".to_string());
        let result = block_on(normalize_source(&http, &source));
        assert_eq!(result, Err(GenerateError::EmptyUrl));
    }

    #[test]
    fn test_unreachable_url_reports_generic_error() {
        let http = reqwest::Client::new();
        let source = InputSource::Url("http://127.0.0.1:1/none".to_string());
        let result = block_on(normalize_source(&http, &source));
        assert_eq!(result, Err(GenerateError::UrlExtraction));
    }

    #[test]
    fn test_extract_visible_text_basic() {
        let html = "<html><body><h1>Hello</h1><p>World</p></body></html>";
        assert_eq!(extract_visible_text(html), "Hello World");
    }

    #[test]
    fn test_extract_visible_text_strips_script_and_style() {
        let html = r#"
        <html><body>
            <script>var x = 1;</script>
            <style>.foo { color: red; }</style>
            <p>Visible text</p>
        </body></html>
        "#;
        let text = extract_visible_text(html);
        assert!(text.contains("Visible text"));
        assert!(!text.contains("var x = 1"));
        assert!(!text.contains("color: red"));
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  hello \n\t world  "), "hello world");
        assert_eq!(collapse_whitespace(""), "");
    }

    #[test]
    fn test_mime_for_path() {
        assert_eq!(mime_for_path(Path::new("a.txt")), Some("text/plain"));
        assert_eq!(mime_for_path(Path::new("a.pdf")), Some("application/pdf"));
        assert_eq!(mime_for_path(Path::new("a.docx")), Some(DOCX_MIME));
        assert_eq!(mime_for_path(Path::new("a.md")), None);
        assert_eq!(mime_for_path(Path::new("noext")), None);
    }
}
