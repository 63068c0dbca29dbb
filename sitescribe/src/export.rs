use std::fs;
use std::io;
use std::path::Path;

const MAX_STEM_LENGTH: usize = 255;

/// Derives a filesystem-safe Markdown filename from a URL: the protocol is
/// stripped, each run of non-word characters becomes a single underscore,
/// and the stem is capped at 255 characters before the `.md` suffix.
pub fn generate_filename_from_url(url: &str) -> String {
    let stripped = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);

    let mut name = String::with_capacity(stripped.len());
    let mut prev_underscore = false;
    for c in stripped.chars() {
        if c.is_alphanumeric() || c == '_' {
            name.push(c);
            prev_underscore = false;
        } else if !prev_underscore {
            name.push('_');
            prev_underscore = true;
        }
    }

    if name.chars().count() > MAX_STEM_LENGTH {
        name = name.chars().take(MAX_STEM_LENGTH).collect();
    }
    name.push_str(".md");
    name
}

fn header_for(url: &str) -> String {
    format!("# Source URL: {url}\n\n")
}

/// Writes each `(url, markdown)` page to its own file under `directory`,
/// creating the directory if absent.
pub fn save_to_multiple_files(pages: &[(String, String)], directory: &Path) -> io::Result<()> {
    fs::create_dir_all(directory)?;
    for (url, markdown) in pages {
        let filename = generate_filename_from_url(url);
        let content = format!("{}{}", header_for(url), markdown);
        fs::write(directory.join(filename), content)?;
    }
    Ok(())
}

/// Concatenates all pages into one file under `directory`, each entry
/// prefixed with its source header and followed by a horizontal rule.
pub fn save_to_single_file(
    pages: &[(String, String)],
    directory: &Path,
    filename: &str,
) -> io::Result<()> {
    fs::create_dir_all(directory)?;

    let mut combined = String::new();
    for (url, markdown) in pages {
        combined.push_str(&header_for(url));
        combined.push_str(markdown);
        combined.push_str("\n\n---\n\n");
    }

    fs::write(directory.join(filename), combined)
}
