// Rendering collaborators
pub mod html;
pub mod pdf;

pub use pdf::{DocumentRenderer, PdfRenderer, RenderError};

/// File name offered for a downloaded listing: `<name>_eligible_schemes.<ext>`.
///
/// Anything outside `[A-Za-z0-9_-]` in the applicant's name becomes `_`.
pub fn attachment_file_name(name: &str, extension: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("{}_eligible_schemes.{}", stem, extension)
}
