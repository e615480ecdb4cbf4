//! File classification: sort project files into preview buckets by extension.

use crate::types::{ProjectFile, ProjectType};

/// Project files partitioned by the role they play in the preview document.
///
/// Classification is by case-sensitive filename suffix. A file lands in at
/// most one bucket; anything with an unknown extension (images, fonts,
/// config files) has no preview bucket and is dropped without error.
#[derive(Debug, Default)]
pub struct Buckets<'a> {
    /// `.html` files, candidates for the base document.
    pub html: Vec<&'a ProjectFile>,
    /// `.css` files, concatenated into one stylesheet blob.
    pub styles: Vec<&'a ProjectFile>,
    /// `.js` and `.ts` files, concatenated into one script blob.
    pub scripts: Vec<&'a ProjectFile>,
    /// `.jsx` and `.tsx` files, executed against the component runtime shim.
    pub components: Vec<&'a ProjectFile>,
}

impl<'a> Buckets<'a> {
    /// Partition `files` into buckets, preserving input order within each.
    pub fn partition(files: &'a [ProjectFile]) -> Self {
        let mut buckets = Self::default();
        for file in files {
            if file.name.ends_with(".html") {
                buckets.html.push(file);
            } else if file.name.ends_with(".css") {
                buckets.styles.push(file);
            } else if file.name.ends_with(".js") || file.name.ends_with(".ts") {
                buckets.scripts.push(file);
            } else if file.name.ends_with(".jsx") || file.name.ends_with(".tsx") {
                buckets.components.push(file);
            }
        }
        buckets
    }

    /// Select the base HTML document for the preview.
    ///
    /// The file literally named `index.html` wins (first occurrence, never
    /// last-wins or a merge); otherwise the first HTML file in input order.
    pub fn base_document(&self) -> Option<&'a ProjectFile> {
        self.html
            .iter()
            .find(|file| file.name == "index.html")
            .or_else(|| self.html.first())
            .copied()
    }
}

/// Detect the project type from extension presence alone.
///
/// Priority: React > Vue > Html > Vanilla.
pub fn detect_project_type(files: &[ProjectFile]) -> ProjectType {
    if files
        .iter()
        .any(|f| f.name.ends_with(".jsx") || f.name.ends_with(".tsx"))
    {
        ProjectType::React
    } else if files.iter().any(|f| f.name.ends_with(".vue")) {
        ProjectType::Vue
    } else if files.iter().any(|f| f.name.ends_with(".html")) {
        ProjectType::Html
    } else {
        ProjectType::Vanilla
    }
}
