use url::Url;

use crate::data::{category_ids, is_known_category};
use crate::types::internal::ArticleDraft;

/// Columns every data row must carry a value for
pub const REQUIRED_COLUMNS: [&str; 7] = ["title", "excerpt", "content", "category", "image", "author", "readTime"];

pub const FEATURED_COLUMN: &str = "featured";

/// Header row resolved to column positions
#[derive(Debug, Clone)]
pub struct Header {
    names: Vec<String>,
}

impl Header {
    pub fn new(cells: &[String]) -> Self {
        Self {
            names: cells.iter().map(|c| c.replace('"', "").trim().to_string()).collect(),
        }
    }

    fn index_of(&self, column: &str) -> Option<usize> {
        self.names.iter().position(|n| n == column)
    }
}

fn cell<'a>(row: &'a [String], index: Option<usize>) -> Option<&'a str> {
    index.and_then(|i| row.get(i)).map(String::as_str)
}

/// Validate one data row and build a draft from it
///
/// Every check runs; the returned error list holds all problems found in
/// the row, in the order the checks ran.
pub fn validate_row(header: &Header, row: &[String]) -> Result<ArticleDraft, Vec<String>> {
    let mut errors = Vec::new();

    for column in REQUIRED_COLUMNS {
        match header.index_of(column) {
            None => errors.push(format!("Missing required column: {}", column)),
            Some(i) => {
                if row.get(i).map_or(true, |v| v.trim().is_empty()) {
                    errors.push(format!("Missing value for {}", column));
                }
            }
        }
    }

    let category = cell(row, header.index_of("category")).unwrap_or_default();
    if !category.is_empty() && !is_known_category(category) {
        errors.push(format!(
            "Invalid category: {}. Must be one of: {}",
            category,
            category_ids()
        ));
    }

    let image = cell(row, header.index_of("image")).unwrap_or_default();
    if !image.is_empty() && Url::parse(image).is_err() {
        errors.push(format!("Invalid image URL: {}", image));
    }

    let featured = match cell(row, header.index_of(FEATURED_COLUMN)).unwrap_or_default() {
        "" => false,
        value if value.eq_ignore_ascii_case("true") => true,
        value if value.eq_ignore_ascii_case("false") => false,
        value => {
            errors.push(format!("Featured field must be 'true' or 'false', got: {}", value));
            false
        }
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    let field = |column: &str| cell(row, header.index_of(column)).unwrap_or_default().to_string();
    Ok(ArticleDraft {
        title: field("title"),
        excerpt: field("excerpt"),
        content: field("content"),
        category: field("category"),
        image: field("image"),
        author: field("author"),
        read_time: field("readTime"),
        featured,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn full_header() -> Header {
        Header::new(&strings(&[
            "title", "excerpt", "content", "category", "image", "author", "readTime", "featured",
        ]))
    }

    fn valid_row(featured: &str) -> Vec<String> {
        strings(&[
            "Title",
            "Excerpt",
            "Body",
            "technology_ai",
            "https://example.com/a.jpg",
            "Jane",
            "3 min read",
            featured,
        ])
    }

    #[test]
    fn test_valid_row_builds_draft() {
        let draft = validate_row(&full_header(), &valid_row("true")).unwrap();

        assert_eq!(draft.title, "Title");
        assert_eq!(draft.read_time, "3 min read");
        assert!(draft.featured);
    }

    #[test]
    fn test_featured_is_case_insensitive() {
        for value in ["TRUE", "true", "True"] {
            assert!(validate_row(&full_header(), &valid_row(value)).unwrap().featured);
        }
        assert!(!validate_row(&full_header(), &valid_row("FALSE")).unwrap().featured);
    }

    #[test]
    fn test_blank_featured_means_false() {
        assert!(!validate_row(&full_header(), &valid_row("")).unwrap().featured);
    }

    #[test]
    fn test_featured_yes_is_rejected() {
        let errors = validate_row(&full_header(), &valid_row("yes")).unwrap_err();

        assert_eq!(errors, vec!["Featured field must be 'true' or 'false', got: yes"]);
    }

    #[test]
    fn test_missing_featured_column_means_false() {
        let header = Header::new(&strings(&[
            "title", "excerpt", "content", "category", "image", "author", "readTime",
        ]));
        let mut row = valid_row("");
        row.pop();

        assert!(!validate_row(&header, &row).unwrap().featured);
    }

    #[test]
    fn test_column_order_does_not_matter() {
        let header = Header::new(&strings(&[
            "readTime", "author", "image", "category", "content", "excerpt", "title",
        ]));
        let row = strings(&[
            "2 min read",
            "Sam",
            "https://example.com/b.png",
            "regional",
            "Body",
            "Excerpt",
            "Headline",
        ]);

        let draft = validate_row(&header, &row).unwrap();

        assert_eq!(draft.title, "Headline");
        assert_eq!(draft.author, "Sam");
        assert_eq!(draft.category, "regional");
    }

    #[test]
    fn test_missing_column_and_values_are_all_reported() {
        let header = Header::new(&strings(&["title", "excerpt", "content", "category", "image", "author"]));
        let row = strings(&["", "Excerpt", "Body", "regional", "https://example.com/x.png", ""]);

        let errors = validate_row(&header, &row).unwrap_err();

        assert_eq!(
            errors,
            vec![
                "Missing value for title",
                "Missing value for author",
                "Missing required column: readTime",
            ]
        );
    }

    #[test]
    fn test_invalid_category_lists_allowed_ids() {
        let mut row = valid_row("false");
        row[3] = "sports".to_string();

        let errors = validate_row(&full_header(), &row).unwrap_err();

        assert_eq!(
            errors,
            vec!["Invalid category: sports. Must be one of: finance_crypto, technology_ai, health_wellness, green_tech, regional"]
        );
    }

    #[test]
    fn test_relative_image_url_is_rejected() {
        let mut row = valid_row("false");
        row[4] = "images/photo.jpg".to_string();

        let errors = validate_row(&full_header(), &row).unwrap_err();

        assert_eq!(errors, vec!["Invalid image URL: images/photo.jpg"]);
    }

    #[test]
    fn test_short_row_reports_missing_values() {
        let row = strings(&["Title", "Excerpt"]);

        let errors = validate_row(&full_header(), &row).unwrap_err();

        assert!(errors.contains(&"Missing value for content".to_string()));
        assert!(errors.contains(&"Missing value for readTime".to_string()));
    }
}
