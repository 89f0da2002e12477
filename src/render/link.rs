//! Choosing where the thumbnail links to.
//!
//! Exactly one rule applies, checked in this order:
//!
//! | Option         | href                         | title                   |
//! |----------------|------------------------------|-------------------------|
//! | `custom_url`   | the URL                      | `title` if given        |
//! | `custom_title` | the page URL                 | `title`, else page name |
//! | `desc_link`    | description page (+ query)   | `title` if given        |
//! | `file_link`    | the file itself              | none                    |
//! | (none)         | empty                        | none                    |

use crate::utils::html::Attrs;

use super::SourceFile;

/// A link to a named page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleLink {
    pub url: String,
    pub full_text: String,
}

/// Link-selection inputs of a render call. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkOptions {
    pub custom_url: Option<String>,
    pub custom_title: Option<TitleLink>,
    pub desc_link: bool,
    /// Query string appended to the description page URL.
    pub desc_query: Option<String>,
    pub file_link: bool,
    /// Explicit link title.
    pub title: Option<String>,
}

/// Resolved `<a>` attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkAttribs {
    pub href: String,
    pub title: Option<String>,
    pub class: Option<String>,
}

impl LinkOptions {
    /// Apply the first matching rule.
    pub fn select(&self, source: &SourceFile) -> LinkAttribs {
        let title = non_empty(self.title.as_deref()).map(str::to_string);

        if let Some(url) = non_empty(self.custom_url.as_deref()) {
            return LinkAttribs {
                href: url.to_string(),
                title,
                class: None,
            };
        }
        if let Some(page) = &self.custom_title
            && !page.url.is_empty()
        {
            return LinkAttribs {
                href: page.url.clone(),
                title: title.or_else(|| Some(page.full_text.clone())),
                class: None,
            };
        }
        if self.desc_link {
            return LinkAttribs {
                href: with_query(&source.desc_url, self.desc_query.as_deref()),
                title,
                class: Some("image".to_string()),
            };
        }
        if self.file_link {
            return LinkAttribs {
                href: source.file_url.clone(),
                ..Default::default()
            };
        }
        LinkAttribs::default()
    }
}

impl LinkAttribs {
    /// Whether there is anything to link to.
    #[inline]
    pub fn has_target(&self) -> bool {
        !self.href.is_empty()
    }

    pub fn to_attrs(&self) -> Attrs {
        let mut attrs = Attrs::new().with("href", &self.href);
        if let Some(title) = &self.title {
            attrs.set("title", title);
        }
        if let Some(class) = &self.class {
            attrs.set("class", class);
        }
        attrs
    }
}

#[inline]
fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

fn with_query(url: &str, query: Option<&str>) -> String {
    match non_empty(query) {
        Some(q) => {
            let sep = if url.contains('?') { '&' } else { '?' };
            format!("{url}{sep}{q}")
        }
        None => url.to_string(),
    }
}
