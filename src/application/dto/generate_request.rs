use crate::inventory::domain::{Filter, ImagePurlScheme};

/// GenerateRequest - Internal request DTO for the inventory generation use case
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Which resources and namespaces are collected
    pub filter: Filter,
    /// Whether entries are sorted before the inventory is returned
    pub sort: bool,
    /// How container image identifiers are built
    pub image_scheme: ImagePurlScheme,
}

impl GenerateRequest {
    pub fn new(filter: Filter, sort: bool, image_scheme: ImagePurlScheme) -> Self {
        Self {
            filter,
            sort,
            image_scheme,
        }
    }
}

impl Default for GenerateRequest {
    fn default() -> Self {
        Self::new(Filter::include_all(), false, ImagePurlScheme::default())
    }
}
