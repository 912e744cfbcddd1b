use serde_json::Value;

/// Which attribute a meta element is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaAttribute {
    Name,
    Property,
}

impl MetaAttribute {
    /// Attribute used when creating an element for `key`: namespaced social
    /// keys are property-keyed, everything else name-keyed.
    pub fn for_key(key: &str) -> Self {
        if key.starts_with("og:") || key.starts_with("twitter:") {
            MetaAttribute::Property
        } else {
            MetaAttribute::Name
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MetaAttribute::Name => "name",
            MetaAttribute::Property => "property",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaTag {
    pub attribute: MetaAttribute,
    pub key: String,
    pub content: String,
}

/// Document-level metadata for one page load.
///
/// Elements are keyed by `(attribute, key)`. Writers go through `upsert`,
/// which updates in place and never duplicates a key; the structured-data
/// block is a single slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataSurface {
    title: Option<String>,
    tags: Vec<MetaTag>,
    structured_data: Option<Value>,
}

impl MetadataSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an element as it exists in the page shell, keeping its
    /// attribute. Later upserts update it in place.
    pub fn with_tag(mut self, attribute: MetaAttribute, key: &str, content: &str) -> Self {
        match self.position_exact(attribute, key) {
            Some(i) => self.tags[i].content = content.to_string(),
            None => self.tags.push(MetaTag {
                attribute,
                key: key.to_string(),
                content: content.to_string(),
            }),
        }
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: String) {
        self.title = Some(title);
    }

    pub fn tags(&self) -> &[MetaTag] {
        &self.tags
    }

    /// Content stored for `key`, property-keyed element first.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.position(key).map(|i| self.tags[i].content.as_str())
    }

    pub fn get_tag(&self, key: &str) -> Option<&MetaTag> {
        self.position(key).map(|i| &self.tags[i])
    }

    pub fn count(&self, key: &str) -> usize {
        self.tags.iter().filter(|t| t.key == key).count()
    }

    pub fn upsert(&mut self, key: &str, content: &str) {
        match self.position(key) {
            Some(i) => self.tags[i].content = content.to_string(),
            None => self.tags.push(MetaTag {
                attribute: MetaAttribute::for_key(key),
                key: key.to_string(),
                content: content.to_string(),
            }),
        }
    }

    pub fn structured_data(&self) -> Option<&Value> {
        self.structured_data.as_ref()
    }

    /// Drop the current structured-data block and install `block`.
    pub fn replace_structured_data(&mut self, block: Value) -> Option<Value> {
        let previous = self.structured_data.take();
        self.structured_data = Some(block);
        previous
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.position_exact(MetaAttribute::Property, key)
            .or_else(|| self.position_exact(MetaAttribute::Name, key))
    }

    fn position_exact(&self, attribute: MetaAttribute, key: &str) -> Option<usize> {
        self.tags
            .iter()
            .position(|t| t.attribute == attribute && t.key == key)
    }
}
