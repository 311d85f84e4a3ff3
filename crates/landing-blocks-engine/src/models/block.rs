use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of block types a landing page is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Hero,
    Text,
    Image,
    Features,
    Cta,
    Testimonial,
}

impl BlockKind {
    /// Every kind, in the order the editor offers them
    pub const ALL: [BlockKind; 6] = [
        BlockKind::Hero,
        BlockKind::Text,
        BlockKind::Image,
        BlockKind::Features,
        BlockKind::Cta,
        BlockKind::Testimonial,
    ];

    /// Wire tag, also used as the prefix of generated block ids
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Hero => "hero",
            BlockKind::Text => "text",
            BlockKind::Image => "image",
            BlockKind::Features => "features",
            BlockKind::Cta => "cta",
            BlockKind::Testimonial => "testimonial",
        }
    }

    /// Human readable name for menus
    pub fn label(&self) -> &'static str {
        match self {
            BlockKind::Hero => "Hero Section",
            BlockKind::Text => "Text Block",
            BlockKind::Image => "Image",
            BlockKind::Features => "Features Grid",
            BlockKind::Cta => "Call to Action",
            BlockKind::Testimonial => "Testimonial",
        }
    }

    /// Content a freshly added block of this kind starts with
    pub fn default_content(self) -> BlockContent {
        match self {
            BlockKind::Hero => BlockContent::Hero(HeroContent::default()),
            BlockKind::Text => BlockContent::Text(TextContent::default()),
            BlockKind::Image => BlockContent::Image(ImageContent::default()),
            BlockKind::Features => BlockContent::Features(FeaturesContent::default()),
            BlockKind::Cta => BlockContent::Cta(CtaContent::default()),
            BlockKind::Testimonial => BlockContent::Testimonial(TestimonialContent::default()),
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown block type: {0}")]
pub struct ParseKindError(pub String);

impl FromStr for BlockKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseKindError(s.to_string()))
    }
}

/// Identifier of a block, unique within one page and stable across reorders
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl PartialEq<str> for BlockId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for BlockId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    Small,
    Medium,
    Large,
    Full,
}

const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroContent {
    pub heading: String,
    pub subheading: String,
    pub cta_text: String,
    pub cta_link: String,
    pub image_url: String,
}

impl Default for HeroContent {
    fn default() -> Self {
        Self {
            heading: "Welcome to Our Platform".to_string(),
            subheading: "The best solution for your needs".to_string(),
            cta_text: "Get Started".to_string(),
            cta_link: "/signup".to_string(),
            image_url: PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
}

impl Default for TextContent {
    fn default() -> Self {
        Self {
            heading: Some("Section Heading".to_string()),
            content: "Add your content here. This text block supports paragraphs of copy."
                .to_string(),
            alignment: Some(Alignment::Left),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageContent {
    pub image_url: String,
    pub alt_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<ImageSize>,
}

impl Default for ImageContent {
    fn default() -> Self {
        Self {
            image_url: PLACEHOLDER_IMAGE.to_string(),
            alt_text: "Image description".to_string(),
            caption: Some("Image caption".to_string()),
            size: Some(ImageSize::Large),
        }
    }
}

/// One entry of a features grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureItem {
    pub title: String,
    pub description: String,
}

impl FeatureItem {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturesContent {
    pub heading: String,
    pub items: Vec<FeatureItem>,
}

impl Default for FeaturesContent {
    fn default() -> Self {
        Self {
            heading: "Our Features".to_string(),
            items: (1..=3)
                .map(|n| FeatureItem::new(format!("Feature {n}"), format!("Description of feature {n}")))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CtaContent {
    pub heading: String,
    pub text: String,
    pub button_text: String,
    pub button_link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_width: Option<bool>,
}

impl Default for CtaContent {
    fn default() -> Self {
        Self {
            heading: "Ready to get started?".to_string(),
            text: "Join thousands of satisfied customers today.".to_string(),
            button_text: "Sign Up Now".to_string(),
            button_link: "/signup".to_string(),
            full_width: Some(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialContent {
    pub quote: String,
    pub author: String,
    pub position: String,
    pub image_url: String,
}

impl Default for TestimonialContent {
    fn default() -> Self {
        Self {
            quote: "This product has completely transformed how our team works.".to_string(),
            author: "Jane Doe".to_string(),
            position: "CEO, Company".to_string(),
            image_url: PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

/// Typed content of a block; the variant is the block's kind
#[derive(Debug, Clone, PartialEq)]
pub enum BlockContent {
    Hero(HeroContent),
    Text(TextContent),
    Image(ImageContent),
    Features(FeaturesContent),
    Cta(CtaContent),
    Testimonial(TestimonialContent),
}

impl BlockContent {
    pub fn kind(&self) -> BlockKind {
        match self {
            BlockContent::Hero(_) => BlockKind::Hero,
            BlockContent::Text(_) => BlockKind::Text,
            BlockContent::Image(_) => BlockKind::Image,
            BlockContent::Features(_) => BlockKind::Features,
            BlockContent::Cta(_) => BlockKind::Cta,
            BlockContent::Testimonial(_) => BlockKind::Testimonial,
        }
    }

    /// Content as a JSON object keyed by wire field names
    pub fn to_json(&self) -> serde_json::Value {
        let value = match self {
            BlockContent::Hero(c) => serde_json::to_value(c),
            BlockContent::Text(c) => serde_json::to_value(c),
            BlockContent::Image(c) => serde_json::to_value(c),
            BlockContent::Features(c) => serde_json::to_value(c),
            BlockContent::Cta(c) => serde_json::to_value(c),
            BlockContent::Testimonial(c) => serde_json::to_value(c),
        };
        // Plain structs of strings, bools and vecs always serialize
        value.unwrap_or(serde_json::Value::Null)
    }

    /// Parse content of the given kind from a JSON object
    pub fn from_json(kind: BlockKind, value: serde_json::Value) -> serde_json::Result<Self> {
        Ok(match kind {
            BlockKind::Hero => BlockContent::Hero(serde_json::from_value(value)?),
            BlockKind::Text => BlockContent::Text(serde_json::from_value(value)?),
            BlockKind::Image => BlockContent::Image(serde_json::from_value(value)?),
            BlockKind::Features => BlockContent::Features(serde_json::from_value(value)?),
            BlockKind::Cta => BlockContent::Cta(serde_json::from_value(value)?),
            BlockKind::Testimonial => BlockContent::Testimonial(serde_json::from_value(value)?),
        })
    }
}

/// A single content unit on a page
///
/// Serialized as `{"id": ..., "type": ..., "content": {...}}`, the shape the
/// web editor has always persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "BlockRecord", try_from = "BlockRecord")]
pub struct Block {
    pub id: BlockId,
    pub content: BlockContent,
}

impl Block {
    pub fn new(id: BlockId, content: BlockContent) -> Self {
        Self { id, content }
    }

    pub fn kind(&self) -> BlockKind {
        self.content.kind()
    }
}

#[derive(Serialize, Deserialize)]
struct BlockRecord {
    id: BlockId,
    #[serde(rename = "type")]
    kind: BlockKind,
    content: serde_json::Value,
}

impl From<Block> for BlockRecord {
    fn from(block: Block) -> Self {
        BlockRecord {
            kind: block.kind(),
            content: block.content.to_json(),
            id: block.id,
        }
    }
}

impl TryFrom<BlockRecord> for Block {
    type Error = serde_json::Error;

    fn try_from(record: BlockRecord) -> Result<Self, Self::Error> {
        let content = BlockContent::from_json(record.kind, record.content)?;
        Ok(Block::new(record.id, content))
    }
}
