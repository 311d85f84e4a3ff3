//! Editor form contract
//!
//! Describes which fields a block kind exposes for editing and turns single
//! field edits into `ContentPatch` values for `Document::update_block_content`.

use serde_json::{Map, Value};

use crate::editing::{ContentPatch, EditError, FeaturesPatch};
use crate::models::{BlockContent, BlockKind, FeatureItem, FeaturesContent};

/// How a field is edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    SingleLine,
    MultiLine,
    /// One of a fixed set of wire values
    Choice(&'static [&'static str]),
    Toggle,
    /// The features `items` list
    ItemList,
}

/// One editable field of a block kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire (camelCase) key in the block content
    pub key: &'static str,
    pub label: &'static str,
    pub widget: Widget,
}

const fn field(key: &'static str, label: &'static str, widget: Widget) -> FieldSpec {
    FieldSpec { key, label, widget }
}

const ALIGNMENTS: &[&str] = &["left", "center", "right"];
const IMAGE_SIZES: &[&str] = &["small", "medium", "large", "full"];

const HERO_FIELDS: &[FieldSpec] = &[
    field("heading", "Heading", Widget::SingleLine),
    field("subheading", "Subheading", Widget::MultiLine),
    field("ctaText", "Button Text", Widget::SingleLine),
    field("ctaLink", "Button Link", Widget::SingleLine),
    field("imageUrl", "Image URL", Widget::SingleLine),
];

const TEXT_FIELDS: &[FieldSpec] = &[
    field("heading", "Heading", Widget::SingleLine),
    field("content", "Content", Widget::MultiLine),
    field("alignment", "Alignment", Widget::Choice(ALIGNMENTS)),
];

const IMAGE_FIELDS: &[FieldSpec] = &[
    field("imageUrl", "Image URL", Widget::SingleLine),
    field("altText", "Alt Text", Widget::SingleLine),
    field("caption", "Caption", Widget::SingleLine),
    field("size", "Size", Widget::Choice(IMAGE_SIZES)),
];

const FEATURES_FIELDS: &[FieldSpec] = &[
    field("heading", "Section Heading", Widget::SingleLine),
    field("items", "Features", Widget::ItemList),
];

const CTA_FIELDS: &[FieldSpec] = &[
    field("heading", "Heading", Widget::SingleLine),
    field("text", "Text", Widget::MultiLine),
    field("buttonText", "Button Text", Widget::SingleLine),
    field("buttonLink", "Button Link", Widget::SingleLine),
    field("fullWidth", "Full Width", Widget::Toggle),
];

const TESTIMONIAL_FIELDS: &[FieldSpec] = &[
    field("quote", "Quote", Widget::MultiLine),
    field("author", "Author", Widget::SingleLine),
    field("position", "Position", Widget::SingleLine),
    field("imageUrl", "Author Image URL", Widget::SingleLine),
];

/// Editable fields of `kind`, in form order
pub fn fields(kind: BlockKind) -> &'static [FieldSpec] {
    match kind {
        BlockKind::Hero => HERO_FIELDS,
        BlockKind::Text => TEXT_FIELDS,
        BlockKind::Image => IMAGE_FIELDS,
        BlockKind::Features => FEATURES_FIELDS,
        BlockKind::Cta => CTA_FIELDS,
        BlockKind::Testimonial => TESTIMONIAL_FIELDS,
    }
}

pub fn field_spec(kind: BlockKind, key: &str) -> Option<&'static FieldSpec> {
    fields(kind).iter().find(|spec| spec.key == key)
}

/// Current value of field `key`, `None` when unset or unknown
pub fn field_value(content: &BlockContent, key: &str) -> Option<Value> {
    match content.to_json() {
        Value::Object(mut map) => map.remove(key),
        _ => None,
    }
}

/// Patch setting a single field of a block of `kind`
pub fn set_field(kind: BlockKind, key: &str, value: Value) -> Result<ContentPatch, EditError> {
    if field_spec(kind, key).is_none() {
        return Err(EditError::UnknownField {
            kind,
            field: key.to_string(),
        });
    }

    let mut map = Map::new();
    map.insert(key.to_string(), value);
    ContentPatch::from_json(kind, Value::Object(map))
}

/// Patch appending a placeholder item to a features list
pub fn add_feature_item(content: &FeaturesContent) -> ContentPatch {
    let mut items = content.items.clone();
    items.push(FeatureItem::new("New Feature", "Describe this feature"));
    replace_items(items)
}

/// Patch removing the item at `index` from a features list
pub fn remove_feature_item(
    content: &FeaturesContent,
    index: usize,
) -> Result<ContentPatch, EditError> {
    if index >= content.items.len() {
        return Err(EditError::ItemOutOfRange {
            index,
            len: content.items.len(),
        });
    }

    let mut items = content.items.clone();
    items.remove(index);
    Ok(replace_items(items))
}

fn replace_items(items: Vec<FeatureItem>) -> ContentPatch {
    ContentPatch::Features(FeaturesPatch {
        heading: None,
        items: Some(items),
    })
}
