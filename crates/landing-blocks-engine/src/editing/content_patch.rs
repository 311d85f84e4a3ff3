use serde::Deserialize;

use crate::editing::EditError;
use crate::models::{
    Alignment, BlockContent, BlockKind, CtaContent, FeatureItem, FeaturesContent, HeroContent,
    ImageContent, ImageSize, TestimonialContent, TextContent,
};

/// Partial update of a hero block; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroPatch {
    pub heading: Option<String>,
    pub subheading: Option<String>,
    pub cta_text: Option<String>,
    pub cta_link: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextPatch {
    pub heading: Option<String>,
    pub content: Option<String>,
    pub alignment: Option<Alignment>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePatch {
    pub image_url: Option<String>,
    pub alt_text: Option<String>,
    pub caption: Option<String>,
    pub size: Option<ImageSize>,
}

/// Partial update of a features block
///
/// `items` replaces the whole list; merging is shallow.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturesPatch {
    pub heading: Option<String>,
    pub items: Option<Vec<FeatureItem>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CtaPatch {
    pub heading: Option<String>,
    pub text: Option<String>,
    pub button_text: Option<String>,
    pub button_link: Option<String>,
    pub full_width: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialPatch {
    pub quote: Option<String>,
    pub author: Option<String>,
    pub position: Option<String>,
    pub image_url: Option<String>,
}

/// Shallow, typed partial update of a block's content
#[derive(Debug, Clone, PartialEq)]
pub enum ContentPatch {
    Hero(HeroPatch),
    Text(TextPatch),
    Image(ImagePatch),
    Features(FeaturesPatch),
    Cta(CtaPatch),
    Testimonial(TestimonialPatch),
}

fn set<T>(field: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *field = value;
    }
}

fn set_optional<T>(field: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *field = value;
    }
}

impl ContentPatch {
    pub fn kind(&self) -> BlockKind {
        match self {
            ContentPatch::Hero(_) => BlockKind::Hero,
            ContentPatch::Text(_) => BlockKind::Text,
            ContentPatch::Image(_) => BlockKind::Image,
            ContentPatch::Features(_) => BlockKind::Features,
            ContentPatch::Cta(_) => BlockKind::Cta,
            ContentPatch::Testimonial(_) => BlockKind::Testimonial,
        }
    }

    /// Build a patch from a loose JSON object such as a form submission
    ///
    /// Keys use the wire (camelCase) names. Keys the kind does not know are
    /// ignored; a known key with a value of the wrong type is an error.
    pub fn from_json(kind: BlockKind, value: serde_json::Value) -> Result<Self, EditError> {
        let invalid = |err: serde_json::Error| EditError::InvalidValue {
            kind,
            message: err.to_string(),
        };
        Ok(match kind {
            BlockKind::Hero => ContentPatch::Hero(serde_json::from_value(value).map_err(invalid)?),
            BlockKind::Text => ContentPatch::Text(serde_json::from_value(value).map_err(invalid)?),
            BlockKind::Image => {
                ContentPatch::Image(serde_json::from_value(value).map_err(invalid)?)
            }
            BlockKind::Features => {
                ContentPatch::Features(serde_json::from_value(value).map_err(invalid)?)
            }
            BlockKind::Cta => ContentPatch::Cta(serde_json::from_value(value).map_err(invalid)?),
            BlockKind::Testimonial => {
                ContentPatch::Testimonial(serde_json::from_value(value).map_err(invalid)?)
            }
        })
    }

    /// Merge this patch into `content`
    ///
    /// Fails without touching `content` when the kinds differ.
    pub fn apply_to(self, content: &mut BlockContent) -> Result<(), EditError> {
        match (self, content) {
            (ContentPatch::Hero(patch), BlockContent::Hero(c)) => patch.merge(c),
            (ContentPatch::Text(patch), BlockContent::Text(c)) => patch.merge(c),
            (ContentPatch::Image(patch), BlockContent::Image(c)) => patch.merge(c),
            (ContentPatch::Features(patch), BlockContent::Features(c)) => patch.merge(c),
            (ContentPatch::Cta(patch), BlockContent::Cta(c)) => patch.merge(c),
            (ContentPatch::Testimonial(patch), BlockContent::Testimonial(c)) => patch.merge(c),
            (patch, content) => {
                return Err(EditError::KindMismatch {
                    block: content.kind(),
                    patch: patch.kind(),
                });
            }
        }
        Ok(())
    }
}

impl HeroPatch {
    fn merge(self, c: &mut HeroContent) {
        set(&mut c.heading, self.heading);
        set(&mut c.subheading, self.subheading);
        set(&mut c.cta_text, self.cta_text);
        set(&mut c.cta_link, self.cta_link);
        set(&mut c.image_url, self.image_url);
    }
}

impl TextPatch {
    fn merge(self, c: &mut TextContent) {
        set_optional(&mut c.heading, self.heading);
        set(&mut c.content, self.content);
        set_optional(&mut c.alignment, self.alignment);
    }
}

impl ImagePatch {
    fn merge(self, c: &mut ImageContent) {
        set(&mut c.image_url, self.image_url);
        set(&mut c.alt_text, self.alt_text);
        set_optional(&mut c.caption, self.caption);
        set_optional(&mut c.size, self.size);
    }
}

impl FeaturesPatch {
    fn merge(self, c: &mut FeaturesContent) {
        set(&mut c.heading, self.heading);
        set(&mut c.items, self.items);
    }
}

impl CtaPatch {
    fn merge(self, c: &mut CtaContent) {
        set(&mut c.heading, self.heading);
        set(&mut c.text, self.text);
        set(&mut c.button_text, self.button_text);
        set(&mut c.button_link, self.button_link);
        set_optional(&mut c.full_width, self.full_width);
    }
}

impl TestimonialPatch {
    fn merge(self, c: &mut TestimonialContent) {
        set(&mut c.quote, self.quote);
        set(&mut c.author, self.author);
        set(&mut c.position, self.position);
        set(&mut c.image_url, self.image_url);
    }
}

impl From<HeroPatch> for ContentPatch {
    fn from(patch: HeroPatch) -> Self {
        ContentPatch::Hero(patch)
    }
}

impl From<TextPatch> for ContentPatch {
    fn from(patch: TextPatch) -> Self {
        ContentPatch::Text(patch)
    }
}

impl From<ImagePatch> for ContentPatch {
    fn from(patch: ImagePatch) -> Self {
        ContentPatch::Image(patch)
    }
}

impl From<FeaturesPatch> for ContentPatch {
    fn from(patch: FeaturesPatch) -> Self {
        ContentPatch::Features(patch)
    }
}

impl From<CtaPatch> for ContentPatch {
    fn from(patch: CtaPatch) -> Self {
        ContentPatch::Cta(patch)
    }
}

impl From<TestimonialPatch> for ContentPatch {
    fn from(patch: TestimonialPatch) -> Self {
        ContentPatch::Testimonial(patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_hero_patch_only_touches_given_fields() {
        let mut content = BlockKind::Hero.default_content();
        let patch = ContentPatch::from(HeroPatch {
            heading: Some("X".to_string()),
            ..Default::default()
        });

        patch.apply_to(&mut content).unwrap();

        let expected = HeroContent {
            heading: "X".to_string(),
            ..HeroContent::default()
        };
        assert_eq!(content, BlockContent::Hero(expected));
    }

    #[test]
    fn test_kind_mismatch_leaves_content_untouched() {
        let mut content = BlockKind::Cta.default_content();
        let before = content.clone();

        let result = ContentPatch::from(TextPatch::default()).apply_to(&mut content);

        assert!(matches!(
            result,
            Err(EditError::KindMismatch {
                block: BlockKind::Cta,
                patch: BlockKind::Text
            })
        ));
        assert_eq!(content, before);
    }

    #[test]
    fn test_from_json_ignores_unknown_keys() {
        let patch = ContentPatch::from_json(
            BlockKind::Cta,
            json!({ "buttonText": "Buy", "colour": "red" }),
        )
        .unwrap();

        assert_eq!(
            patch,
            ContentPatch::Cta(CtaPatch {
                button_text: Some("Buy".to_string()),
                ..Default::default()
            })
        );
    }

    #[test]
    fn test_from_json_rejects_wrong_value_type() {
        let result = ContentPatch::from_json(BlockKind::Cta, json!({ "fullWidth": "yes" }));
        assert!(matches!(
            result,
            Err(EditError::InvalidValue {
                kind: BlockKind::Cta,
                ..
            })
        ));
    }

    #[test]
    fn test_features_items_are_replaced_wholesale() {
        let mut content = BlockKind::Features.default_content();
        let patch = ContentPatch::from_json(
            BlockKind::Features,
            json!({ "items": [{ "title": "Only", "description": "One left" }] }),
        )
        .unwrap();

        patch.apply_to(&mut content).unwrap();

        let BlockContent::Features(features) = content else {
            panic!("expected features content");
        };
        assert_eq!(features.heading, "Our Features");
        assert_eq!(features.items, vec![FeatureItem::new("Only", "One left")]);
    }
}
