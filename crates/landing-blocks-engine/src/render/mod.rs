//! Read-only HTML preview of blocks
//!
//! Rendering is keyed on the block kind and only reads the fields each kind
//! defines. All text goes through `html-escape`, so user content can never
//! inject markup into the preview.

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use std::fmt::Write;

use crate::editing::Document;
use crate::models::{Alignment, Block, BlockContent, ImageSize};

/// Render one block as an HTML fragment
pub fn render_block(block: &Block) -> String {
    let mut out = String::new();
    let kind = block.kind();
    let _ = write!(
        out,
        r#"<section class="block block-{kind}" data-block-id="{}">"#,
        attr(block.id.as_str())
    );

    match &block.content {
        BlockContent::Hero(hero) => {
            let _ = write!(
                out,
                r#"<h1>{}</h1><p>{}</p><a class="button" href="{}">{}</a><img src="{}" alt="">"#,
                text(&hero.heading),
                text(&hero.subheading),
                attr(&hero.cta_link),
                text(&hero.cta_text),
                attr(&hero.image_url),
            );
        }
        BlockContent::Text(body) => {
            let align = match body.alignment.unwrap_or(Alignment::Left) {
                Alignment::Left => "left",
                Alignment::Center => "center",
                Alignment::Right => "right",
            };
            let _ = write!(out, r#"<div class="align-{align}">"#);
            if let Some(heading) = &body.heading {
                let _ = write!(out, "<h2>{}</h2>", text(heading));
            }
            let _ = write!(out, "<p>{}</p></div>", text(&body.content));
        }
        BlockContent::Image(image) => {
            let size = match image.size.unwrap_or(ImageSize::Large) {
                ImageSize::Small => "small",
                ImageSize::Medium => "medium",
                ImageSize::Large => "large",
                ImageSize::Full => "full",
            };
            let _ = write!(
                out,
                r#"<figure class="size-{size}"><img src="{}" alt="{}">"#,
                attr(&image.image_url),
                attr(&image.alt_text),
            );
            if let Some(caption) = &image.caption {
                let _ = write!(out, "<figcaption>{}</figcaption>", text(caption));
            }
            out.push_str("</figure>");
        }
        BlockContent::Features(features) => {
            let _ = write!(out, "<h2>{}</h2><ul>", text(&features.heading));
            for item in &features.items {
                let _ = write!(
                    out,
                    "<li><h3>{}</h3><p>{}</p></li>",
                    text(&item.title),
                    text(&item.description)
                );
            }
            out.push_str("</ul>");
        }
        BlockContent::Cta(cta) => {
            let width = if cta.full_width.unwrap_or(false) {
                " full-width"
            } else {
                ""
            };
            let _ = write!(
                out,
                r#"<div class="cta{width}"><h2>{}</h2><p>{}</p><a class="button" href="{}">{}</a></div>"#,
                text(&cta.heading),
                text(&cta.text),
                attr(&cta.button_link),
                text(&cta.button_text),
            );
        }
        BlockContent::Testimonial(testimonial) => {
            let _ = write!(
                out,
                r#"<blockquote><p>{}</p></blockquote><img src="{}" alt="{}"><cite>{}, {}</cite>"#,
                text(&testimonial.quote),
                attr(&testimonial.image_url),
                attr(&testimonial.author),
                text(&testimonial.author),
                text(&testimonial.position),
            );
        }
    }

    out.push_str("</section>");
    out
}

/// Render every block of the page in order; the title is not rendered
pub fn render_page(doc: &Document) -> String {
    doc.blocks()
        .iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::{ContentPatch, TextPatch};
    use crate::models::{BlockId, BlockKind, FeatureItem, FeaturesContent};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_features_render_items_in_order() {
        let block = Block::new(
            BlockId::new("features-1"),
            BlockContent::Features(FeaturesContent {
                heading: "Why us".to_string(),
                items: vec![FeatureItem::new("Fast", "Quick"), FeatureItem::new("Safe", "Sound")],
            }),
        );

        insta::assert_snapshot!(
            render_block(&block),
            @r#"<section class="block block-features" data-block-id="features-1"><h2>Why us</h2><ul><li><h3>Fast</h3><p>Quick</p></li><li><h3>Safe</h3><p>Sound</p></li></ul></section>"#
        );
    }

    #[test]
    fn test_text_without_heading_omits_it() {
        let block = Block::new(
            BlockId::new("text-1"),
            BlockContent::Text(crate::models::TextContent {
                heading: None,
                content: "Body".to_string(),
                alignment: None,
            }),
        );

        assert_eq!(
            render_block(&block),
            r#"<section class="block block-text" data-block-id="text-1"><div class="align-left"><p>Body</p></div></section>"#
        );
    }

    #[test]
    fn test_user_content_is_escaped() {
        let mut doc = Document::new("Escaping");
        doc.add_block(BlockKind::Text);
        doc.update_block_content(
            "text-1",
            ContentPatch::Text(TextPatch {
                content: Some("<script>alert(1)</script>".to_string()),
                ..Default::default()
            }),
        )
        .unwrap();

        let html = render_page(&doc);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_page_renders_blocks_in_order_without_title() {
        let mut doc = Document::new("Secret internal title");
        doc.add_block(BlockKind::Cta);
        doc.add_block(BlockKind::Hero);

        let html = render_page(&doc);
        let lines: Vec<_> = html.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("block-cta"));
        assert!(lines[1].contains("block-hero"));
        assert!(!html.contains("Secret internal title"));
    }

    #[test]
    fn test_full_width_cta_gets_class() {
        let mut doc = Document::new("Cta");
        doc.add_block(BlockKind::Cta);
        doc.update_block_content(
            "cta-1",
            ContentPatch::from_json(BlockKind::Cta, serde_json::json!({ "fullWidth": true }))
                .unwrap(),
        )
        .unwrap();

        assert!(render_page(&doc).contains(r#"class="cta full-width""#));
    }

    #[test]
    fn test_empty_page_renders_nothing() {
        assert_eq!(render_page(&Document::new("Empty")), "");
    }
}
