//! Editing sessions driven end to end through the public API: open a page,
//! edit it the way the editor UI does, save it and reopen it from disk.

use landing_blocks_engine::editing::{Cmd, Direction, Document};
use landing_blocks_engine::form;
use landing_blocks_engine::io::{FileStore, PageStore};
use landing_blocks_engine::models::{BlockContent, BlockId, BlockKind};
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn test_edit_save_and_reopen_from_disk() {
    let pages_dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(pages_dir.path());

    let mut doc = Document::new("Spring launch");
    doc.add_block(BlockKind::Hero);
    doc.add_block(BlockKind::Features);
    doc.add_block(BlockKind::Testimonial);

    let patch = form::set_field(BlockKind::Hero, "heading", json!("Launch day")).unwrap();
    doc.update_block_content("hero-1", patch).unwrap();

    let BlockContent::Features(features) = &doc.block("features-1").unwrap().content else {
        panic!("expected features content");
    };
    let patch = form::remove_feature_item(features, 1).unwrap();
    doc.update_block_content("features-1", patch).unwrap();

    doc.move_block("testimonial-1", Direction::Up).unwrap();
    assert!(doc.is_dirty());

    doc.save(&store).await.unwrap();
    assert!(!doc.is_dirty());

    let reopened = Document::load(&store, &doc.id()).await.unwrap();
    assert_eq!(reopened.title(), "Spring launch");
    assert_eq!(reopened.blocks(), doc.blocks());
    assert!(!reopened.is_dirty());

    let order: Vec<_> = reopened.blocks().iter().map(|b| b.id.as_str()).collect();
    assert_eq!(order, vec!["hero-1", "testimonial-1", "features-1"]);
}

#[tokio::test]
async fn test_saved_file_uses_web_editor_shape() {
    let pages_dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(pages_dir.path());

    let mut doc = Document::new("Shape");
    doc.add_block(BlockKind::Cta);
    doc.select_block(Some("cta-1")).unwrap();
    doc.save(&store).await.unwrap();

    let path = pages_dir.path().join(format!("{}.json", doc.id()));
    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();

    assert_eq!(saved["title"], "Shape");
    assert_eq!(saved["blocks"][0]["id"], "cta-1");
    assert_eq!(saved["blocks"][0]["type"], "cta");
    assert_eq!(saved["blocks"][0]["content"]["buttonText"], "Sign Up Now");
    assert!(saved.get("selectedBlockId").is_none());
    assert!(saved.get("dirty").is_none());
}

#[tokio::test]
async fn test_commands_replayed_against_stored_page() {
    let pages_dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(pages_dir.path());

    let mut doc = Document::new("Commands");
    for kind in [BlockKind::Text, BlockKind::Image, BlockKind::Cta] {
        doc.apply(Cmd::AddBlock { kind }).unwrap();
    }
    doc.save(&store).await.unwrap();

    let mut reopened = Document::load(&store, &doc.id()).await.unwrap();
    let patches: Vec<_> = [
        Cmd::Select {
            id: Some(BlockId::from("image-1")),
        },
        Cmd::DeleteBlock {
            id: BlockId::from("image-1"),
        },
        Cmd::MoveBlock {
            id: BlockId::from("text-1"),
            direction: Direction::Up,
        },
    ]
    .into_iter()
    .map(|cmd| reopened.apply(cmd).unwrap())
    .collect();

    assert_eq!(
        patches.iter().map(|p| p.changed).collect::<Vec<_>>(),
        vec![false, true, false]
    );
    assert_eq!(reopened.selected(), None);
    assert!(reopened.is_dirty());

    let listed = store.list_pages().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].block_count, 3);
}
