pub mod block;
pub mod page;

pub use block::{
    Alignment, Block, BlockContent, BlockId, BlockKind, CtaContent, FeatureItem, FeaturesContent,
    HeroContent, ImageContent, ImageSize, ParseKindError, TestimonialContent, TextContent,
};
pub use page::{PageId, PageRecord, PageSummary};
