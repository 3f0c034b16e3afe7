//! Manuscript engine: the build pipeline from article sources to site artifacts.
mod assemble;
mod escape;
mod export;
mod feed;
mod frontmatter;
mod highlight;
mod persist;
mod reading_time;
mod render;
mod store;

pub use assemble::{AggregateError, ArticleAssembler, AssembleError};
pub use export::{write_page_data, ExportError, PAGE_DATA_FILE_NAME};
pub use feed::{build_feed, promotional_footer, FeedError, FeedGenerator, FEED_FILE_NAME};
pub use frontmatter::{parse_front_matter, split_front_matter, FrontMatterError};
pub use highlight::{Highlighter, SyntectHighlighter};
pub use persist::{OutputDir, PersistError};
pub use reading_time::{
    minutes_for_words, strip_markup, ReadingTimeEstimator, UnicodeWordCounter, WordCounter,
    WORDS_PER_MINUTE,
};
pub use render::{MarkdownRenderer, PulldownRenderer, RenderError};
pub use store::{ArticleSource, FsArticleStore, StoreError};
