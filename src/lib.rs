mod config;
mod date;
mod record;
mod source;
mod normalize;

mod store;
mod merge;
mod aggregate;
mod chart;

mod collect;
mod credentials;
mod progress;
mod reddit;
mod util;
mod pipeline;

pub use crate::config::{PipelineOptions, DEFAULT_CSV_PATH, ACTIVITY_USER_AGENT, UPVOTE_USER_AGENT};
pub use crate::date::YearMonth;
pub use crate::pipeline::{ActivityPipeline, ArticleWriter, RunSummary};

// Row schema and raw items.
pub use crate::record::{
    ActivityKind, ActivityRecord, ActivityRow, ArticleRecord, RecordDetails, UrlKeyed,
    ACTIVITY_COLUMNS, ARTICLE_COLUMNS, MISSING_AUTHOR,
};
pub use crate::source::{ActivitySource, RawComment, RawSubmission, SourceItem};
pub use crate::normalize::{comment_url, format_local_iso, render_author, LocalZone, Normalizer, COMMENT_URL_PREFIX};

// Persistence policies and the CSV store.
pub use crate::merge::{append_merge_save, dedup_first_by_url, overwrite_save};
pub use crate::store::{count_rows, read_header, read_rows, write_rows};

// Reporting.
pub use crate::aggregate::{
    authors_chart_title, build_report, count_by_month, top_authors, visualize_reading_history, ReadingReport,
    ReportRow, CHART_Y_LABEL, DEFAULT_TOP_N, MONTHS_CHART_TITLE,
};
pub use crate::chart::{ChartSink, NoChart, TerminalChart};

// Collection, the live API session and credentials.
pub use crate::collect::{collect_upvoted_posts, collect_user_activity};
pub use crate::reddit::{parse_listing_page, rate_limit_wait, walk_pages, ListingPage, RedditClient};
pub use crate::credentials::{resolve as resolve_credentials, resolve_with as resolve_credentials_with, CredentialFlags, Credentials};

pub use crate::progress::ProgressScope;
pub use crate::util::init_tracing_once;
