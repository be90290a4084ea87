mod article_list;
mod breaking_news;
mod pagination;
mod status_bar;

pub use article_list::ArticleListWidget;
pub use breaking_news::BreakingNewsWidget;
pub use pagination::PaginationWidget;
pub use status_bar::StatusBarWidget;
