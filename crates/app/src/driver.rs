//! Line-oriented terminal front end.
//!
//! Plain lines are search text; lines starting with `:` are commands.
//! Catalog responses are applied as they arrive, interleaved with input.

use std::fmt::Write as _;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::browse::BrowseSession;
use crate::context::SessionContext;
use crate::detail::MovieDetailSession;
use crate::error::{NoticeKind, SessionError};
use crate::ratings::AppRatingBoard;
use crate::session_cache::SessionCache;

pub const HELP: &str = "\
commands:
  <text>            search the catalog (empty line shows popular movies)
  :next / :prev     move between result pages
  :refresh          re-run the current search now
  :open <n>         open movie <n> of the current page
  :like / :dislike  react to the open movie
  :review <text>    post a review for the open movie
  :reviews          reload the open movie
  :back             return to the result list
  :ratings          show app ratings
  :rate <1-5> [text] rate the app
  :logout           forget the cached profile
  :help             show this help
  :quit             exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Next,
    Prev,
    Refresh,
    Open(usize),
    Back,
    Like,
    Dislike,
    Review(String),
    Reviews,
    Ratings,
    Rate { stars: i32, text: String },
    Logout,
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command ':{0}' (try :help)")]
    Unknown(String),

    #[error(":{0} needs an argument")]
    MissingArgument(&'static str),

    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),
}

/// Parse one input line.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let Some(rest) = line.trim_end_matches(['\r', '\n']).strip_prefix(':') else {
        return Ok(Command::Search(line.trim_end_matches(['\r', '\n']).to_string()));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    let command = match name {
        "next" | "n" => Command::Next,
        "prev" | "p" => Command::Prev,
        "refresh" => Command::Refresh,
        "open" | "o" => {
            if arg.is_empty() {
                return Err(CommandError::MissingArgument("open"));
            }
            let n: usize = arg
                .parse()
                .map_err(|_| CommandError::InvalidNumber(arg.to_string()))?;
            // Rows are shown 1-based.
            let index = n
                .checked_sub(1)
                .ok_or_else(|| CommandError::InvalidNumber(arg.to_string()))?;
            Command::Open(index)
        }
        "back" | "b" => Command::Back,
        "like" => Command::Like,
        "dislike" => Command::Dislike,
        "review" => Command::Review(arg.to_string()),
        "reviews" => Command::Reviews,
        "ratings" => Command::Ratings,
        "rate" => {
            let (stars, text) = match arg.split_once(char::is_whitespace) {
                Some((stars, text)) => (stars, text.trim()),
                None => (arg, ""),
            };
            if stars.is_empty() {
                return Err(CommandError::MissingArgument("rate"));
            }
            let stars = stars
                .parse()
                .map_err(|_| CommandError::InvalidNumber(stars.to_string()))?;
            Command::Rate {
                stars,
                text: text.to_string(),
            }
        }
        "logout" => Command::Logout,
        "help" | "h" => Command::Help,
        "quit" | "q" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(command)
}

/// Format a session error as a one-line notice.
pub fn notice(err: &SessionError) -> String {
    let tag = match err.notice_kind() {
        NoticeKind::Info => "info",
        NoticeKind::Validation => "invalid",
        NoticeKind::Retryable => "try again",
    };
    format!("[{tag}] {err}")
}

pub fn render_browse(browse: &BrowseSession) -> String {
    let state = browse.state();
    let mut out = String::new();
    if state.loading {
        let _ = writeln!(out, "(loading...)");
    }
    if state.no_results {
        let _ = writeln!(out, "No movies found.");
        return out;
    }
    for (i, movie) in browse.page().iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>2}. {} ({}) [{}] popularity {:.1}",
            i + 1,
            movie.title,
            movie.release_date.as_deref().unwrap_or("unknown date"),
            movie.language.as_deref().unwrap_or("-"),
            movie.popularity,
        );
    }
    let _ = writeln!(
        out,
        "page {}/{}",
        browse.page_index() + 1,
        browse.total_pages()
    );
    out
}

pub fn render_detail(detail: &MovieDetailSession) -> String {
    let movie = detail.movie();
    let counts = detail.counts();
    let mut out = String::new();
    let _ = writeln!(out, "{}", movie.title);
    let _ = writeln!(out, "poster: {}", detail.poster_url());
    if let Some(overview) = &movie.overview {
        let _ = writeln!(out, "{overview}");
    }
    let reaction = detail.reaction().map(|v| v.as_str()).unwrap_or("none");
    let _ = writeln!(
        out,
        "likes {}  dislikes {}  (your reaction: {reaction})",
        counts.likes, counts.dislikes
    );
    if detail.reviews().is_empty() {
        let _ = writeln!(out, "No reviews yet.");
    }
    for review in detail.reviews() {
        let _ = writeln!(
            out,
            "- {} ({}): {}",
            review.author_name,
            review.created_at.format("%Y-%m-%d %H:%M"),
            review.text
        );
    }
    out
}

pub fn render_ratings(board: &AppRatingBoard) -> String {
    let summary = board.summary();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:.1} / 5 from {} rating(s)",
        summary.average, summary.rater_count
    );
    for rating in board.ratings() {
        let _ = writeln!(
            out,
            "- {} gave {}: {}",
            rating.user_name, rating.rating, rating.review_text
        );
    }
    out
}

/// Terminal driver state: the browse list plus at most one open movie.
pub struct Driver {
    ctx: Arc<SessionContext>,
    browse: BrowseSession,
    detail: Option<MovieDetailSession>,
    cache: SessionCache,
}

impl Driver {
    pub fn new(ctx: Arc<SessionContext>, browse: BrowseSession, cache: SessionCache) -> Self {
        Self {
            ctx,
            browse,
            detail: None,
            cache,
        }
    }

    /// Read commands from stdin until `:quit` or end of input.
    pub async fn run(mut self) -> std::io::Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        println!("{HELP}");
        self.browse.refresh();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    match parse_command(&line) {
                        Ok(Command::Quit) => break,
                        Ok(command) => {
                            let output = self.handle(command).await;
                            if !output.is_empty() {
                                print!("{output}");
                            }
                        }
                        Err(e) => println!("{e}"),
                    }
                }
                applied = self.browse.next_outcome() => {
                    if applied && self.detail.is_none() {
                        print!("{}", render_browse(&self.browse));
                    }
                }
            }
        }

        tracing::info!("Session ended");
        Ok(())
    }

    /// Execute one command and return what to show.
    pub async fn handle(&mut self, command: Command) -> String {
        match command {
            Command::Search(text) => {
                self.detail = None;
                self.browse.on_text_changed(text);
                String::new()
            }
            Command::Next => {
                let moved = self.browse.next_page();
                self.page_moved(moved)
            }
            Command::Prev => {
                let moved = self.browse.prev_page();
                self.page_moved(moved)
            }
            Command::Refresh => {
                self.browse.refresh();
                String::new()
            }
            Command::Open(index) => {
                let Some(movie) = self.browse.select(index).cloned() else {
                    return "No movie with that number on this page.\n".to_string();
                };
                match MovieDetailSession::open(Arc::clone(&self.ctx), movie).await {
                    Ok(detail) => {
                        let out = render_detail(&detail);
                        self.detail = Some(detail);
                        out
                    }
                    Err(e) => format!("{}\n", notice(&e)),
                }
            }
            Command::Back => {
                self.detail = None;
                render_browse(&self.browse)
            }
            Command::Like | Command::Dislike | Command::Review(_) | Command::Reviews => {
                let Some(detail) = self.detail.as_mut() else {
                    return "Open a movie first (:open <n>).\n".to_string();
                };
                let result = match command {
                    Command::Like => detail.like().await.map(|_| ()),
                    Command::Dislike => detail.dislike().await.map(|_| ()),
                    Command::Review(text) => detail.post_review(&text).await.map(|_| ()),
                    _ => detail.reload().await,
                };
                match result {
                    Ok(()) => render_detail(detail),
                    Err(e) => format!("{}\n", notice(&e)),
                }
            }
            Command::Ratings => match AppRatingBoard::load(Arc::clone(&self.ctx)).await {
                Ok(board) => render_ratings(&board),
                Err(e) => format!("{}\n", notice(&e)),
            },
            Command::Rate { stars, text } => {
                let result = async {
                    let mut board = AppRatingBoard::load(Arc::clone(&self.ctx)).await?;
                    board.submit(stars, &text).await?;
                    Ok::<_, SessionError>(board)
                }
                .await;
                match result {
                    Ok(board) => render_ratings(&board),
                    Err(e) => format!("{}\n", notice(&e)),
                }
            }
            Command::Logout => match self.cache.clear_profile().await {
                Ok(()) => "Signed out. Restart to continue as Guest.\n".to_string(),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to clear session cache");
                    format!("[try again] {e}\n")
                }
            },
            Command::Help => format!("{HELP}\n"),
            Command::Quit => String::new(),
        }
    }

    fn page_moved(&self, moved: bool) -> String {
        if moved {
            render_browse(&self.browse)
        } else {
            "No more pages that way.\n".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn plain_lines_are_search_text() {
        assert_eq!(parse_command("batman"), Ok(Command::Search("batman".into())));
        assert_eq!(parse_command(""), Ok(Command::Search(String::new())));
        assert_eq!(parse_command("  dune\n"), Ok(Command::Search("  dune".into())));
    }

    #[test]
    fn navigation_commands() {
        assert_eq!(parse_command(":next"), Ok(Command::Next));
        assert_eq!(parse_command(":p"), Ok(Command::Prev));
        assert_eq!(parse_command(":back"), Ok(Command::Back));
        assert_eq!(parse_command(":q"), Ok(Command::Quit));
    }

    #[test]
    fn open_is_one_based() {
        assert_eq!(parse_command(":open 1"), Ok(Command::Open(0)));
        assert_eq!(parse_command(":open 3"), Ok(Command::Open(2)));
        assert_matches!(parse_command(":open 0"), Err(CommandError::InvalidNumber(_)));
        assert_matches!(parse_command(":open x"), Err(CommandError::InvalidNumber(_)));
        assert_eq!(
            parse_command(":open"),
            Err(CommandError::MissingArgument("open"))
        );
    }

    #[test]
    fn review_keeps_its_text() {
        assert_eq!(
            parse_command(":review Loved the score"),
            Ok(Command::Review("Loved the score".into()))
        );
        assert_eq!(parse_command(":review"), Ok(Command::Review(String::new())));
    }

    #[test]
    fn rate_takes_stars_and_optional_text() {
        assert_eq!(
            parse_command(":rate 4 great app"),
            Ok(Command::Rate {
                stars: 4,
                text: "great app".into()
            })
        );
        assert_eq!(
            parse_command(":rate 5"),
            Ok(Command::Rate {
                stars: 5,
                text: String::new()
            })
        );
        assert_matches!(parse_command(":rate five"), Err(CommandError::InvalidNumber(_)));
        assert_eq!(
            parse_command(":rate"),
            Err(CommandError::MissingArgument("rate"))
        );
    }

    #[test]
    fn unknown_command_is_reported() {
        assert_eq!(
            parse_command(":fly"),
            Err(CommandError::Unknown("fly".into()))
        );
    }
}
