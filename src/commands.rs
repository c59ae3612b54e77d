use clap::{Parser, Subcommand};
use quotebook::ScoredQuote;

use crate::{Context, Error};

pub mod admin;
pub mod browse;
pub mod quote;
pub mod vote;

#[derive(Parser, Debug)]
#[command(name = "quotebook", version)]
#[command(about = "a book of short quotes, with votes and near-duplicate detection")]
pub struct Cli {
    /// database url or path
    #[arg(short, long, global = true, env = "DATABASE_URL")]
    pub database: Option<String>,

    /// print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// create the database and its tables if missing
    Init,
    /// drop every quote and vote
    Reset {
        /// required, as a guard
        #[arg(long)]
        yes: bool,
    },
    /// count active quotes
    Stats,
    /// add a quote
    Add {
        content: String,
        #[arg(short, long)]
        context: String,
        #[arg(short, long)]
        author: String,
    },
    /// hide a quote from every listing
    Delete { id: i64 },
    /// show quotes by id
    Get {
        #[arg(required = true)]
        ids: Vec<i64>,
    },
    /// the latest quotes
    Last {
        #[arg(default_value_t = 5)]
        n: u32,
    },
    /// random quotes
    Random {
        #[arg(default_value_t = 5)]
        n: u32,
    },
    /// the best rated quotes
    Top {
        #[arg(default_value_t = 5)]
        n: u32,
    },
    /// the worst rated quotes
    Flop {
        #[arg(default_value_t = 5)]
        n: u32,
    },
    /// quotes containing an expression
    Search {
        expression: String,
        #[arg(default_value_t = 5)]
        n: u32,
    },
    /// quotes resembling an expression
    Fuzzy {
        expression: String,
        #[arg(default_value_t = 5)]
        n: u32,
    },
    /// +1 a quote
    Upvote {
        id: i64,
        #[arg(short, long)]
        voter: i64,
    },
    /// -1 a quote
    Downvote {
        id: i64,
        #[arg(short, long)]
        voter: i64,
    },
    /// withdraw a vote
    Unvote {
        id: i64,
        #[arg(short, long)]
        voter: i64,
    },
}

pub async fn run(ctx: Context<'_>, command: Command) -> Result<(), Error> {
    match command {
        Command::Init => admin::init(ctx).await,
        Command::Reset { yes } => admin::reset(ctx, yes).await,
        Command::Stats => admin::stats(ctx).await,
        Command::Add {
            content,
            context,
            author,
        } => quote::add_quote(ctx, content, context, author).await,
        Command::Delete { id } => quote::delete_quote(ctx, id).await,
        Command::Get { ids } => quote::get_quotes(ctx, ids).await,
        Command::Last { n } => browse::last(ctx, n).await,
        Command::Random { n } => browse::random(ctx, n).await,
        Command::Top { n } => browse::top(ctx, n).await,
        Command::Flop { n } => browse::flop(ctx, n).await,
        Command::Search { expression, n } => browse::search(ctx, expression, n).await,
        Command::Fuzzy { expression, n } => browse::fuzzy(ctx, expression, n).await,
        Command::Upvote { id, voter } => vote::upvote(ctx, id, voter).await,
        Command::Downvote { id, voter } => vote::downvote(ctx, id, voter).await,
        Command::Unvote { id, voter } => vote::unvote(ctx, id, voter).await,
    }
}

pub(crate) fn format_quote(quote: &ScoredQuote) -> String {
    format!(
        "#Q{} [{:+}] {} ({}, {})",
        quote.quote.id, quote.score, quote.quote.content, quote.quote.context, quote.quote.author
    )
}

pub(crate) fn print_quotes(ctx: Context<'_>, quotes: &[ScoredQuote]) -> Result<(), Error> {
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(quotes)?);
        return Ok(());
    }

    if quotes.is_empty() {
        println!("no quotes found!");
        return Ok(());
    }

    for quote in quotes {
        println!("{}", format_quote(quote));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn database_falls_back_to_database_url() {
        let cli = Cli::command();
        let database = cli
            .get_arguments()
            .find(|arg| arg.get_id() == "database")
            .unwrap();

        assert_eq!(
            database.get_env(),
            Some(std::ffi::OsStr::new("DATABASE_URL"))
        );
    }

    #[test]
    fn database_flag_is_global() {
        let cli = Cli::try_parse_from(["quotebook", "stats", "--database", "quotes.db"]).unwrap();

        assert_eq!(cli.database.as_deref(), Some("quotes.db"));
        assert!(matches!(cli.command, Command::Stats));
    }
}
